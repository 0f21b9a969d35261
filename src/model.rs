use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpotModel {
    pub id: Uuid,
    pub parking_spot_number: String,
    pub license_plate_car: String,
    pub model_car: String,
    pub brand_car: String,
    pub color_car: String,
    pub responsible_name: String,
    pub apartment: String,
    pub block: String,
    pub registration_date: DateTime<Utc>,
}

/// Client-supplied payload for POST /parking-spot. Missing keys fall back to
/// the empty string so `validate` can report them per field instead of the
/// request dying inside the JSON extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpotDto {
    #[serde(default)]
    pub parking_spot_number: String,
    #[serde(default)]
    pub license_plate_car: String,
    #[serde(default)]
    pub model_car: String,
    #[serde(default)]
    pub brand_car: String,
    #[serde(default)]
    pub color_car: String,
    #[serde(default)]
    pub responsible_name: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub block: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ParkingSpotDto {
    /// Every field is required and non-blank. Returns one entry per offending
    /// field, named as it appears on the wire.
    pub fn validate(&self) -> Vec<FieldError> {
        let fields = [
            ("parkingSpotNumber", &self.parking_spot_number),
            ("licensePlateCar", &self.license_plate_car),
            ("modelCar", &self.model_car),
            ("brandCar", &self.brand_car),
            ("colorCar", &self.color_car),
            ("responsibleName", &self.responsible_name),
            ("apartment", &self.apartment),
            ("block", &self.block),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldError {
                field,
                message: "must not be blank",
            })
            .collect()
    }

    /// Field-by-field mapping into the persisted form. The id and the
    /// registration timestamp are assigned here, server-side; the client never
    /// supplies either.
    pub fn into_model(self) -> ParkingSpotModel {
        ParkingSpotModel {
            id: Uuid::new_v4(),
            parking_spot_number: self.parking_spot_number,
            license_plate_car: self.license_plate_car,
            model_car: self.model_car,
            brand_car: self.brand_car,
            color_car: self.color_car,
            responsible_name: self.responsible_name,
            apartment: self.apartment,
            block: self.block,
            registration_date: Utc::now(),
        }
    }
}
