use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::model::ParkingSpotModel;

/// Record store for parking spots, backed by a SQLite pool.
///
/// The three uniqueness invariants (license plate, spot number, apartment +
/// block) are enforced here as UNIQUE constraints. The handler runs existence
/// pre-checks for friendly error messages, but those checks race between
/// concurrent creates; the constraints are the authoritative guard, and a
/// losing insert surfaces as a `UNIQUE constraint failed` error from `save`.
#[derive(Clone)]
pub struct ParkingSpotStore {
    pool: SqlitePool,
}

impl ParkingSpotStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parking_spots (
                id BLOB PRIMARY KEY,
                parking_spot_number TEXT NOT NULL UNIQUE,
                license_plate_car TEXT NOT NULL UNIQUE,
                model_car TEXT NOT NULL,
                brand_car TEXT NOT NULL,
                color_car TEXT NOT NULL,
                responsible_name TEXT NOT NULL,
                apartment TEXT NOT NULL,
                block TEXT NOT NULL,
                registration_date TEXT NOT NULL,
                UNIQUE (apartment, block)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn exists_by_license_plate_car(&self, plate: &str) -> sqlx::Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE license_plate_car = ?)",
        )
        .bind(plate)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn exists_by_parking_spot_number(&self, number: &str) -> sqlx::Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE parking_spot_number = ?)",
        )
        .bind(number)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE apartment = ? AND block = ?)",
        )
        .bind(apartment)
        .bind(block)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn save(&self, model: ParkingSpotModel) -> sqlx::Result<ParkingSpotModel> {
        sqlx::query_as::<_, ParkingSpotModel>(
            r#"
            INSERT INTO parking_spots
            (id, parking_spot_number, license_plate_car, model_car, brand_car,
             color_car, responsible_name, apartment, block, registration_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *;
            "#,
        )
        .bind(model.id)
        .bind(model.parking_spot_number)
        .bind(model.license_plate_car)
        .bind(model.model_car)
        .bind(model.brand_car)
        .bind(model.color_car)
        .bind(model.responsible_name)
        .bind(model.apartment)
        .bind(model.block)
        .bind(model.registration_date)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_all(&self) -> sqlx::Result<Vec<ParkingSpotModel>> {
        sqlx::query_as::<_, ParkingSpotModel>(
            "SELECT * FROM parking_spots ORDER BY registration_date;",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> sqlx::Result<Option<ParkingSpotModel>> {
        sqlx::query_as::<_, ParkingSpotModel>("SELECT * FROM parking_spots WHERE id = ?;")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn delete(&self, model: &ParkingSpotModel) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM parking_spots WHERE id = ?;")
            .bind(model.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> ParkingSpotStore {
        // Single connection so the in-memory database survives the whole test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = ParkingSpotStore::new(pool);
        store.init_schema().await.unwrap();
        store
    }

    fn spot(plate: &str, number: &str, apartment: &str, block: &str) -> ParkingSpotModel {
        ParkingSpotModel {
            id: Uuid::new_v4(),
            parking_spot_number: number.to_string(),
            license_plate_car: plate.to_string(),
            model_car: "Civic".to_string(),
            brand_car: "Honda".to_string(),
            color_car: "black".to_string(),
            responsible_name: "Maria Silva".to_string(),
            apartment: apartment.to_string(),
            block: block.to_string(),
            registration_date: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn save_then_find_round_trips() {
        let store = test_store().await;
        let model = spot("RRS8562", "205A", "205", "A");
        let id = model.id;

        let saved = store.save(model.clone()).await.unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.license_plate_car, "RRS8562");

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.parking_spot_number, "205A");
        assert_eq!(found.registration_date, saved.registration_date);
    }

    #[actix_web::test]
    async fn existence_checks_see_saved_rows() {
        let store = test_store().await;
        store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();

        assert!(store.exists_by_license_plate_car("RRS8562").await.unwrap());
        assert!(!store.exists_by_license_plate_car("XYZ0000").await.unwrap());
        assert!(store.exists_by_parking_spot_number("205A").await.unwrap());
        assert!(!store.exists_by_parking_spot_number("206B").await.unwrap());
        assert!(store.exists_by_apartment_and_block("205", "A").await.unwrap());
        assert!(!store.exists_by_apartment_and_block("205", "B").await.unwrap());
    }

    #[actix_web::test]
    async fn duplicate_license_plate_is_rejected_by_constraint() {
        let store = test_store().await;
        store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();

        let err = store
            .save(spot("RRS8562", "206B", "206", "B"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("license_plate_car"));
    }

    #[actix_web::test]
    async fn duplicate_spot_number_is_rejected_by_constraint() {
        let store = test_store().await;
        store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();

        let err = store
            .save(spot("QWE1234", "205A", "206", "B"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("parking_spot_number"));
    }

    #[actix_web::test]
    async fn duplicate_apartment_and_block_is_rejected_by_constraint() {
        let store = test_store().await;
        store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();

        let err = store
            .save(spot("QWE1234", "206B", "205", "A"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("apartment"));
    }

    #[actix_web::test]
    async fn delete_removes_the_row() {
        let store = test_store().await;
        let saved = store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();

        store.delete(&saved).await.unwrap();
        assert!(store.find_by_id(saved.id).await.unwrap().is_none());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn find_all_returns_every_row() {
        let store = test_store().await;
        assert!(store.find_all().await.unwrap().is_empty());

        store.save(spot("RRS8562", "205A", "205", "A")).await.unwrap();
        store.save(spot("QWE1234", "206B", "206", "B")).await.unwrap();

        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }
}
