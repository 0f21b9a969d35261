use actix_web::{delete, get, post, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::model::ParkingSpotDto;
use crate::store::ParkingSpotStore;

pub struct AppState {
    pub store: ParkingSpotStore,
}

/// Maps a failed insert to a response. The existence pre-checks in
/// `post_parking_spot` race between concurrent creates, so a duplicate can
/// still reach the insert and trip a UNIQUE constraint; that loser gets the
/// same conflict message the pre-check would have produced.
fn save_error_response(e: sqlx::Error) -> HttpResponse {
    let message = e.to_string();
    if message.contains("parking_spots.license_plate_car") {
        HttpResponse::Conflict().body("Erro. License Plate Car is already in use")
    } else if message.contains("parking_spots.parking_spot_number") {
        HttpResponse::Conflict().body("Erro. Parking spot is already in use")
    } else if message.contains("UNIQUE constraint failed") {
        HttpResponse::Conflict()
            .body("Erro. Parking spot is already in use for this apartment and block")
    } else {
        HttpResponse::InternalServerError().body("Failed to create parking spot")
    }
}

#[post("/parking-spot")]
pub async fn post_parking_spot(
    data: web::Data<AppState>,
    request: web::Json<ParkingSpotDto>,
) -> impl Responder {
    let dto = request.into_inner();

    let errors = dto.validate();
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }));
    }

    match data
        .store
        .exists_by_license_plate_car(&dto.license_plate_car)
        .await
    {
        Ok(false) => {}
        Ok(true) => {
            return HttpResponse::Conflict().body("Erro. License Plate Car is already in use")
        }
        Err(_) => return HttpResponse::InternalServerError().body("Failed to query parking spots"),
    }

    match data
        .store
        .exists_by_parking_spot_number(&dto.parking_spot_number)
        .await
    {
        Ok(false) => {}
        Ok(true) => return HttpResponse::Conflict().body("Erro. Parking spot is already in use"),
        Err(_) => return HttpResponse::InternalServerError().body("Failed to query parking spots"),
    }

    match data
        .store
        .exists_by_apartment_and_block(&dto.apartment, &dto.block)
        .await
    {
        Ok(false) => {}
        Ok(true) => {
            return HttpResponse::Conflict()
                .body("Erro. Parking spot is already in use for this apartment and block")
        }
        Err(_) => return HttpResponse::InternalServerError().body("Failed to query parking spots"),
    }

    match data.store.save(dto.into_model()).await {
        Ok(saved) => HttpResponse::Created().json(saved),
        Err(e) => save_error_response(e),
    }
}

#[get("/parking-spot")]
pub async fn get_parking_spots(data: web::Data<AppState>) -> impl Responder {
    match data.store.find_all().await {
        Ok(spots) => HttpResponse::Ok().json(spots),
        Err(_) => HttpResponse::InternalServerError().body("Failed to query parking spots"),
    }
}

#[get("/parking-spot/{id}")]
pub async fn get_parking_spot_by_id(
    data: web::Data<AppState>,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    match data.store.find_by_id(id).await {
        Ok(Some(spot)) => HttpResponse::Ok().json(spot),
        Ok(None) => HttpResponse::NotFound().body("Parking spot not Found"),
        Err(_) => HttpResponse::InternalServerError().body("Failed to query parking spot"),
    }
}

#[delete("/parking-spot/{id}")]
pub async fn delete_parking_spot_by_id(
    data: web::Data<AppState>,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let spot = match data.store.find_by_id(id).await {
        Ok(Some(spot)) => spot,
        Ok(None) => return HttpResponse::NotFound().body("Parking Spot not Found"),
        Err(_) => return HttpResponse::InternalServerError().body("Failed to query parking spot"),
    };

    match data.store.delete(&spot).await {
        Ok(()) => HttpResponse::Ok().body("Register deleted successfully"),
        Err(_) => HttpResponse::InternalServerError().body("Failed to delete parking spot"),
    }
}
