mod handler;
mod model;
mod store;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

use crate::handler::*;
use crate::store::ParkingSpotStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let port = std::env::var("HTTP_PORT")
        .expect("HTTP_PORT must be set")
        .parse::<u16>()
        .expect("HTTP_PORT must be a valid number");
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = match SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
    {
        Ok(pool) => {
            println!("Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let store = ParkingSpotStore::new(pool);
    if let Err(err) = store.init_schema().await {
        println!("Failed to initialize the schema: {:?}", err);
        std::process::exit(1);
    }

    println!("Server started successfully");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                store: store.clone(),
            }))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(post_parking_spot)
            .service(get_parking_spots)
            .service(get_parking_spot_by_id)
            .service(delete_parking_spot_by_id)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
