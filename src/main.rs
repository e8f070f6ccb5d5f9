use actix_web::web;
use app_core::domain::readiness::Readiness;
use app_core::infrastructure::catalog_client::CatalogClient;
use app_core::{build_server, create_pool, initialize_store, AppState};
use dotenvy::dotenv;
use std::env;

const DEFAULT_CATALOG_URL: &str = "https://68fee919e02b16d1753bc821.mockapi.io";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "db.db".to_string());
    let catalog_url = env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let pool = create_pool(&database_url).expect("Failed to create database connection pool");
    let readiness = Readiness::new();
    let status = initialize_store(&pool, &readiness);
    log::info!("Local store at {} is {}", database_url, status.as_str());

    let catalog = CatalogClient::new(catalog_url).expect("Failed to build catalog HTTP client");
    let state = web::Data::new(AppState::new(pool, readiness, catalog));

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(state, &host, port)?.await
}
