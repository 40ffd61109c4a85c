use crate::portal::portal::Portal;

pub mod detector;
pub mod inference;
pub mod portal;
pub mod utils;
pub mod web;

#[actix_web::main]
async fn main() {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "./portal.toml".to_string());
    Portal::run(&config_path).await;
    Portal::terminate().await;
}
