use actix_web::{get, post, web, HttpResponse, Responder, Scope};
use tokio::sync::RwLock;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::utils::response::OperationStatus;

pub fn initialize() -> Scope {
    web::scope("/config")
        .service(get_config)
        .service(update_config)
}

#[get("/get")]
async fn get_config(config: web::Data<RwLock<Config>>) -> impl Responder {
    web::Json(config.read().await.clone())
}

#[post("/update")]
async fn update_config(config: web::Data<RwLock<Config>>, incoming: web::Json<Config>) -> impl Responder {
    let incoming = incoming.into_inner();
    if Config::validate(&incoming) {
        let mut current = config.write().await;
        let updated = current.apply_update(incoming);
        *current = updated;
        drop(current);
        logging_information!(WebEntry::ConfigUpdated);
        HttpResponse::Ok().json(OperationStatus::new(true, None))
    } else {
        HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Invalid configuration.".to_string())))
    }
}
