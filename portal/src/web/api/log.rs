use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use uuid::Uuid;
use crate::utils::logging::Logger;

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_since)
        .service(request_log)
        .service(request_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    let logs = Logger::get_system_logs().await;
    HttpResponse::Ok().body(Logger::format_logs(&logs))
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since.into_inner()) {
        Ok(since_time) => {
            let logs = Logger::get_system_logs_since(since_time).await;
            HttpResponse::Ok().body(Logger::format_logs(&logs))
        },
        Err(err) => HttpResponse::BadRequest().body(err),
    }
}

#[get("/{request_id}")]
async fn request_log(request_id: web::Path<Uuid>) -> impl Responder {
    match Logger::get_request_logs(request_id.into_inner()).await {
        Some(logs) => HttpResponse::Ok().body(Logger::format_logs(&logs)),
        None => HttpResponse::BadRequest().body("Request not found."),
    }
}

#[get("/{request_id}/since/{since}")]
async fn request_log_since(argument: web::Path<(Uuid, String)>) -> impl Responder {
    let (request_id, since) = argument.into_inner();
    let since_time = match parse_datetime(&since) {
        Ok(since_time) => since_time,
        Err(err) => return HttpResponse::BadRequest().body(err),
    };
    match Logger::get_request_logs_since(request_id, since_time).await {
        Some(logs) => HttpResponse::Ok().body(Logger::format_logs(&logs)),
        None => HttpResponse::BadRequest().body("Request not found."),
    }
}

fn parse_datetime(datetime_str: &str) -> Result<DateTime<Local>, String> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d-%H-%M-%S")
        .map_err(|_| "Invalid datetime format.".to_string())
        .and_then(|naive_date_time| {
            Local.from_local_datetime(&naive_date_time)
                .single()
                .ok_or("Invalid local datetime.".to_string())
        })
}
