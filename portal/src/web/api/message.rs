use actix_web::{post, web, HttpResponse, Responder, Scope};
use serde::Deserialize;
use crate::utils::logging::*;
use crate::web::utils::response::OperationStatus;

pub fn initialize() -> Scope {
    web::scope("/message")
        .service(send_message)
}

#[derive(Deserialize, Debug)]
pub struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

impl ContactForm {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message].iter().all(|field| !field.trim().is_empty())
    }
}

#[post("/send")]
async fn send_message(form: web::Json<ContactForm>) -> impl Responder {
    let form = form.into_inner();
    if !form.is_complete() {
        return HttpResponse::BadRequest().json(OperationStatus::new(false, Some("Please fill in all fields.".to_string())));
    }
    logging_information!(WebEntry::ContactReceived(format!("{} <{}>", form.name.trim(), form.email.trim())), format!("{} characters", form.message.chars().count()));
    HttpResponse::Ok().json(OperationStatus::with_data("Thank you for your message! We'll get back to you soon."))
}
