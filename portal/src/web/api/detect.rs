use std::path::Path;
use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpResponse, Responder, Scope};
use futures::{StreamExt, TryStreamExt};
use sanitize_filename::sanitize;
use tokio::sync::RwLock;
use uuid::Uuid;
use common::detection::error::DetectionError;
use common::detection::threshold::Thresholds;
use crate::detector::detection_report::DetectionReport;
use crate::detector::detector::Detector;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::utils::response::{error_response, OperationStatus};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn initialize() -> Scope {
    web::scope("/detect")
        .service(detect)
}

struct Upload {
    file_name: String,
    image: Vec<u8>,
}

#[derive(Default)]
struct DetectionForm {
    upload: Option<Upload>,
    confidence: Option<u8>,
    overlap: Option<u8>,
}

/// Multipart fields: `image` (file), `confidence` and `overlap` (0-100, optional).
#[post("")]
async fn detect(detector: web::Data<Detector>, config: web::Data<RwLock<Config>>, payload: Multipart) -> impl Responder {
    let request_id = Uuid::new_v4();
    let config = config.read().await.clone();
    match run_detection(&detector, request_id, payload, &config).await {
        Ok(report) => {
            logging_information!(request_id, WebEntry::DetectionFinished(report.annotated_geometry.len()), "");
            HttpResponse::Ok().json(OperationStatus::with_data(report))
        },
        Err(err) => {
            logging_error!(request_id, WebEntry::DetectionFailed(err.to_string()), "");
            error_response(&err)
        },
    }
}

async fn run_detection(detector: &Detector, request_id: Uuid, payload: Multipart, config: &Config) -> Result<DetectionReport, DetectionError> {
    let form = read_form(payload, config.max_upload_size).await?;
    let thresholds = Thresholds::from_percentage(
        form.confidence.unwrap_or(config.default_confidence),
        form.overlap.unwrap_or(config.default_overlap),
    )?;
    let upload = form.upload.ok_or(DetectionError::MissingImage)?;
    logging_information!(request_id, WebEntry::DetectionRequested(upload.file_name.clone()), "");
    detector.process_image(request_id, upload.image, thresholds, config).await
}

async fn read_form(mut payload: Multipart, max_upload_size: usize) -> Result<DetectionForm, DetectionError> {
    let mut form = DetectionForm::default();
    while let Some(mut field) = payload.try_next().await.map_err(|err| DetectionError::InvalidPayload(err.to_string()))? {
        let (field_name, file_name) = match field.content_disposition() {
            Some(content_disposition) => (
                content_disposition.get_name().unwrap_or_default().to_string(),
                content_disposition.get_filename().map(sanitize),
            ),
            None => return Err(DetectionError::InvalidPayload("Missing content disposition.".to_string())),
        };
        match field_name.as_str() {
            "image" => {
                let file_name = file_name.unwrap_or_default();
                if file_name.is_empty() {
                    return Err(DetectionError::InvalidPayload("Invalid filename.".to_string()));
                }
                let extension = Path::new(&file_name).extension()
                    .and_then(|os_str| os_str.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
                    return Err(DetectionError::UnsupportedFileType(file_name));
                }
                let image = read_field(&mut field, max_upload_size).await?;
                form.upload = Some(Upload { file_name, image });
            },
            "confidence" => form.confidence = Some(read_percentage(&mut field, "confidence").await?),
            "overlap" => form.overlap = Some(read_percentage(&mut field, "overlap").await?),
            _ => {
                read_field(&mut field, max_upload_size).await?;
            },
        }
    }
    Ok(form)
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, DetectionError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| DetectionError::InvalidPayload(err.to_string()))?;
        if data.len() + chunk.len() > limit {
            return Err(DetectionError::InvalidPayload(format!("Upload exceeds {limit} bytes.")));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_percentage(field: &mut Field, name: &str) -> Result<u8, DetectionError> {
    let data = read_field(field, 16).await?;
    String::from_utf8_lossy(&data).trim().parse::<u8>()
        .map_err(|_| DetectionError::InvalidPayload(format!("Invalid {name} value.")))
}
