use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use common::detection::error::DetectionError;

#[derive(Serialize)]
pub struct OperationStatus<T: Serialize = ()> {
    success: bool,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl OperationStatus {
    pub fn new(success: bool, error: Option<String>) -> Self {
        Self {
            success,
            error,
            data: None,
        }
    }
}

impl<T: Serialize> OperationStatus<T> {
    pub fn with_data(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }
}

pub fn status_code(error: &DetectionError) -> StatusCode {
    match error {
        DetectionError::ImageDecodeFailure(_)
        | DetectionError::InvalidThreshold { .. }
        | DetectionError::UnsupportedFileType(_)
        | DetectionError::MissingImage
        | DetectionError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        DetectionError::InferenceCallFailure(_) => StatusCode::BAD_GATEWAY,
        DetectionError::AnnotationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(error: &DetectionError) -> HttpResponse {
    HttpResponse::build(status_code(error)).json(OperationStatus::new(false, Some(error.to_string())))
}
