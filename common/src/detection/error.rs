use std::fmt::{Display, Formatter};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Could not read the image file: {0}")]
    ImageDecodeFailure(String),
    #[error("Inference service call failed: {0}")]
    InferenceCallFailure(String),
    #[error("Could not render the annotated image: {0}")]
    AnnotationFailure(String),
    #[error("Invalid {name} threshold {value}, expected a fraction between 0 and 1")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("No image was uploaded")]
    MissingImage,
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<DetectionError> for String {
    #[inline(always)]
    fn from(value: DetectionError) -> Self {
        value.to_string()
    }
}

#[derive(Error, Serialize, Debug, Copy, Clone, PartialEq)]
pub enum MalformedReason {
    #[error("non-positive width {0}")]
    NonPositiveWidth(f64),
    #[error("non-positive height {0}")]
    NonPositiveHeight(f64),
    #[error("non-finite geometry")]
    NonFiniteGeometry,
}

/// A record the normalizer refused, with its position in the input.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MalformedDetection {
    pub index: usize,
    pub class_label: String,
    pub reason: MalformedReason,
}

impl Display for MalformedDetection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Detection #{} ({}) skipped: {}", self.index, self.class_label, self.reason)
    }
}
