use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceEntry {
    #[error("Inference request sent, confidence {0}%, overlap {1}%")]
    RequestSent(u8, u8),
    #[error("Inference attempt {0} failed: {1}")]
    AttemptFailed(u32, String),
    #[error("Retrying inference in {0} ms")]
    Retrying(u64),
    #[error("Inference service returned {0} detections")]
    DetectionsReceived(usize),
}

impl From<InferenceEntry> for String {
    #[inline(always)]
    fn from(value: InferenceEntry) -> Self {
        value.to_string()
    }
}
