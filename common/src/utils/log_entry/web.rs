use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebEntry {
    #[error("Detection request received for {0}")]
    DetectionRequested(String),
    #[error("Detection finished, {0} detections drawn")]
    DetectionFinished(usize),
    #[error("{0} malformed detections skipped")]
    MalformedSkipped(usize),
    #[error("Detection request failed: {0}")]
    DetectionFailed(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Contact message received from {0}")]
    ContactReceived(String),
    #[error("Configuration updated")]
    ConfigUpdated,
}

impl From<WebEntry> for String {
    #[inline(always)]
    fn from(value: WebEntry) -> Self {
        value.to_string()
    }
}
