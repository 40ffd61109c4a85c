use futures::future::BoxFuture;
use uuid::Uuid;
use common::detection::error::DetectionError;
use common::detection::raw_detection::RawDetection;
use common::detection::threshold::Thresholds;

/// A remote object-detection model.
///
/// Built once at startup and shared read-only across requests, so
/// implementations must be safe to call concurrently.
pub trait InferenceClient: Send + Sync {
    /// `image` is the encoded upload as received. Progress is logged against
    /// `request_id`. Failures surface as [`DetectionError::InferenceCallFailure`].
    fn predict<'a>(&'a self, request_id: Uuid, image: &'a [u8], thresholds: Thresholds) -> BoxFuture<'a, Result<Vec<RawDetection>, DetectionError>>;
}
