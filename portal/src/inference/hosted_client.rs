use std::time::Duration;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Url};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tokio::time::sleep;
use uuid::Uuid;
use common::detection::error::DetectionError;
use common::detection::raw_detection::RawDetection;
use common::detection::threshold::Thresholds;
use crate::inference::inference_client::InferenceClient;
use crate::utils::config::Config;
use crate::utils::logging::*;

#[derive(Deserialize, Debug)]
struct PredictionResponse {
    #[serde(default)]
    predictions: Vec<RawDetection>,
}

/// Client for a hosted detection API addressed as `{endpoint}/{project}/{version}`.
///
/// The image travels base64 encoded in the request body. Thresholds travel as
/// whole percentages, which is what the hosted API expects.
pub struct HostedClient {
    http: Client,
    endpoint: String,
    api_key: String,
    project: String,
    version: u32,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HostedClient {
    pub fn new(config: &Config) -> Result<Self, DetectionError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|err| DetectionError::InferenceCallFailure(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.inference_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            project: config.project.clone(),
            version: config.version,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff),
        })
    }

    fn request_url(&self, thresholds: Thresholds) -> Result<Url, DetectionError> {
        let model_url = format!("{}/{}/{}", self.endpoint, self.project, self.version);
        let params = [
            ("api_key", self.api_key.clone()),
            ("confidence", thresholds.confidence_percentage().to_string()),
            ("overlap", thresholds.overlap_percentage().to_string()),
            ("format", "json".to_string()),
        ];
        Url::parse_with_params(&model_url, &params)
            .map_err(|err| DetectionError::InferenceCallFailure(format!("Invalid endpoint {model_url}: {err}")))
    }

    async fn send(&self, url: Url, body: String) -> Result<Vec<RawDetection>, String> {
        let response = self.http.post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send().await
            .map_err(|err| err.without_url().to_string())?
            .error_for_status()
            .map_err(|err| err.without_url().to_string())?;
        let prediction = response.json::<PredictionResponse>().await
            .map_err(|err| format!("Unexpected response: {}", err.without_url()))?;
        Ok(prediction.predictions)
    }

    async fn predict_with_retry(&self, request_id: Uuid, image: &[u8], thresholds: Thresholds) -> Result<Vec<RawDetection>, DetectionError> {
        let url = self.request_url(thresholds)?;
        let body = STANDARD.encode(image);
        logging_debug!(request_id, InferenceEntry::RequestSent(thresholds.confidence_percentage(), thresholds.overlap_percentage()), "");
        let mut attempt = 0_u32;
        loop {
            attempt += 1;
            match self.send(url.clone(), body.clone()).await {
                Ok(detections) => {
                    logging_debug!(request_id, InferenceEntry::DetectionsReceived(detections.len()), "");
                    return Ok(detections);
                },
                Err(err) => {
                    logging_warning!(request_id, InferenceEntry::AttemptFailed(attempt, err.clone()), "");
                    if attempt > self.max_retries {
                        return Err(DetectionError::InferenceCallFailure(err));
                    }
                    let backoff = self.retry_backoff * attempt;
                    logging_information!(request_id, InferenceEntry::Retrying(backoff.as_millis() as u64), "");
                    sleep(backoff).await;
                },
            }
        }
    }
}

impl InferenceClient for HostedClient {
    fn predict<'a>(&'a self, request_id: Uuid, image: &'a [u8], thresholds: Thresholds) -> BoxFuture<'a, Result<Vec<RawDetection>, DetectionError>> {
        self.predict_with_retry(request_id, image, thresholds).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::tests::sample;

    #[test]
    fn builds_model_url_with_percentage_thresholds() {
        let client = HostedClient::new(&sample()).unwrap();
        let url = client.request_url(Thresholds::from_percentage(40, 30).unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://detect.example.com/agriweed/1?api_key=secret&confidence=40&overlap=30&format=json");
    }

    #[test]
    fn parses_prediction_payload() {
        let json = r#"{
            "time": 0.12,
            "image": {"width": "640", "height": "480"},
            "predictions": [
                {"x": 10, "y": 10, "width": 4, "height": 4, "confidence": 0.9, "class": "weed", "class_id": 1},
                {"x": 20, "y": 20, "width": 2, "height": 2, "confidence": 0.5, "class": "crop", "class_id": 0}
            ]
        }"#;
        let response: PredictionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predictions.len(), 2);
        assert_eq!(response.predictions[0].class_label, "weed");
        let empty: PredictionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.predictions.is_empty());
    }

    #[actix_web::test]
    async fn unreachable_service_fails_after_bounded_retries() {
        let mut config = sample();
        config.inference_endpoint = "http://127.0.0.1:9".to_string();
        config.request_timeout = 2;
        config.max_retries = 1;
        config.retry_backoff = 1;
        let client = HostedClient::new(&config).unwrap();
        let request_id = Uuid::new_v4();
        let system_log_size = Logger::get_system_logs().await.len();
        let result = client.predict(request_id, b"not an image", Thresholds::from_percentage(40, 30).unwrap()).await;
        assert!(matches!(result, Err(DetectionError::InferenceCallFailure(_))));
        let logs = Logger::get_request_logs(request_id).await.unwrap();
        let failures = logs.iter().filter(|entry| entry.level == LogLevel::Warning).count();
        assert_eq!(failures, 2);
        assert!(logs.iter().all(|entry| entry.request_id == Some(request_id)));
        assert!(Logger::get_system_logs().await.iter().skip(system_log_size).all(|entry| !entry.message.starts_with("Inference")));
    }
}
