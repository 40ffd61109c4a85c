use std::sync::Arc;
use ab_glyph::FontArc;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use tokio::task::spawn_blocking;
use uuid::Uuid;
use common::detection::aggregator::Aggregator;
use common::detection::class_table::ClassTable;
use common::detection::detection_batch::DetectionBatch;
use common::detection::error::DetectionError;
use common::detection::normalizer::Normalizer;
use common::detection::threshold::Thresholds;
use crate::detector::annotator::Annotator;
use crate::detector::detection_report::{DetectionReport, StatisticsDisplay};
use crate::inference::inference_client::InferenceClient;
use crate::utils::config::Config;
use crate::utils::logging::*;

/// Runs one upload through decode, inference, normalization, aggregation and annotation.
///
/// Either the whole report is produced or the request fails; the only partial
/// outcome is a report with malformed records skipped.
pub struct Detector {
    client: Arc<dyn InferenceClient>,
    font: Option<FontArc>,
}

impl Detector {
    pub fn new(client: Arc<dyn InferenceClient>, font: Option<FontArc>) -> Self {
        Self {
            client,
            font,
        }
    }

    pub async fn process_image(&self, request_id: Uuid, image_bytes: Vec<u8>, thresholds: Thresholds, config: &Config) -> Result<DetectionReport, DetectionError> {
        let image_bytes = Arc::new(image_bytes);
        let image = Self::decode(image_bytes.clone()).await?;
        let detections = self.client.predict(request_id, &image_bytes, thresholds).await?;
        let mut normalizer = Normalizer::new(ClassTable::with_labels(&config.known_classes));
        let outcome = normalizer.normalize(&detections);
        if !outcome.skipped.is_empty() {
            let details = outcome.skipped.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n");
            logging_warning!(request_id, WebEntry::MalformedSkipped(outcome.skipped_count()), details);
        }
        let statistics = Aggregator::aggregate(&detections);
        let annotator = Annotator::new(config, self.font.clone());
        let png = Self::annotate(annotator, image, outcome.batch.clone()).await?;
        let display = StatisticsDisplay::from_statistics(&statistics);
        Ok(DetectionReport {
            request_id,
            annotated_geometry: outcome.batch,
            statistics,
            skipped_records: outcome.skipped,
            annotated_image: STANDARD.encode(png),
            display,
        })
    }

    async fn decode(image_bytes: Arc<Vec<u8>>) -> Result<DynamicImage, DetectionError> {
        spawn_blocking(move || {
            image::load_from_memory(&image_bytes)
                .map_err(|err| DetectionError::ImageDecodeFailure(err.to_string()))
        }).await
            .map_err(|err| DetectionError::ImageDecodeFailure(err.to_string()))?
    }

    async fn annotate(annotator: Annotator, image: DynamicImage, batch: DetectionBatch) -> Result<Vec<u8>, DetectionError> {
        spawn_blocking(move || {
            let annotated = annotator.annotate(&image, &batch);
            Annotator::encode_png(&annotated).map_err(DetectionError::AnnotationFailure)
        }).await
            .map_err(|err| DetectionError::AnnotationFailure(err.to_string()))?
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::Mutex;
    use common::detection::bounding_box::BoundingBox;
    use common::detection::raw_detection::RawDetection;
    use crate::utils::config::tests::sample;

    pub(crate) enum StubResponse {
        Detections(Vec<RawDetection>),
        Failure(String),
    }

    pub(crate) struct StubClient {
        response: StubResponse,
        pub(crate) seen_thresholds: Mutex<Vec<Thresholds>>,
    }

    impl StubClient {
        pub(crate) fn new(response: StubResponse) -> Self {
            Self {
                response,
                seen_thresholds: Mutex::new(Vec::new()),
            }
        }
    }

    impl InferenceClient for StubClient {
        fn predict<'a>(&'a self, _request_id: Uuid, _image: &'a [u8], thresholds: Thresholds) -> BoxFuture<'a, Result<Vec<RawDetection>, DetectionError>> {
            self.seen_thresholds.lock().unwrap().push(thresholds);
            let result = match &self.response {
                StubResponse::Detections(detections) => Ok(detections.clone()),
                StubResponse::Failure(message) => Err(DetectionError::InferenceCallFailure(message.clone())),
            };
            async move { result }.boxed()
        }
    }

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    pub(crate) fn field_detections() -> Vec<RawDetection> {
        vec![
            RawDetection::new(10.0, 10.0, 4.0, 4.0, 0.9, "weed"),
            RawDetection::new(20.0, 20.0, 2.0, 2.0, 0.5, "crop"),
        ]
    }

    fn thresholds() -> Thresholds {
        Thresholds::from_percentage(40, 30).unwrap()
    }

    #[actix_web::test]
    async fn produces_geometry_statistics_and_image() {
        let detector = Detector::new(Arc::new(StubClient::new(StubResponse::Detections(field_detections()))), None);
        let report = detector.process_image(Uuid::new_v4(), png_bytes(32, 32), thresholds(), &sample()).await.unwrap();
        assert_eq!(report.annotated_geometry.boxes, vec![
            BoundingBox { x_min: 8.0, y_min: 8.0, x_max: 12.0, y_max: 12.0 },
            BoundingBox { x_min: 19.0, y_min: 19.0, x_max: 21.0, y_max: 21.0 },
        ]);
        // Seeded from known_classes = ["crop", "weed"].
        assert_eq!(report.annotated_geometry.class_ids, vec![1, 0]);
        assert_eq!(report.statistics.total_detections, 2);
        assert!((report.statistics.confidence_stats.mean - 0.7).abs() < 1e-12);
        assert_eq!(report.display.max, "90.00%");
        let png = STANDARD.decode(&report.annotated_image).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().to_rgb8().dimensions(), (32, 32));
    }

    #[actix_web::test]
    async fn zero_detections_is_a_normal_outcome() {
        let detector = Detector::new(Arc::new(StubClient::new(StubResponse::Detections(Vec::new()))), None);
        let report = detector.process_image(Uuid::new_v4(), png_bytes(8, 8), thresholds(), &sample()).await.unwrap();
        assert!(report.annotated_geometry.is_empty());
        assert_eq!(report.statistics.total_detections, 0);
        assert_eq!(report.display.mean, "0.00%");
    }

    #[actix_web::test]
    async fn reports_skipped_records() {
        let mut detections = field_detections();
        detections.push(RawDetection::new(5.0, 5.0, 0.0, 3.0, 0.6, "weed"));
        let detector = Detector::new(Arc::new(StubClient::new(StubResponse::Detections(detections))), None);
        let request_id = Uuid::new_v4();
        let report = detector.process_image(request_id, png_bytes(32, 32), thresholds(), &sample()).await.unwrap();
        assert_eq!(report.annotated_geometry.len(), 2);
        assert_eq!(report.skipped_records.len(), 1);
        assert_eq!(report.skipped_records[0].index, 2);
        assert_eq!(report.statistics.total_detections, 3);
        let logs = Logger::get_request_logs(request_id).await.unwrap();
        assert_eq!(logs[0].level, LogLevel::Warning);
    }

    #[actix_web::test]
    async fn undecodable_upload_never_reaches_inference() {
        let client = Arc::new(StubClient::new(StubResponse::Detections(field_detections())));
        let detector = Detector::new(client.clone(), None);
        let result = detector.process_image(Uuid::new_v4(), b"definitely not an image".to_vec(), thresholds(), &sample()).await;
        assert!(matches!(result, Err(DetectionError::ImageDecodeFailure(_))));
        assert!(client.seen_thresholds.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn inference_failure_fails_the_request() {
        let detector = Detector::new(Arc::new(StubClient::new(StubResponse::Failure("503 Service Unavailable".to_string()))), None);
        let result = detector.process_image(Uuid::new_v4(), png_bytes(8, 8), thresholds(), &sample()).await;
        match result {
            Err(DetectionError::InferenceCallFailure(message)) => assert_eq!(message, "503 Service Unavailable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn annotates_boxes_far_outside_the_upload() {
        let detections = vec![
            RawDetection::new(-1e12, 4.0, 4.0, 4.0, 0.8, "weed"),
            RawDetection::new(4.0, 4.0, 1e12, 1e12, 0.6, "crop"),
        ];
        let detector = Detector::new(Arc::new(StubClient::new(StubResponse::Detections(detections))), None);
        let report = detector.process_image(Uuid::new_v4(), png_bytes(8, 8), thresholds(), &sample()).await.unwrap();
        assert!(report.skipped_records.is_empty());
        assert_eq!(report.annotated_geometry.len(), 2);
        let png = STANDARD.decode(&report.annotated_image).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().to_rgb8().dimensions(), (8, 8));
    }
}
