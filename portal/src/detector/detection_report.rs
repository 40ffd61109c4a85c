use serde::Serialize;
use uuid::Uuid;
use common::detection::aggregator::Statistics;
use common::detection::detection_batch::DetectionBatch;
use common::detection::error::MalformedDetection;

/// Everything the front end needs to render one processed upload.
#[derive(Serialize, Debug, Clone)]
pub struct DetectionReport {
    pub request_id: Uuid,
    pub annotated_geometry: DetectionBatch,
    pub statistics: Statistics,
    pub skipped_records: Vec<MalformedDetection>,
    /// Base64 PNG.
    pub annotated_image: String,
    pub display: StatisticsDisplay,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// Display strings for [`Statistics`]. Confidences become percentages here and nowhere else.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatisticsDisplay {
    pub total_detections: usize,
    pub class_distribution: Vec<ClassCount>,
    pub mean: String,
    pub min: String,
    pub max: String,
}

impl StatisticsDisplay {
    pub fn from_statistics(statistics: &Statistics) -> Self {
        let mut class_distribution = statistics.class_distribution.iter()
            .map(|(label, count)| ClassCount { label: label.clone(), count: *count })
            .collect::<Vec<_>>();
        class_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        let confidence = &statistics.confidence_stats;
        Self {
            total_detections: statistics.total_detections,
            class_distribution,
            mean: Self::percentage(confidence.mean),
            min: Self::percentage(confidence.min),
            max: Self::percentage(confidence.max),
        }
    }

    fn percentage(fraction: f64) -> String {
        format!("{:.2}%", fraction * 100.0)
    }
}
