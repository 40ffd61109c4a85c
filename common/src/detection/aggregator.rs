use std::collections::HashMap;
use serde::Serialize;
use crate::detection::raw_detection::RawDetection;

/// Mean, min and max in the unit the confidences arrived in. All zero for an empty batch.
#[derive(Serialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct ConfidenceStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_detections: usize,
    pub class_distribution: HashMap<String, usize>,
    pub confidence_stats: ConfidenceStats,
}

pub struct Aggregator;

impl Aggregator {
    /// Counts every record it is given, malformed geometry included.
    pub fn aggregate(detections: &[RawDetection]) -> Statistics {
        let mut class_distribution = HashMap::new();
        for detection in detections {
            *class_distribution.entry(detection.class_label.clone()).or_insert(0_usize) += 1;
        }
        Statistics {
            total_detections: detections.len(),
            class_distribution,
            confidence_stats: Self::confidence_stats(detections),
        }
    }

    fn confidence_stats(detections: &[RawDetection]) -> ConfidenceStats {
        if detections.is_empty() {
            return ConfidenceStats::default();
        }
        let (sum, min, max) = detections.iter()
            .map(|detection| detection.confidence)
            .fold((0_f64, f64::INFINITY, f64::NEG_INFINITY), |(sum, min, max), confidence| {
                (sum + confidence, min.min(confidence), max.max(confidence))
            });
        ConfidenceStats {
            mean: sum / detections.len() as f64,
            min,
            max,
        }
    }
}
