use serde::Serialize;
use crate::detection::bounding_box::BoundingBox;
use crate::detection::class_table::ClassTable;
use crate::detection::detection_batch::DetectionBatch;
use crate::detection::error::MalformedDetection;
use crate::detection::raw_detection::RawDetection;

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct NormalizeOutcome {
    pub batch: DetectionBatch,
    pub skipped: Vec<MalformedDetection>,
}

impl NormalizeOutcome {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Turns raw detections into drawable geometry.
///
/// Malformed records are skipped, never fatal; each one is reported back in
/// [`NormalizeOutcome::skipped`]. Confidence values are copied verbatim.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    class_table: ClassTable,
}

impl Normalizer {
    pub fn new(class_table: ClassTable) -> Self {
        Self {
            class_table,
        }
    }

    pub fn normalize(&mut self, detections: &[RawDetection]) -> NormalizeOutcome {
        let mut batch = DetectionBatch::with_capacity(detections.len());
        let mut skipped = Vec::new();
        for (index, detection) in detections.iter().enumerate() {
            if let Err(reason) = detection.validate() {
                skipped.push(MalformedDetection {
                    index,
                    class_label: detection.class_label.clone(),
                    reason,
                });
                continue;
            }
            let class_id = self.class_table.identify(&detection.class_label);
            batch.push(BoundingBox::from(detection), detection.confidence, class_id, detection.class_label.clone());
        }
        NormalizeOutcome {
            batch,
            skipped,
        }
    }

    pub fn class_table(&self) -> &ClassTable {
        &self.class_table
    }
}
