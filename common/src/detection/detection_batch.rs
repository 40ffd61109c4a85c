use serde::Serialize;
use crate::detection::bounding_box::BoundingBox;

/// Drawable geometry for one image. All sequences share length and input order.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DetectionBatch {
    pub boxes: Vec<BoundingBox>,
    pub confidences: Vec<f64>,
    pub class_ids: Vec<usize>,
    pub labels: Vec<String>,
}

pub struct DetectionView<'a> {
    pub bounding_box: &'a BoundingBox,
    pub confidence: f64,
    pub class_id: usize,
    pub label: &'a str,
}

impl DetectionBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
            confidences: Vec::with_capacity(capacity),
            class_ids: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bounding_box: BoundingBox, confidence: f64, class_id: usize, label: String) {
        self.boxes.push(bounding_box);
        self.confidences.push(confidence);
        self.class_ids.push(class_id);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DetectionView<'_>> {
        self.boxes.iter()
            .zip(&self.confidences)
            .zip(&self.class_ids)
            .zip(&self.labels)
            .map(|(((bounding_box, confidence), class_id), label)| DetectionView {
                bounding_box,
                confidence: *confidence,
                class_id: *class_id,
                label,
            })
    }
}
