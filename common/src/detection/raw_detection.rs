use serde::{Deserialize, Serialize};
use crate::detection::error::MalformedReason;

/// One object reported by the inference service, in center/extent form.
///
/// Field names on the wire follow the hosted API (`x`, `y`, `class`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawDetection {
    #[serde(rename = "x")]
    pub center_x: f64,
    #[serde(rename = "y")]
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
    #[serde(rename = "class")]
    pub class_label: String,
}

impl RawDetection {
    pub fn new<T: Into<String>>(center_x: f64, center_y: f64, width: f64, height: f64, confidence: f64, class_label: T) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
            confidence,
            class_label: class_label.into(),
        }
    }

    /// Out-of-image centers pass; only degenerate extents are rejected.
    pub fn validate(&self) -> Result<(), MalformedReason> {
        let geometry = [self.center_x, self.center_y, self.width, self.height];
        if !geometry.iter().all(|value| value.is_finite()) {
            return Err(MalformedReason::NonFiniteGeometry);
        }
        if self.width <= 0.0 {
            return Err(MalformedReason::NonPositiveWidth(self.width));
        }
        if self.height <= 0.0 {
            return Err(MalformedReason::NonPositiveHeight(self.height));
        }
        Ok(())
    }
}
