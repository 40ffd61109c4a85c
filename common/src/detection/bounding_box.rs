use serde::{Deserialize, Serialize};
use crate::detection::raw_detection::RawDetection;

/// Axis-aligned rectangle in min/max corner form, image-pixel units.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn from_center(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self {
            x_min: center_x - half_width,
            y_min: center_y - half_height,
            x_max: center_x + half_width,
            y_max: center_y + half_height,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }
}

impl From<&RawDetection> for BoundingBox {
    fn from(detection: &RawDetection) -> Self {
        Self::from_center(detection.center_x, detection.center_y, detection.width, detection.height)
    }
}
