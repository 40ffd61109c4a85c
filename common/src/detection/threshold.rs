use serde::Serialize;
use crate::detection::error::DetectionError;

/// Inference-time filters, both fractions in `[0, 1]`.
///
/// Only the validating constructors build one.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Thresholds {
    confidence: f64,
    overlap: f64,
}

impl Thresholds {
    pub fn new(confidence: f64, overlap: f64) -> Result<Self, DetectionError> {
        Ok(Self {
            confidence: Self::validate_fraction("confidence", confidence)?,
            overlap: Self::validate_fraction("overlap", overlap)?,
        })
    }

    /// Slider values are whole percentages; the inference contract wants fractions.
    pub fn from_percentage(confidence: u8, overlap: u8) -> Result<Self, DetectionError> {
        Self::new(f64::from(confidence) / 100.0, f64::from(overlap) / 100.0)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    pub fn confidence_percentage(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }

    pub fn overlap_percentage(&self) -> u8 {
        (self.overlap * 100.0).round() as u8
    }

    fn validate_fraction(name: &'static str, value: f64) -> Result<f64, DetectionError> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(DetectionError::InvalidThreshold { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_slider_values_by_one_hundred() {
        let thresholds = Thresholds::from_percentage(40, 30).unwrap();
        assert!((thresholds.confidence() - 0.4).abs() < 1e-12);
        assert!((thresholds.overlap() - 0.3).abs() < 1e-12);
        assert_eq!(thresholds.confidence_percentage(), 40);
        assert_eq!(thresholds.overlap_percentage(), 30);
    }

    #[test]
    fn rejects_values_outside_unit_interval() {
        assert!(matches!(Thresholds::new(1.5, 0.3), Err(DetectionError::InvalidThreshold { name: "confidence", .. })));
        assert!(matches!(Thresholds::new(0.5, -0.1), Err(DetectionError::InvalidThreshold { name: "overlap", .. })));
        assert!(matches!(Thresholds::from_percentage(40, 101), Err(DetectionError::InvalidThreshold { name: "overlap", .. })));
        assert!(Thresholds::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn accepts_interval_bounds() {
        let thresholds = Thresholds::new(0.0, 1.0).unwrap();
        assert_eq!(thresholds.confidence(), 0.0);
        assert_eq!(thresholds.overlap(), 1.0);
        assert_eq!(thresholds.overlap_percentage(), 100);
    }
}
