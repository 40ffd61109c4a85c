pub mod annotator;
pub mod detection_report;
pub mod detector;
