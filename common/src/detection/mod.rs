pub mod aggregator;
pub mod bounding_box;
pub mod class_table;
pub mod detection_batch;
pub mod error;
pub mod normalizer;
pub mod raw_detection;
pub mod threshold;
