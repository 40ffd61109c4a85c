use common::detection::bounding_box::BoundingBox;
use common::detection::class_table::ClassTable;
use common::detection::error::MalformedReason;
use common::detection::normalizer::Normalizer;
use common::detection::raw_detection::RawDetection;

fn sample() -> Vec<RawDetection> {
    vec![
        RawDetection::new(10.0, 10.0, 4.0, 4.0, 0.9, "weed"),
        RawDetection::new(20.0, 20.0, 2.0, 2.0, 0.5, "crop"),
    ]
}

#[test]
fn produces_corner_boxes_in_input_order() {
    let outcome = Normalizer::default().normalize(&sample());
    assert_eq!(outcome.batch.boxes, vec![
        BoundingBox { x_min: 8.0, y_min: 8.0, x_max: 12.0, y_max: 12.0 },
        BoundingBox { x_min: 19.0, y_min: 19.0, x_max: 21.0, y_max: 21.0 },
    ]);
    assert_eq!(outcome.batch.confidences, vec![0.9, 0.5]);
    assert_eq!(outcome.batch.labels, vec!["weed", "crop"]);
    assert_eq!(outcome.batch.class_ids, vec![0, 1]);
    assert_eq!(outcome.skipped_count(), 0);
}

#[test]
fn seeded_table_fixes_identifiers() {
    let mut normalizer = Normalizer::new(ClassTable::with_labels(["crop", "weed"]));
    let outcome = normalizer.normalize(&sample());
    assert_eq!(outcome.batch.class_ids, vec![1, 0]);
}

#[test]
fn empty_input_yields_empty_batch() {
    let outcome = Normalizer::default().normalize(&[]);
    assert!(outcome.batch.is_empty());
    assert!(outcome.batch.confidences.is_empty());
    assert!(outcome.batch.class_ids.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn skips_malformed_records_and_reports_them() {
    let detections = vec![
        RawDetection::new(10.0, 10.0, 4.0, 4.0, 0.9, "weed"),
        RawDetection::new(15.0, 15.0, 0.0, 4.0, 0.8, "weed"),
        RawDetection::new(20.0, 20.0, 2.0, 2.0, 0.5, "crop"),
        RawDetection::new(25.0, 25.0, 2.0, -1.0, 0.4, "thistle"),
    ];
    let mut normalizer = Normalizer::default();
    let outcome = normalizer.normalize(&detections);
    assert_eq!(outcome.batch.len(), detections.len() - outcome.skipped_count());
    assert_eq!(outcome.batch.confidences, vec![0.9, 0.5]);
    assert_eq!(outcome.skipped.iter().map(|skipped| skipped.index).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(outcome.skipped[0].reason, MalformedReason::NonPositiveWidth(0.0));
    assert_eq!(outcome.skipped[1].reason, MalformedReason::NonPositiveHeight(-1.0));
    assert_eq!(normalizer.class_table().get("thistle"), None);
}

#[test]
fn many_labels_keep_distinct_identifiers() {
    let detections = (0..40)
        .map(|i| RawDetection::new(5.0, 5.0, 1.0, 1.0, 0.5, format!("species-{i}")))
        .collect::<Vec<_>>();
    let outcome = Normalizer::default().normalize(&detections);
    assert_eq!(outcome.batch.class_ids, (0..40).collect::<Vec<_>>());
}

#[test]
fn view_iterates_parallel_sequences() {
    let outcome = Normalizer::default().normalize(&sample());
    let views = outcome.batch.iter().map(|view| (view.label.to_string(), view.class_id, view.confidence)).collect::<Vec<_>>();
    assert_eq!(views, vec![("weed".to_string(), 0, 0.9), ("crop".to_string(), 1, 0.5)]);
}
