//! Round-trip tests for the VoTT document transforms

use labelsync_core::{Error, build_vott_document, process_vott_document};
use labelsync_test_utils::ImageLabelBuilder;

fn classifications() -> Vec<String> {
    vec!["cat".to_string(), "dog".to_string()]
}

#[test]
fn test_build_document_one_frame_per_image() {
    let labels = vec![
        ImageLabelBuilder::new(1).build(),
        ImageLabelBuilder::new(2)
            .with_box(&["cat"], 10.0, 50.0, 20.0, 60.0)
            .build(),
    ];

    let (document, urls) = build_vott_document(&labels, &classifications()).unwrap();

    assert_eq!(document.frames.len(), 2);
    assert_eq!(urls.len(), 2);
    assert_eq!(document.input_tags, "cat,dog");
    assert!(document.frames["1.png"].is_empty());
    assert_eq!(document.frames["2.png"].len(), 1);

    let region = &document.frames["2.png"][0];
    assert_eq!(region.x1, 10.0);
    assert_eq!(region.x2, 50.0);
    assert_eq!(region.region_type, "Rectangle");
    assert_eq!(region.tags, vec!["cat"]);
}

#[test]
fn test_prelabeled_images_start_visited() {
    let labels = vec![
        ImageLabelBuilder::new(1).build(),
        ImageLabelBuilder::new(2)
            .with_box(&["dog"], 0.0, 1.0, 0.0, 1.0)
            .build(),
    ];

    let (document, _) = build_vott_document(&labels, &classifications()).unwrap();

    assert_eq!(document.visited_frames, vec!["2.png"]);
}

#[test]
fn test_build_document_rejects_bad_url() {
    let labels = vec![ImageLabelBuilder::new(1).with_location("not a url").build()];

    let result = build_vott_document(&labels, &classifications());
    assert!(matches!(result, Err(Error::InvalidImageUrl(_))));
}

#[test]
fn test_process_submits_only_visited_frames() {
    let labels = vec![
        ImageLabelBuilder::new(1).build(),
        ImageLabelBuilder::new(2)
            .with_box(&["cat"], 10.0, 50.0, 20.0, 60.0)
            .build(),
    ];
    let (mut document, _) = build_vott_document(&labels, &classifications()).unwrap();

    // Tagger reviewed frame 1 as well and found nothing
    document.visited_frames.push("1.png".to_string());

    let submission = process_vott_document(&document).unwrap();

    assert_eq!(submission.image_labels.len(), 2);
    assert_eq!(submission.image_labels[0].image_id, 1);
    assert!(submission.image_labels[0].labels.is_empty());
    assert_eq!(submission.image_labels[1].image_id, 2);
    assert_eq!(submission.image_labels[1].labels[0].x_min, 10.0);
    assert_eq!(submission.image_labels[1].labels[0].y_max, 60.0);
}

#[test]
fn test_unvisited_frames_are_never_submitted() {
    let labels = vec![ImageLabelBuilder::new(9).build()];
    let (document, _) = build_vott_document(&labels, &classifications()).unwrap();

    let submission = process_vott_document(&document).unwrap();
    assert!(submission.image_labels.is_empty());
}

#[test]
fn test_round_trip_preserves_boxes_names_and_dimensions() {
    let labels = vec![
        ImageLabelBuilder::new(3)
            .with_size(1280, 720)
            .with_box(&["cat"], 1.5, 2.5, 3.5, 4.5)
            .with_box(&["cat", "dog"], 5.0, 6.0, 7.0, 8.0)
            .build(),
    ];
    let (document, _) = build_vott_document(&labels, &classifications()).unwrap();

    let region = &document.frames["3.png"][0];
    assert_eq!((region.width, region.height), (1280, 720));

    let submission = process_vott_document(&document).unwrap();

    let submitted = &submission.image_labels[0];
    assert_eq!(submitted.image_id, 3);
    assert_eq!(submitted.labels, labels[0].labels);
    assert_eq!(submitted.image_width, 1280);
    assert_eq!(submitted.image_height, 720);
}

#[test]
fn test_document_serializes_with_vott_field_names() {
    let labels = vec![
        ImageLabelBuilder::new(1)
            .with_box(&["cat"], 0.0, 1.0, 0.0, 1.0)
            .build(),
    ];
    let (document, _) = build_vott_document(&labels, &classifications()).unwrap();

    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json["inputTags"], "cat,dog");
    assert_eq!(json["visitedFrames"][0], "1.png");
    assert_eq!(json["frames"]["1.png"][0]["type"], "Rectangle");
}
