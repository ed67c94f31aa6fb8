use plate_client::domain::{
    detection::entity::{BoundingBox, DetectionResult},
    history::entity::HistoryEntry,
};

#[test]
fn result_with_every_field_survives_a_round_trip() {
    let original = DetectionResult {
        succeeded: true,
        plate_text: Some("PQR456".to_string()),
        confidence: Some(0.42),
        bounding_box: Some(BoundingBox {
            x: 0,
            y: 5,
            width: 320,
            height: 90,
        }),
        detail_message: Some("low light".to_string()),
    };

    let encoded = serde_json::to_vec(&original).expect("serialize");
    let decoded = DetectionResult::from_slice(&encoded).expect("decode");
    assert_eq!(decoded, original);
}

#[test]
fn result_with_no_optional_fields_survives_a_round_trip() {
    let original = DetectionResult {
        succeeded: false,
        plate_text: None,
        confidence: None,
        bounding_box: None,
        detail_message: None,
    };

    let encoded = serde_json::to_vec(&original).expect("serialize");
    let decoded = DetectionResult::from_slice(&encoded).expect("decode");
    assert_eq!(decoded, original);
}

#[test]
fn success_without_optional_fields_still_decodes() {
    let decoded = DetectionResult::from_slice(br#"{"success":true}"#).expect("decode");
    assert!(decoded.succeeded);
    assert_eq!(decoded.plate(), None);
}

#[test]
fn history_entry_serializes_for_display() {
    let entry = HistoryEntry::new("ABC123", 0.91);
    let value = serde_json::to_value(&entry).expect("serialize");
    assert_eq!(value["text"], "ABC123");
    assert_eq!(value["confidence"], 0.91);
    assert!(value["captured_at"].is_string());
    assert!(value["id"].is_string());
}
