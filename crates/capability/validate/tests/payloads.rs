use floorplan_validate::{RangeConfigError, RangeSpec, validate_ranges};

#[test]
fn json_payloads_deserialize_and_validate() {
    let payload = r#"[
        {"start": "01", "end": "05", "step": 1, "label_type": "numbers", "increment_letter": false},
        {"start": "A01", "end": "E01", "step": 1, "label_type": "alphanumeric", "increment_letter": true}
    ]"#;
    let ranges: Vec<RangeSpec> = serde_json::from_str(payload).unwrap();
    assert!(validate_ranges(&ranges, 10).is_ok());
}

#[test]
fn json_payload_with_missing_step_defaults_to_one() {
    let payload = r#"[{"start": "1", "end": "5", "label_type": "numbers"}]"#;
    let ranges: Vec<RangeSpec> = serde_json::from_str(payload).unwrap();
    assert!(validate_ranges(&ranges, 10).is_ok());
}

#[test]
fn json_payload_missing_end_reports_missing_keys() {
    let payload = r#"[{"start": "1", "label_type": "numbers"}]"#;
    let ranges: Vec<RangeSpec> = serde_json::from_str(payload).unwrap();
    assert_eq!(
        validate_ranges(&ranges, 10).unwrap_err(),
        vec![RangeConfigError::MissingKeys]
    );
}
