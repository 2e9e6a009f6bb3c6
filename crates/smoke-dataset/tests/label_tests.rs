use smoke_dataset::{
    AdminLabelPolicy, DatasetError, LabelPolicy, Metadata, NEGATIVE_CODES, POSITIVE_CODES,
    SmokeLabel, VideoRecord,
};

#[test]
fn test_positive_codes() {
    for code in POSITIVE_CODES {
        assert_eq!(AdminLabelPolicy::classify_code(code), SmokeLabel::Positive);
    }
    assert_eq!(SmokeLabel::Positive.probabilities(), [0.0, 1.0]);
}

#[test]
fn test_negative_codes() {
    for code in NEGATIVE_CODES {
        assert_eq!(AdminLabelPolicy::classify_code(code), SmokeLabel::Negative);
    }
    assert_eq!(SmokeLabel::Negative.probabilities(), [1.0, 0.0]);
}

#[test]
fn test_other_codes_are_unknown() {
    for code in [-1, 0, 5, 13, 24, 48, 1000] {
        assert_eq!(AdminLabelPolicy::classify_code(code), SmokeLabel::Unknown);
    }
    assert_eq!(SmokeLabel::Unknown.probabilities(), [0.0, 0.0]);
    assert!(!SmokeLabel::Unknown.is_known());
    assert!(SmokeLabel::Positive.is_known());
}

#[test]
fn test_policy_reads_admin_code_only() {
    let mut record = VideoRecord::new("clip", 47);
    record.label_state = Some(32);
    assert_eq!(AdminLabelPolicy.classify(&record), SmokeLabel::Positive);
}

#[test]
fn test_metadata_from_json() {
    let json = r#"[
        {"file_name": "a", "label_state_admin": 47, "id": 3, "camera_id": 0},
        {"file_name": "b", "label_state_admin": 32, "label_state": -1},
        {"file_name": "c", "label_state_admin": -1}
    ]"#;
    let metadata = Metadata::from_json(json).unwrap();
    assert_eq!(metadata.len(), 3);
    assert!(!metadata.is_empty());

    let a = metadata.get(0).unwrap();
    assert_eq!(a.file_name, "a");
    assert_eq!(a.id, Some(3));
    assert_eq!(a.label_state, None);
    assert_eq!(metadata.get(1).unwrap().label_state, Some(-1));
    assert!(metadata.get(3).is_none());

    let names: Vec<_> = metadata.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn test_metadata_rejects_missing_fields() {
    let result = Metadata::from_json(r#"[{"file_name": "a"}]"#);
    assert!(matches!(result, Err(DatasetError::Metadata(_))));

    let result = Metadata::from_json(r#"{"file_name": "a", "label_state_admin": 47}"#);
    assert!(matches!(result, Err(DatasetError::Metadata(_))));
}

#[test]
fn test_metadata_load() {
    let dir = std::env::temp_dir().join(format!("smoke-metadata-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("metadata.json");
    std::fs::write(&path, r#"[{"file_name": "a", "label_state_admin": 23}]"#).unwrap();

    let metadata = Metadata::load(&path).unwrap();
    assert_eq!(metadata.records(), &[VideoRecord::new("a", 23)]);

    let missing = Metadata::load(dir.join("missing.json"));
    assert!(matches!(missing, Err(DatasetError::Io(_))));

    std::fs::remove_dir_all(&dir).ok();
}
