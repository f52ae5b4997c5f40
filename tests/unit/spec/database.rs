use super::*;

#[test]
fn duration_is_frames_over_fps() {
    let v = VideoMetadata::new(0, "test.mp4", 59.94, 20696, 1920, 1080);
    assert!((v.duration() - 20696.0 / 59.94).abs() < 1e-9);
}

#[test]
fn json_field_names() {
    let v = VideoMetadata::new(3, "http://localhost:8000/test.mp4", 30.0, 90, 640, 480);
    let j = serde_json::to_value(&v).unwrap();
    assert_eq!(
        j,
        serde_json::json!({
            "id": 3,
            "path": "http://localhost:8000/test.mp4",
            "num_frames": 90,
            "fps": 30.0,
            "width": 640,
            "height": 480
        })
    );
}

#[test]
fn ratio_parsing() {
    assert_eq!(parse_ff_ratio("30000/1001"), Some((30000, 1001)));
    assert_eq!(parse_ff_ratio("25/1"), Some((25, 1)));
    assert_eq!(parse_ff_ratio("0/0"), None);
    assert_eq!(parse_ff_ratio("abc"), None);
}

#[test]
fn probe_missing_file_is_reported() {
    let err = VideoMetadata::probe(std::path::Path::new("does/not/exist.mp4"), 0).unwrap_err();
    assert!(matches!(err, VGridError::Probe(_)));
    assert!(err.to_string().contains("does/not/exist.mp4"));
}
