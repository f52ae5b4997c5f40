use super::*;
use crate::{
    Bounds3D, Interval, IntervalSet, IntervalSetMapping, Metadata, NamedIntervalSet, SpatialType,
    VData, VideoBlockFormat,
};

fn test_video() -> VideoMetadata {
    VideoMetadata::new(0, "http://localhost:8000/test.mp4", 59.94, 20696, 1920, 1080)
}

fn bbox_text_block() -> IntervalBlock {
    let payload =
        VData::new(SpatialType::bbox()).with_metadata("text", Metadata::bbox_text("my text"));
    let set = IntervalSet::new(vec![Interval::new(Bounds3D::new(0.0, 10.0), payload)]);
    IntervalBlock::new(0, vec![NamedIntervalSet::new("test", &set).unwrap()])
}

#[test]
fn builder_requires_exactly_one_source() {
    let err = VGridSpec::builder(vec![test_video()]).build().unwrap_err();
    assert!(matches!(err, VGridError::Configuration(_)));

    let err = VGridSpec::builder(vec![test_video()])
        .interval_blocks(vec![bbox_text_block()])
        .vis_format(VideoBlockFormat::from_videos(vec![test_video()]))
        .build()
        .unwrap_err();
    assert!(matches!(err, VGridError::Configuration(_)));
}

#[test]
fn builder_rejects_invalid_settings() {
    let settings = VGridSettings {
        blocks_per_page: 0,
        ..VGridSettings::default()
    };
    let err = VGridSpec::builder(vec![test_video()])
        .interval_blocks(Vec::new())
        .settings(settings)
        .build()
        .unwrap_err();
    assert!(matches!(err, VGridError::Validation(_)));
}

#[test]
fn direct_construction_validates_settings() {
    let settings = VGridSettings {
        blocks_per_page: 0,
        ..VGridSettings::default()
    };
    let err = VGridSpec::new(
        vec![test_video()],
        BlockSource::Explicit(vec![bbox_text_block()]),
        settings,
    )
    .unwrap_err();
    assert!(matches!(err, VGridError::Validation(_)), "{err}");
}

#[test]
fn explicit_blocks_encode_to_widget_document() {
    let spec = VGridSpec::builder(vec![test_video()])
        .interval_blocks(vec![bbox_text_block()])
        .build()
        .unwrap();
    let v = spec.to_json().unwrap();

    assert_eq!(
        v["interval_blocks"][0],
        serde_json::json!({
            "video_id": 0,
            "interval_sets": [{
                "name": "test",
                "interval_set": [{
                    "bounds": {
                        "t1": 0.0, "t2": 10.0,
                        "bbox": {"x1": 0.0, "x2": 1.0, "y1": 0.0, "y2": 1.0}
                    },
                    "payload": {
                        "spatial_type": {"type": "SpatialType_Bbox"},
                        "metadata": {
                            "text": {"type": "Metadata_Bbox", "args": {"text": "my text"}}
                        }
                    }
                }]
            }]
        })
    );
    assert_eq!(v["database"]["videos"][0]["num_frames"], 20696);
    assert_eq!(v["database"]["videos"][0]["fps"], 59.94);
    assert_eq!(v["settings"]["blocks_per_page"], 50);
    assert_eq!(v["settings"]["key_mode"], "Jupyter");
}

#[test]
fn vis_format_runs_at_encode_time() {
    let mut imap = IntervalSetMapping::<serde_json::Value>::default();
    imap.insert(
        0,
        IntervalSet::new(vec![
            Interval::new(Bounds3D::new(0.0, 1.0), serde_json::Value::Null),
            Interval::new(Bounds3D::new(2.0, 3.0), serde_json::Value::Null),
        ]),
    );
    let spec = VGridSpec::new(
        vec![test_video()],
        BlockSource::format(VideoBlockFormat::new(vec![("faces".to_string(), imap)])),
        VGridSettings::default(),
    )
    .unwrap();
    let encoded = spec.encode().unwrap();
    assert_eq!(encoded.interval_blocks.len(), 1);
    assert_eq!(encoded.interval_blocks[0].num_intervals(), 2);
    assert_eq!(encoded.database.videos, vec![test_video()]);
}

#[test]
fn compressed_round_trip_matches_plain_encoding() {
    let spec = VGridSpec::builder(vec![test_video()])
        .interval_blocks(vec![bbox_text_block()])
        .build()
        .unwrap();
    let env = spec.encode_compressed().unwrap();
    assert!(env.compressed);
    assert_eq!(
        crate::decode_compressed(&env).unwrap(),
        spec.to_json().unwrap()
    );
}

#[test]
fn encoded_spec_parses_back() {
    let spec = VGridSpec::builder(vec![test_video()])
        .interval_blocks(vec![bbox_text_block()])
        .build()
        .unwrap();
    let encoded = spec.encode().unwrap();
    let text = encoded.to_json_string().unwrap();
    let back: EncodedSpec = serde_json::from_str(&text).unwrap();
    assert_eq!(back, encoded);
}
