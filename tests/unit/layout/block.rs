use super::*;
use crate::{Bounds3D, Metadata, SpatialType, VGridError};
use serde_json::json;

#[test]
fn named_set_normalizes_payloads() {
    let set = IntervalSet::new(vec![
        Interval::new(Bounds3D::new(0.0, 10.0), json!(null)),
        Interval::new(
            Bounds3D::new(10.0, 20.0),
            json!({"spatial_type": {"type": "SpatialType_Caption", "args": {"text": "hi"}}}),
        ),
    ]);
    let named = NamedIntervalSet::new("captions", &set).unwrap();
    let payloads: Vec<&SpatialType> = named
        .interval_set
        .iter()
        .map(|i| &i.payload.spatial_type)
        .collect();
    assert_eq!(
        payloads,
        vec![&SpatialType::bbox(), &SpatialType::caption("hi")]
    );
}

#[test]
fn errors_name_the_set_and_interval() {
    let set = IntervalSet::new(vec![
        Interval::new(Bounds3D::new(0.0, 1.0), json!({})),
        Interval::new(Bounds3D::new(1.0, 2.0), json!({"metadata": {"k": 3}})),
    ]);
    let err = NamedIntervalSet::new("faces", &set).unwrap_err();
    assert!(matches!(err, VGridError::MetadataType(_)));
    let msg = err.to_string();
    assert!(msg.contains("interval set 'faces', interval 1"), "{msg}");
    assert!(msg.contains("metadata key 'k'"), "{msg}");
}

#[test]
fn block_json_shape() {
    let data = VData::new(SpatialType::bbox()).with_metadata("text", Metadata::bbox_text("t"));
    let set = IntervalSet::new(vec![Interval::new(Bounds3D::new(0.0, 10.0), data)]);
    let block = IntervalBlock::new(0, vec![NamedIntervalSet::new("bboxes", &set).unwrap()]);
    let v = serde_json::to_value(&block).unwrap();

    assert_eq!(v["video_id"], 0);
    assert!(v.get("init_time").is_none());
    assert_eq!(v["interval_sets"][0]["name"], "bboxes");
    assert_eq!(
        v["interval_sets"][0]["interval_set"][0]["payload"],
        json!({
            "spatial_type": {"type": "SpatialType_Bbox"},
            "metadata": {"text": {"type": "Metadata_Bbox", "args": {"text": "t"}}}
        })
    );

    let timed = block.with_init_time(Some(4.5));
    assert_eq!(serde_json::to_value(&timed).unwrap()["init_time"], 4.5);
    assert_eq!(timed.num_intervals(), 1);
}
