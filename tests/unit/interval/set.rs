use super::*;

#[test]
fn bounds_default_to_full_frame() {
    let b: Bounds3D = serde_json::from_str(r#"{"t1": 0, "t2": 10}"#).unwrap();
    assert_eq!(b, Bounds3D::new(0.0, 10.0));
    assert_eq!(b.bbox, BoundingBox::default());
    assert_eq!(b.duration(), 10.0);
}

#[test]
fn interval_set_keeps_insertion_order() {
    let set: IntervalSet<u8> = [
        Interval::new(Bounds3D::new(20.0, 30.0), 0),
        Interval::new(Bounds3D::new(0.0, 10.0), 1),
    ]
    .into_iter()
    .collect();
    let payloads: Vec<u8> = set.iter().map(|i| i.payload).collect();
    assert_eq!(payloads, vec![0, 1]);
}

#[test]
fn interval_set_serializes_as_array() {
    let set = IntervalSet::new(vec![Interval::new(Bounds3D::new(0.0, 1.0), ())]);
    let v = serde_json::to_value(&set).unwrap();
    assert!(v.is_array());
    assert_eq!(v[0]["bounds"]["t2"], 1.0);
    assert_eq!(v[0]["bounds"]["bbox"]["x2"], 1.0);
}

#[test]
fn mapping_iterates_in_key_order_and_reads_json_keys() {
    let m: IntervalSetMapping<serde_json::Value> = serde_json::from_str(
        r#"{
            "2": [],
            "0": [{"bounds": {"t1": 0, "t2": 1}, "payload": null}]
        }"#,
    )
    .unwrap();
    let keys: Vec<VideoId> = m.keys().cloned().collect();
    assert_eq!(keys, vec![VideoId::Int(0), VideoId::Int(2)]);
    assert_eq!(m.get(&VideoId::Int(0)).unwrap().len(), 1);
    assert!(m.get(&VideoId::Int(2)).unwrap().is_empty());
}

#[test]
fn map_payload_keeps_bounds() {
    let i = Interval::new(Bounds3D::with_bbox(1.0, 2.0, 0.1, 0.2, 0.3, 0.4), 5u32);
    let j = i.map_payload(|p| p * 2);
    assert_eq!(j.payload, 10);
    assert_eq!(j.bounds.bbox.y2, 0.4);
}
