use super::*;
use serde_json::json;

#[test]
fn absent_or_non_object_payload_defaults_to_bbox() {
    let expected = VData {
        spatial_type: SpatialType::bbox(),
        metadata: BTreeMap::new(),
    };
    assert_eq!(normalize(None).unwrap(), expected);
    assert_eq!(normalize(Some(&json!(null))).unwrap(), expected);
    assert_eq!(normalize(Some(&json!("hello"))).unwrap(), expected);
    assert_eq!(normalize(Some(&json!([1, 2]))).unwrap(), expected);
    assert_eq!(normalize(Some(&json!({}))).unwrap(), expected);
}

#[test]
fn explicit_wrong_shape_is_rejected() {
    let err = normalize(Some(&json!({"shape": 5}))).unwrap_err();
    assert!(matches!(err, VGridError::ShapeType(_)), "{err}");

    let err = normalize(Some(&json!({"spatial_type": {"type": "Nope"}}))).unwrap_err();
    assert!(matches!(err, VGridError::ShapeType(_)), "{err}");
    assert!(err.to_string().contains("spatial_type"));
}

#[test]
fn null_spatial_type_falls_through_to_shape_alias() {
    let v = json!({
        "spatial_type": null,
        "shape": {"type": "SpatialType_Caption", "args": {"text": "hi"}}
    });
    assert_eq!(normalize(Some(&v)).unwrap().spatial_type, SpatialType::caption("hi"));

    let v = json!({"spatial_type": null, "shape": 5});
    let err = normalize(Some(&v)).unwrap_err();
    assert!(matches!(err, VGridError::ShapeType(_)), "{err}");
}

#[test]
fn explicit_wrong_metadata_is_rejected() {
    let err = normalize(Some(&json!({"metadata": [1]}))).unwrap_err();
    assert!(matches!(err, VGridError::MetadataType(_)), "{err}");

    let err = normalize(Some(&json!({"metadata": {"label": "face"}}))).unwrap_err();
    assert!(matches!(err, VGridError::MetadataType(_)), "{err}");
    assert!(err.to_string().contains("'label'"));
}

#[test]
fn missing_metadata_defaults_to_empty() {
    let v = json!({"spatial_type": {"type": "SpatialType_Temporal"}});
    let data = normalize(Some(&v)).unwrap();
    assert_eq!(data.spatial_type, SpatialType::Temporal);
    assert!(data.metadata.is_empty());
}

#[test]
fn well_typed_payload_decodes() {
    let v = json!({
        "spatial_type": {"type": "SpatialType_Bbox"},
        "metadata": {"text": {"type": "Metadata_Bbox", "args": {"text": "my text"}}}
    });
    let data = normalize(Some(&v)).unwrap();
    assert_eq!(
        data,
        VData::new(SpatialType::bbox()).with_metadata("text", Metadata::bbox_text("my text"))
    );
    assert_eq!(serde_json::to_value(&data).unwrap(), v);
}

#[test]
fn normalize_does_not_touch_input() {
    let v = json!({"spatial_type": {"type": "SpatialType_Temporal"}});
    let before = v.clone();
    let _ = normalize(Some(&v)).unwrap();
    assert_eq!(v, before);
}

#[test]
fn keypoints_shape_requires_keypoints_metadata() {
    let v = json!({"spatial_type": {"type": "SpatialType_Keypoints"}, "metadata": {}});
    let err = normalize(Some(&v)).unwrap_err();
    assert!(matches!(err, VGridError::MetadataType(_)), "{err}");

    let typed = VData::new(SpatialType::Keypoints).with_metadata("flag", Metadata::Flag);
    assert!(typed.to_vdata().is_err());
}

#[test]
fn annotated_impls_agree() {
    assert_eq!(().to_vdata().unwrap(), VData::default());
    assert_eq!(None::<Value>.to_vdata().unwrap(), VData::default());
    let typed = VData::new(SpatialType::caption("hi"));
    assert_eq!(typed.to_vdata().unwrap(), typed);
    assert_eq!(serde_json::to_value(&typed).unwrap().to_vdata().unwrap(), typed);
}
