use super::*;

#[test]
fn compress_then_decompress_is_lossless() {
    let text = r#"{"interval_blocks":[],"settings":{},"database":{"videos":[]}}"#;
    let env = CompressedSpec::compress(text).unwrap();
    assert!(env.compressed);
    assert_eq!(env.data[0], 0x78, "zlib header");
    assert_eq!(env.decompress().unwrap(), text);
    assert_eq!(
        decode_compressed(&env).unwrap(),
        serde_json::from_str::<serde_json::Value>(text).unwrap()
    );
}

#[test]
fn repetitive_json_shrinks() {
    let text = "{\"a\":1},".repeat(500);
    let env = CompressedSpec::compress(&text).unwrap();
    assert!(env.data.len() < text.len() / 4);
}

#[test]
fn corrupt_data_is_a_serde_error() {
    let env = CompressedSpec {
        compressed: true,
        data: vec![1, 2, 3, 4],
    };
    assert!(matches!(env.decompress(), Err(VGridError::Serde(_))));
}

#[test]
fn envelope_json_shape() {
    let env = CompressedSpec::compress("{}").unwrap();
    let v = serde_json::to_value(&env).unwrap();
    assert_eq!(v["compressed"], true);
    assert!(v["data"].is_array());
}
