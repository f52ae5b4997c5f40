use std::io::{Read as _, Write as _};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};

use crate::foundation::error::{VGridError, VGridResult};

/// Deflate-compressed spec: `{"compressed": true, "data": <zlib bytes of the JSON text>}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompressedSpec {
    pub compressed: bool,
    pub data: Vec<u8>,
}

impl CompressedSpec {
    /// Compress UTF-8 JSON text.
    pub fn compress(json: &str) -> VGridResult<Self> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(json.as_bytes())
            .map_err(|e| VGridError::serde(format!("deflate failed: {e}")))?;
        let data = enc
            .finish()
            .map_err(|e| VGridError::serde(format!("deflate failed: {e}")))?;
        Ok(Self {
            compressed: true,
            data,
        })
    }

    /// Recover the JSON text.
    pub fn decompress(&self) -> VGridResult<String> {
        if !self.compressed {
            return String::from_utf8(self.data.clone())
                .map_err(|e| VGridError::serde(format!("payload is not UTF-8: {e}")));
        }
        let mut out = String::new();
        ZlibDecoder::new(self.data.as_slice())
            .read_to_string(&mut out)
            .map_err(|e| VGridError::serde(format!("inflate failed: {e}")))?;
        Ok(out)
    }
}

/// Inflate an envelope and parse the JSON document inside.
pub fn decode_compressed(envelope: &CompressedSpec) -> VGridResult<serde_json::Value> {
    let text = envelope.decompress()?;
    serde_json::from_str(&text).map_err(|e| VGridError::serde(format!("parse spec json: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/spec/envelope.rs"]
mod tests;
