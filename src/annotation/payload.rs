//! Payload normalization.
//!
//! Every interval handed to the widget carries `{spatial_type, metadata}`. Raw payloads are
//! normalized with a "validate when explicit, default when absent" policy:
//!
//! - an absent or non-object payload becomes `{Bbox, {}}`;
//! - an absent (or `null`) `spatial_type` defaults to `Bbox`, a present one must decode as a shape
//!   descriptor or normalization fails with [`VGridError::ShapeType`];
//! - an absent (or `null`) `metadata` defaults to `{}`, a present one must be an object whose
//!   values all decode as metadata descriptors, else [`VGridError::MetadataType`].
//!
//! `shape` is accepted as an alias of `spatial_type`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    annotation::{metadata::Metadata, spatial::SpatialType},
    foundation::error::{VGridError, VGridResult},
};

/// Normalized interval payload.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VData {
    #[serde(default)]
    pub spatial_type: SpatialType,
    #[serde(default)]
    pub metadata: BTreeMap<String, Metadata>,
}

impl VData {
    pub fn new(spatial_type: SpatialType) -> Self {
        Self {
            spatial_type,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata value under `key`, replacing any previous one.
    pub fn with_metadata(mut self, key: impl Into<String>, meta: Metadata) -> Self {
        self.metadata.insert(key.into(), meta);
        self
    }

    /// Structural checks that typed construction cannot rule out.
    pub fn validate(&self) -> VGridResult<()> {
        for (key, meta) in &self.metadata {
            meta.validate()
                .map_err(|e| e.context(format!("metadata key '{key}'")))?;
        }
        if self.spatial_type == SpatialType::Keypoints
            && !self.metadata.values().any(Metadata::is_keypoints)
        {
            return Err(VGridError::metadata_type(
                "SpatialType_Keypoints requires a Metadata_Keypoints value",
            ));
        }
        Ok(())
    }
}

/// Normalize a raw payload. Never mutates its input.
pub fn normalize(raw: Option<&Value>) -> VGridResult<VData> {
    let Some(Value::Object(obj)) = raw else {
        return Ok(VData::default());
    };

    let present = |key: &str| obj.get(key).filter(|v| !v.is_null());
    let shape_field = present("spatial_type").or_else(|| present("shape"));
    let spatial_type = match shape_field {
        Some(v) => SpatialType::decode(v).map_err(|e| e.context("field 'spatial_type'"))?,
        None => SpatialType::default(),
    };

    let metadata = match present("metadata") {
        None => BTreeMap::new(),
        Some(Value::Object(entries)) => {
            let mut out = BTreeMap::new();
            for (key, v) in entries {
                let meta = Metadata::decode(v)
                    .map_err(|e| e.context(format!("metadata key '{key}'")))?;
                out.insert(key.clone(), meta);
            }
            out
        }
        Some(_) => {
            return Err(VGridError::metadata_type(
                "field 'metadata' must be an object of metadata descriptors",
            ));
        }
    };

    let data = VData {
        spatial_type,
        metadata,
    };
    data.validate()?;
    Ok(data)
}

/// Anything that can be turned into a normalized payload.
pub trait Annotated {
    fn to_vdata(&self) -> VGridResult<VData>;
}

impl Annotated for Value {
    fn to_vdata(&self) -> VGridResult<VData> {
        normalize(Some(self))
    }
}

impl Annotated for Option<Value> {
    fn to_vdata(&self) -> VGridResult<VData> {
        normalize(self.as_ref())
    }
}

impl Annotated for VData {
    fn to_vdata(&self) -> VGridResult<VData> {
        self.validate()?;
        Ok(self.clone())
    }
}

impl Annotated for () {
    fn to_vdata(&self) -> VGridResult<VData> {
        Ok(VData::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/payload.rs"]
mod tests;
