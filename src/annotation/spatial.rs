//! Shape descriptors: how an interval is drawn by the widget.

use serde_json::{Map, Value};

use crate::{
    annotation::tagged::TaggedRepr,
    foundation::error::{VGridError, VGridResult},
};

/// Optional styling for [`SpatialType::Bbox`]. Only fields that were set are emitted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BboxStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BboxStyle {
    pub fn is_unset(&self) -> bool {
        self.text.is_none() && self.fade.is_none() && self.color.is_none()
    }
}

/// How an interval should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum SpatialType {
    /// Text shown in the caption box.
    Caption {
        /// Caption text.
        text: String,
    },
    /// Bounding box drawn over the frame.
    Bbox(BboxStyle),
    /// Temporal-only marker on the timeline.
    Temporal,
    /// Keypoint skeleton; the payload metadata must carry keypoints.
    Keypoints,
}

impl Default for SpatialType {
    fn default() -> Self {
        Self::Bbox(BboxStyle::default())
    }
}

const CAPTION: &str = "SpatialType_Caption";
const BBOX: &str = "SpatialType_Bbox";
const TEMPORAL: &str = "SpatialType_Temporal";
const KEYPOINTS: &str = "SpatialType_Keypoints";

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CaptionArgs {
    text: String,
}

impl SpatialType {
    pub fn caption(text: impl Into<String>) -> Self {
        Self::Caption { text: text.into() }
    }

    /// Plain bounding box with no optional styling.
    pub fn bbox() -> Self {
        Self::Bbox(BboxStyle::default())
    }

    pub fn bbox_with_text(text: impl Into<String>) -> Self {
        Self::Bbox(BboxStyle {
            text: Some(text.into()),
            ..BboxStyle::default()
        })
    }

    /// Wire tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Caption { .. } => CAPTION,
            Self::Bbox(_) => BBOX,
            Self::Temporal => TEMPORAL,
            Self::Keypoints => KEYPOINTS,
        }
    }

    pub(crate) fn to_repr(&self) -> TaggedRepr {
        match self {
            Self::Caption { text } => {
                let mut args = Map::new();
                args.insert("text".to_owned(), Value::String(text.clone()));
                TaggedRepr::with_args(CAPTION, args)
            }
            Self::Bbox(style) if style.is_unset() => TaggedRepr::bare(BBOX),
            Self::Bbox(style) => {
                let mut args = Map::new();
                if let Some(text) = &style.text {
                    args.insert("text".to_owned(), Value::String(text.clone()));
                }
                if let Some(fade) = style.fade {
                    args.insert("fade".to_owned(), Value::Bool(fade));
                }
                if let Some(color) = &style.color {
                    args.insert("color".to_owned(), Value::String(color.clone()));
                }
                TaggedRepr::with_args(BBOX, args)
            }
            Self::Temporal => TaggedRepr::bare(TEMPORAL),
            Self::Keypoints => TaggedRepr::bare(KEYPOINTS),
        }
    }

    /// Encode into `{"type": ..., "args"?: {...}}`.
    pub fn encode(&self) -> Value {
        self.to_repr().into_value()
    }

    /// Decode the wire form. Anything that is not a recognized tagged record is a
    /// [`VGridError::ShapeType`].
    pub fn decode(v: &Value) -> VGridResult<Self> {
        let repr = TaggedRepr::from_value(v).ok_or_else(|| {
            VGridError::shape_type(format!(
                "expected a tagged shape descriptor, got {}",
                describe(v)
            ))
        })?;
        let bad_args =
            |e: serde_json::Error| VGridError::shape_type(format!("{}: bad args: {e}", repr.kind));

        match repr.kind.as_str() {
            CAPTION => {
                let args: CaptionArgs = repr.args_as().map_err(bad_args)?;
                Ok(Self::Caption { text: args.text })
            }
            BBOX => Ok(Self::Bbox(repr.args_as().map_err(bad_args)?)),
            TEMPORAL => Ok(Self::Temporal),
            KEYPOINTS => Ok(Self::Keypoints),
            other => Err(VGridError::shape_type(format!(
                "unknown shape descriptor type '{other}'"
            ))),
        }
    }
}

pub(crate) fn describe(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an untagged object",
    }
}

impl serde::Serialize for SpatialType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_repr(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for SpatialType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::decode(&v).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/spatial.rs"]
mod tests;
