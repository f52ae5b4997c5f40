//! Metadata descriptors: auxiliary data attached to a drawn interval.

use serde_json::{Map, Value};

use crate::{
    annotation::{
        keypoints::{KeypointNode, Keypoints, KeypointsRepr},
        spatial::describe,
        tagged::TaggedRepr,
    },
    foundation::error::{VGridError, VGridResult},
};

/// Auxiliary annotation data. Each variant encodes to a `{"type", "args"?}` record.
#[derive(Clone, Debug, PartialEq)]
pub enum Metadata {
    /// Visual flag on the interval.
    Flag,
    /// Arbitrary JSON shown stringified in the metadata panel.
    Generic(Value),
    /// A categorical value, e.g. a shot type.
    Categorical {
        category_type: String,
        category: Value,
    },
    /// Metadata that applies to `[char_start, char_end)` of a caption.
    CaptionSpan {
        inner: Box<Metadata>,
        char_start: usize,
        char_end: usize,
    },
    /// Text drawn with a bounding box.
    BboxText(String),
    /// Keypoint graph drawn by [`SpatialType::Keypoints`](crate::SpatialType::Keypoints).
    Keypoints(Keypoints),
}

const FLAG: &str = "Metadata_Flag";
const GENERIC: &str = "Metadata_Generic";
const CATEGORICAL: &str = "Metadata_Categorical";
const CAPTION_META: &str = "Metadata_CaptionMeta";
const BBOX: &str = "Metadata_Bbox";
const KEYPOINTS: &str = "Metadata_Keypoints";

#[derive(serde::Deserialize)]
struct GenericArgs {
    #[serde(default)]
    data: Value,
}

#[derive(serde::Deserialize)]
struct CategoricalArgs {
    category_type: String,
    #[serde(default)]
    category: Value,
}

#[derive(serde::Deserialize)]
struct CaptionMetaArgs {
    meta: Value,
    char_start: usize,
    char_end: usize,
}

#[derive(serde::Deserialize)]
struct BboxArgs {
    text: String,
}

impl Metadata {
    pub fn generic(data: impl Into<Value>) -> Self {
        Self::Generic(data.into())
    }

    pub fn categorical(category_type: impl Into<String>, category: impl Into<Value>) -> Self {
        Self::Categorical {
            category_type: category_type.into(),
            category: category.into(),
        }
    }

    /// Attach `inner` to a caption sub-string; `char_start` must not exceed `char_end`.
    pub fn caption_span(inner: Metadata, char_start: usize, char_end: usize) -> VGridResult<Self> {
        let span = Self::CaptionSpan {
            inner: Box::new(inner),
            char_start,
            char_end,
        };
        span.validate()?;
        Ok(span)
    }

    pub fn bbox_text(text: impl Into<String>) -> Self {
        Self::BboxText(text.into())
    }

    /// Keypoint metadata assembled from OpenPose outputs; see [`Keypoints::from_openpose`].
    pub fn from_openpose(
        body_pose: &[KeypointNode],
        show_left_right: bool,
        face_pose: &[KeypointNode],
        hand_left_pose: &[KeypointNode],
        hand_right_pose: &[KeypointNode],
    ) -> VGridResult<Self> {
        Keypoints::from_openpose(
            body_pose,
            show_left_right,
            face_pose,
            hand_left_pose,
            hand_right_pose,
        )
        .map(Self::Keypoints)
    }

    /// Wire tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Flag => FLAG,
            Self::Generic(_) => GENERIC,
            Self::Categorical { .. } => CATEGORICAL,
            Self::CaptionSpan { .. } => CAPTION_META,
            Self::BboxText(_) => BBOX,
            Self::Keypoints(_) => KEYPOINTS,
        }
    }

    pub fn validate(&self) -> VGridResult<()> {
        match self {
            Self::CaptionSpan {
                inner,
                char_start,
                char_end,
            } => {
                if char_start > char_end {
                    return Err(VGridError::validation(format!(
                        "caption span start {char_start} is after end {char_end}"
                    )));
                }
                inner.validate()
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn to_repr(&self) -> TaggedRepr {
        let mut args = Map::new();
        match self {
            Self::Flag => return TaggedRepr::bare(FLAG),
            Self::Generic(data) => {
                args.insert("data".to_owned(), data.clone());
            }
            Self::Categorical {
                category_type,
                category,
            } => {
                args.insert(
                    "category_type".to_owned(),
                    Value::String(category_type.clone()),
                );
                args.insert("category".to_owned(), category.clone());
            }
            Self::CaptionSpan {
                inner,
                char_start,
                char_end,
            } => {
                args.insert("meta".to_owned(), inner.encode());
                args.insert("char_start".to_owned(), Value::from(*char_start));
                args.insert("char_end".to_owned(), Value::from(*char_end));
            }
            Self::BboxText(text) => {
                args.insert("text".to_owned(), Value::String(text.clone()));
            }
            Self::Keypoints(kp) => {
                let nodes = kp
                    .nodes()
                    .iter()
                    .map(|(i, n)| (i.to_string(), Value::from(vec![n.x, n.y, n.score])))
                    .collect::<Map<_, _>>();
                let edges = kp
                    .edges()
                    .iter()
                    .map(|e| {
                        Value::Array(vec![
                            Value::from(e.start),
                            Value::from(e.end),
                            Value::String(e.color.clone()),
                        ])
                    })
                    .collect::<Vec<_>>();
                args.insert("keypoints".to_owned(), Value::Object(nodes));
                args.insert("edges".to_owned(), Value::Array(edges));
            }
        }
        TaggedRepr::with_args(self.tag(), args)
    }

    /// Encode into `{"type": ..., "args"?: {...}}`.
    pub fn encode(&self) -> Value {
        self.to_repr().into_value()
    }

    /// Decode the wire form, failing with [`VGridError::MetadataType`] on anything that is not a
    /// recognized, well-formed metadata record.
    pub fn decode(v: &Value) -> VGridResult<Self> {
        let repr = TaggedRepr::from_value(v).ok_or_else(|| {
            VGridError::metadata_type(format!(
                "expected a tagged metadata descriptor, got {}",
                describe(v)
            ))
        })?;
        let bad_args = |e: serde_json::Error| {
            VGridError::metadata_type(format!("{}: bad args: {e}", repr.kind))
        };

        let meta = match repr.kind.as_str() {
            FLAG => Self::Flag,
            GENERIC => {
                let args: GenericArgs = repr.args_as().map_err(bad_args)?;
                Self::Generic(args.data)
            }
            CATEGORICAL => {
                let args: CategoricalArgs = repr.args_as().map_err(bad_args)?;
                Self::Categorical {
                    category_type: args.category_type,
                    category: args.category,
                }
            }
            CAPTION_META => {
                let args: CaptionMetaArgs = repr.args_as().map_err(bad_args)?;
                Self::CaptionSpan {
                    inner: Box::new(Self::decode(&args.meta).map_err(|e| e.context("meta"))?),
                    char_start: args.char_start,
                    char_end: args.char_end,
                }
            }
            BBOX => {
                let args: BboxArgs = repr.args_as().map_err(bad_args)?;
                Self::BboxText(args.text)
            }
            KEYPOINTS => {
                let args: KeypointsRepr = repr.args_as().map_err(bad_args)?;
                Self::Keypoints(Keypoints::new(args.keypoints, args.edges)?)
            }
            other => {
                return Err(VGridError::metadata_type(format!(
                    "unknown metadata descriptor type '{other}'"
                )));
            }
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn is_keypoints(&self) -> bool {
        matches!(self, Self::Keypoints(_))
    }
}

impl serde::Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_repr(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::decode(&v).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/metadata.rs"]
mod tests;
