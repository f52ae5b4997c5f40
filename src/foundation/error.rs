/// Convenience result type used across VGrid.
pub type VGridResult<T> = Result<T, VGridError>;

/// Top-level error taxonomy used by encoding and layout APIs.
#[derive(thiserror::Error, Debug)]
pub enum VGridError {
    /// A spec was constructed with both or neither of explicit blocks and a layout strategy.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An explicit `spatial_type` field was present but not a shape descriptor.
    #[error("shape type error: {0}")]
    ShapeType(String),

    /// An explicit `metadata` field (or one of its values) was present but not well-typed.
    #[error("metadata type error: {0}")]
    MetadataType(String),

    /// A keypoint edge references a node index that does not exist.
    #[error("keypoint index error: {0}")]
    KeypointIndex(String),

    /// Invalid caller-provided structure (ranges, mappings, settings).
    #[error("validation error: {0}")]
    Validation(String),

    /// Video metadata probing failed.
    #[error("probe error: {0}")]
    Probe(String),

    /// Errors when serializing, compressing or deserializing data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VGridError {
    /// Build a [`VGridError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`VGridError::ShapeType`] value.
    pub fn shape_type(msg: impl Into<String>) -> Self {
        Self::ShapeType(msg.into())
    }

    /// Build a [`VGridError::MetadataType`] value.
    pub fn metadata_type(msg: impl Into<String>) -> Self {
        Self::MetadataType(msg.into())
    }

    /// Build a [`VGridError::KeypointIndex`] value.
    pub fn keypoint_index(msg: impl Into<String>) -> Self {
        Self::KeypointIndex(msg.into())
    }

    /// Build a [`VGridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VGridError::Probe`] value.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// Build a [`VGridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prefix the message with `ctx`, keeping the error kind.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::Configuration(m) => Self::Configuration(format!("{ctx}: {m}")),
            Self::ShapeType(m) => Self::ShapeType(format!("{ctx}: {m}")),
            Self::MetadataType(m) => Self::MetadataType(format!("{ctx}: {m}")),
            Self::KeypointIndex(m) => Self::KeypointIndex(format!("{ctx}: {m}")),
            Self::Validation(m) => Self::Validation(format!("{ctx}: {m}")),
            Self::Probe(m) => Self::Probe(format!("{ctx}: {m}")),
            Self::Serde(m) => Self::Serde(format!("{ctx}: {m}")),
            Self::Other(e) => Self::Other(e.context(ctx.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
