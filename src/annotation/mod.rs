//! Annotation descriptors attached to intervals: shapes, metadata, keypoint graphs, and payload
//! normalization.

pub(crate) mod keypoints;
pub(crate) mod metadata;
pub(crate) mod payload;
pub(crate) mod spatial;
pub(crate) mod tagged;
