//! VGrid turns interval annotations over a video collection into the JSON document consumed by
//! the VGrid browser widget.
//!
//! # Pipeline overview
//!
//! 1. **Annotate**: attach a shape ([`SpatialType`]) and named [`Metadata`] to each interval.
//! 2. **Normalize**: raw payloads become [`VData`] (see [`normalize`]).
//! 3. **Lay out**: interval sets become grid [`IntervalBlock`]s, directly or via a [`VisFormat`].
//! 4. **Encode**: [`VGridSpec`] emits `{interval_blocks, settings, database}`, optionally
//!    deflated into a [`CompressedSpec`].
#![forbid(unsafe_code)]

mod annotation;
mod foundation;
mod interval;
mod layout;
mod spec;

pub use annotation::keypoints::{KeypointEdge, KeypointNode, Keypoints};
pub use annotation::metadata::Metadata;
pub use annotation::payload::{Annotated, VData, normalize};
pub use annotation::spatial::{BboxStyle, SpatialType};
pub use foundation::core::VideoId;
pub use foundation::error::{VGridError, VGridResult};
pub use interval::set::{BoundingBox, Bounds3D, Interval, IntervalSet, IntervalSetMapping};
pub use layout::block::{IntervalBlock, NamedIntervalSet};
pub use layout::format::{DEFAULT_SET_NAME, FlatFormat, NestedFormat, VideoBlockFormat, VisFormat};
pub use spec::database::{Database, VideoMetadata};
pub use spec::document::{LayoutDef, NamedMapping, RawBlock, RawIntervalSet, SpecDocument};
pub use spec::envelope::{CompressedSpec, decode_compressed};
pub use spec::settings::{KeyMode, VGridSettings};
pub use spec::vgrid::{BlockSource, EncodedSpec, VGridSpec, VGridSpecBuilder};
