use std::{collections::BTreeMap, path::Path};

use serde_json::Value;

use crate::{
    foundation::{
        core::VideoId,
        error::{VGridError, VGridResult},
    },
    interval::set::{IntervalSet, IntervalSetMapping},
    layout::{
        block::{IntervalBlock, NamedIntervalSet},
        format::{FlatFormat, NestedFormat, VideoBlockFormat},
    },
    spec::{
        database::VideoMetadata,
        settings::VGridSettings,
        vgrid::{BlockSource, VGridSpec},
    },
};

/// A raw interval set inside an explicit block; payloads are normalized by
/// [`SpecDocument::into_spec`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawIntervalSet {
    pub name: String,
    pub interval_set: IntervalSet<Value>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawBlock {
    pub video_id: VideoId,
    #[serde(default)]
    pub init_time: Option<f64>,
    pub interval_sets: Vec<RawIntervalSet>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedMapping {
    pub name: String,
    pub mapping: IntervalSetMapping<Value>,
}

/// How a document lays out its intervals.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutDef {
    /// Blocks given verbatim.
    Blocks { blocks: Vec<RawBlock> },
    /// One block per video across several named mappings.
    VideoBlock {
        sets: Vec<NamedMapping>,
        #[serde(default)]
        init_times: BTreeMap<VideoId, f64>,
    },
    /// One full-length block per catalog video.
    Catalog {
        #[serde(default)]
        init_times: BTreeMap<VideoId, f64>,
    },
    /// One block per interval.
    Flat { mapping: IntervalSetMapping<Value> },
    /// One block per top-level interval, showing the set in its payload.
    Nested {
        mapping: IntervalSetMapping<IntervalSet<Value>>,
    },
}

/// A JSON file describing a whole widget instance: catalog, layout and settings.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecDocument {
    pub videos: Vec<VideoMetadata>,
    pub layout: LayoutDef,
    #[serde(default)]
    pub settings: VGridSettings,
}

impl SpecDocument {
    pub fn from_path(path: &Path) -> VGridResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            VGridError::validation(format!("read document '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&s)
            .map_err(|e| VGridError::serde(format!("parse document '{}': {e}", path.display())))
    }

    #[tracing::instrument(skip(self))]
    pub fn into_spec(self) -> VGridResult<VGridSpec> {
        self.settings.validate()?;
        let blocks = match self.layout {
            LayoutDef::Blocks { blocks } => BlockSource::Explicit(
                blocks
                    .into_iter()
                    .enumerate()
                    .map(|(i, raw)| {
                        raw.into_block()
                            .map_err(|e| e.context(format!("block {i}")))
                    })
                    .collect::<VGridResult<Vec<_>>>()?,
            ),
            LayoutDef::VideoBlock { sets, init_times } => BlockSource::format(
                VideoBlockFormat::new(sets.into_iter().map(|s| (s.name, s.mapping)).collect())
                    .with_init_times(init_times),
            ),
            LayoutDef::Catalog { init_times } => BlockSource::format(
                VideoBlockFormat::from_videos(self.videos.clone()).with_init_times(init_times),
            ),
            LayoutDef::Flat { mapping } => BlockSource::format(FlatFormat::new(mapping)),
            LayoutDef::Nested { mapping } => BlockSource::format(NestedFormat::new(mapping)),
        };
        VGridSpec::new(self.videos, blocks, self.settings)
    }
}

impl RawBlock {
    fn into_block(self) -> VGridResult<IntervalBlock> {
        let sets = self
            .interval_sets
            .iter()
            .map(|s| NamedIntervalSet::new(s.name.clone(), &s.interval_set))
            .collect::<VGridResult<Vec<_>>>()?;
        Ok(IntervalBlock::new(self.video_id, sets).with_init_time(self.init_time))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/document.rs"]
mod tests;
