//! Layout strategies: how raw interval mappings become grid blocks.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    annotation::payload::Annotated,
    foundation::{
        core::VideoId,
        error::{VGridError, VGridResult},
    },
    interval::set::{Bounds3D, Interval, IntervalSet, IntervalSetMapping},
    layout::block::{IntervalBlock, NamedIntervalSet},
    spec::database::VideoMetadata,
};

/// Name given to the single interval set of flat, nested, and catalog-only blocks.
pub const DEFAULT_SET_NAME: &str = "default";

/// A strategy that produces the blocks shown in the grid.
pub trait VisFormat {
    fn interval_blocks(&self) -> VGridResult<Vec<IntervalBlock>>;
}

enum VideoBlockSource<P> {
    Mappings(Vec<(String, IntervalSetMapping<P>)>),
    Catalog(Vec<VideoMetadata>),
}

/// One block per video holding every named mapping's intervals for that video.
///
/// All mappings are expected to share the video keys of the first one. A later mapping missing
/// one of those keys is an error; keys only present in later mappings are ignored.
pub struct VideoBlockFormat<P = Value> {
    source: VideoBlockSource<P>,
    init_times: BTreeMap<VideoId, f64>,
}

impl<P> VideoBlockFormat<P> {
    /// Build from `(name, mapping)` pairs. Block order follows the first mapping's keys.
    pub fn new(imaps: Vec<(String, IntervalSetMapping<P>)>) -> Self {
        Self {
            source: VideoBlockSource::Mappings(imaps),
            init_times: BTreeMap::new(),
        }
    }

    /// Initial playhead time (seconds) per video; videos without an entry leave it unset.
    pub fn with_init_times(mut self, init_times: BTreeMap<VideoId, f64>) -> Self {
        self.init_times = init_times;
        self
    }

    fn init_time(&self, video_id: &VideoId) -> Option<f64> {
        self.init_times.get(video_id).copied()
    }
}

impl VideoBlockFormat {
    /// One block per catalog video, each holding a single interval spanning `[0, duration)`.
    pub fn from_videos(videos: Vec<VideoMetadata>) -> Self {
        Self {
            source: VideoBlockSource::Catalog(videos),
            init_times: BTreeMap::new(),
        }
    }
}

impl<P: Annotated> VideoBlockFormat<P> {
    fn blocks_from_mappings(
        &self,
        imaps: &[(String, IntervalSetMapping<P>)],
    ) -> VGridResult<Vec<IntervalBlock>> {
        let Some((first_name, first)) = imaps.first() else {
            return Ok(Vec::new());
        };

        for (name, imap) in &imaps[1..] {
            if let Some(missing) = first.keys().find(|k| !imap.contains_key(k)) {
                return Err(VGridError::validation(format!(
                    "interval mapping '{name}' has no entry for video {missing} \
                     (present in '{first_name}')"
                )));
            }
            let extra = imap.keys().filter(|k| !first.contains_key(k)).count();
            if extra > 0 {
                tracing::warn!(
                    mapping = %name,
                    extra,
                    "ignoring video keys absent from the first interval mapping"
                );
            }
        }

        first
            .keys()
            .map(|video_id| {
                let sets = imaps
                    .iter()
                    .map(|(name, imap)| {
                        let set = imap.get(video_id).ok_or_else(|| {
                            VGridError::validation(format!(
                                "interval mapping '{name}' has no entry for video {video_id}"
                            ))
                        })?;
                        NamedIntervalSet::new(name.clone(), set)
                    })
                    .collect::<VGridResult<Vec<_>>>()?;
                Ok(IntervalBlock::new(video_id.clone(), sets)
                    .with_init_time(self.init_time(video_id)))
            })
            .collect()
    }

    fn blocks_from_catalog(&self, videos: &[VideoMetadata]) -> VGridResult<Vec<IntervalBlock>> {
        videos
            .iter()
            .map(|video| {
                let span: IntervalSet<Option<Value>> = IntervalSet::new(vec![Interval::new(
                    Bounds3D::new(0.0, video.duration()),
                    None,
                )]);
                let set = NamedIntervalSet::new(DEFAULT_SET_NAME, &span)?;
                Ok(IntervalBlock::new(video.id.clone(), vec![set])
                    .with_init_time(self.init_time(&video.id)))
            })
            .collect()
    }
}

impl<P: Annotated> VisFormat for VideoBlockFormat<P> {
    #[tracing::instrument(skip(self), name = "video_block_format")]
    fn interval_blocks(&self) -> VGridResult<Vec<IntervalBlock>> {
        let blocks = match &self.source {
            VideoBlockSource::Mappings(imaps) => self.blocks_from_mappings(imaps)?,
            VideoBlockSource::Catalog(videos) => self.blocks_from_catalog(videos)?,
        };
        tracing::debug!(blocks = blocks.len(), "built per-video blocks");
        Ok(blocks)
    }
}

/// One block per interval, each with a single `"default"` set holding that interval.
pub struct FlatFormat<P = Value> {
    imap: IntervalSetMapping<P>,
}

impl<P> FlatFormat<P> {
    pub fn new(imap: IntervalSetMapping<P>) -> Self {
        Self { imap }
    }
}

impl<P: Annotated + Clone> VisFormat for FlatFormat<P> {
    #[tracing::instrument(skip(self), name = "flat_format")]
    fn interval_blocks(&self) -> VGridResult<Vec<IntervalBlock>> {
        let mut blocks = Vec::new();
        for (video_id, set) in self.imap.iter() {
            for interval in set {
                let single = IntervalSet::new(vec![interval.clone()]);
                let named = NamedIntervalSet::new(DEFAULT_SET_NAME, &single)
                    .map_err(|e| e.context(format!("video {video_id}")))?;
                blocks.push(IntervalBlock::new(video_id.clone(), vec![named]));
            }
        }
        tracing::debug!(blocks = blocks.len(), "built flat blocks");
        Ok(blocks)
    }
}

/// One block per top-level interval, showing the interval set stored in its payload.
pub struct NestedFormat<P = Value> {
    imap: IntervalSetMapping<IntervalSet<P>>,
}

impl<P> NestedFormat<P> {
    pub fn new(imap: IntervalSetMapping<IntervalSet<P>>) -> Self {
        Self { imap }
    }
}

impl<P: Annotated> VisFormat for NestedFormat<P> {
    #[tracing::instrument(skip(self), name = "nested_format")]
    fn interval_blocks(&self) -> VGridResult<Vec<IntervalBlock>> {
        let mut blocks = Vec::new();
        for (video_id, set) in self.imap.iter() {
            for (i, interval) in set.iter().enumerate() {
                let named = NamedIntervalSet::new(DEFAULT_SET_NAME, &interval.payload)
                    .map_err(|e| e.context(format!("video {video_id}, top-level interval {i}")))?;
                blocks.push(IntervalBlock::new(video_id.clone(), vec![named]));
            }
        }
        tracing::debug!(blocks = blocks.len(), "built nested blocks");
        Ok(blocks)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/format.rs"]
mod tests;
