use crate::{
    annotation::payload::{Annotated, VData},
    foundation::{
        core::VideoId,
        error::VGridResult,
    },
    interval::set::{Interval, IntervalSet},
};

/// An interval set with a display name, payloads already normalized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedIntervalSet {
    pub name: String,
    pub interval_set: IntervalSet<VData>,
}

impl NamedIntervalSet {
    /// Normalize every payload of `set`. Errors name the set and the offending interval.
    pub fn new<P: Annotated>(name: impl Into<String>, set: &IntervalSet<P>) -> VGridResult<Self> {
        let name = name.into();
        let intervals = set
            .iter()
            .enumerate()
            .map(|(i, interval)| {
                let payload = interval
                    .payload
                    .to_vdata()
                    .map_err(|e| e.context(format!("interval set '{name}', interval {i}")))?;
                Ok(Interval::new(interval.bounds, payload))
            })
            .collect::<VGridResult<Vec<_>>>()?;
        Ok(Self {
            name,
            interval_set: IntervalSet::new(intervals),
        })
    }

    /// A set with no intervals.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interval_set: IntervalSet::default(),
        }
    }
}

/// One cell of the grid: every named interval set for a single video.
///
/// `video_id` must name a video in the catalog passed to [`VGridSpec`](crate::VGridSpec), which
/// does not check it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntervalBlock {
    pub interval_sets: Vec<NamedIntervalSet>,
    pub video_id: VideoId,
    /// Initial playhead time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_time: Option<f64>,
}

impl IntervalBlock {
    pub fn new(video_id: impl Into<VideoId>, interval_sets: Vec<NamedIntervalSet>) -> Self {
        Self {
            interval_sets,
            video_id: video_id.into(),
            init_time: None,
        }
    }

    pub fn with_init_time(mut self, init_time: Option<f64>) -> Self {
        self.init_time = init_time;
        self
    }

    pub fn num_intervals(&self) -> usize {
        self.interval_sets.iter().map(|s| s.interval_set.len()).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
