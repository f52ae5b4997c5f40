use std::collections::BTreeMap;

use crate::foundation::core::VideoId;

/// Normalized spatial extent, all coordinates in `[0, 1]` of the frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            x1: 0.0,
            x2: 1.0,
            y1: 0.0,
            y2: 1.0,
        }
    }
}

/// Temporal extent `[t1, t2)` in seconds plus an optional spatial box (defaults to the full frame).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds3D {
    pub t1: f64,
    pub t2: f64,
    #[serde(default)]
    pub bbox: BoundingBox,
}

impl Bounds3D {
    /// Temporal-only bounds covering the full frame.
    pub fn new(t1: f64, t2: f64) -> Self {
        Self {
            t1,
            t2,
            bbox: BoundingBox::default(),
        }
    }

    /// Bounds with an explicit spatial box.
    pub fn with_bbox(t1: f64, t2: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self {
            t1,
            t2,
            bbox: BoundingBox { x1, x2, y1, y2 },
        }
    }

    pub fn duration(&self) -> f64 {
        self.t2 - self.t1
    }
}

/// Bounds paired with a payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interval<P> {
    pub bounds: Bounds3D,
    pub payload: P,
}

impl<P> Interval<P> {
    pub fn new(bounds: Bounds3D, payload: P) -> Self {
        Self { bounds, payload }
    }

    /// Replace the payload, keeping the bounds.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Interval<Q> {
        Interval {
            bounds: self.bounds,
            payload: f(self.payload),
        }
    }
}

/// Ordered collection of intervals. Order is the insertion order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct IntervalSet<P> {
    intervals: Vec<Interval<P>>,
}

impl<P> Default for IntervalSet<P> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }
}

impl<P> IntervalSet<P> {
    pub fn new(intervals: Vec<Interval<P>>) -> Self {
        Self { intervals }
    }

    pub fn get_intervals(&self) -> &[Interval<P>] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval<P>> {
        self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval<P>> {
        self.intervals.iter()
    }
}

impl<P> FromIterator<Interval<P>> for IntervalSet<P> {
    fn from_iter<I: IntoIterator<Item = Interval<P>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, P> IntoIterator for &'a IntervalSet<P> {
    type Item = &'a Interval<P>;
    type IntoIter = std::slice::Iter<'a, Interval<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Interval sets keyed by video id, iterated in key order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct IntervalSetMapping<P> {
    sets: BTreeMap<VideoId, IntervalSet<P>>,
}

impl<P> Default for IntervalSetMapping<P> {
    fn default() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }
}

impl<P> IntervalSetMapping<P> {
    pub fn new(sets: BTreeMap<VideoId, IntervalSet<P>>) -> Self {
        Self { sets }
    }

    pub fn insert(&mut self, video_id: impl Into<VideoId>, set: IntervalSet<P>) {
        self.sets.insert(video_id.into(), set);
    }

    pub fn get(&self, video_id: &VideoId) -> Option<&IntervalSet<P>> {
        self.sets.get(video_id)
    }

    pub fn contains_key(&self, video_id: &VideoId) -> bool {
        self.sets.contains_key(video_id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &VideoId> {
        self.sets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VideoId, &IntervalSet<P>)> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<P> FromIterator<(VideoId, IntervalSet<P>)> for IntervalSetMapping<P> {
    fn from_iter<I: IntoIterator<Item = (VideoId, IntervalSet<P>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interval/set.rs"]
mod tests;
