//! Keypoint graphs and the OpenPose skeleton assembler.
//!
//! A graph is an indexed set of 2D points with confidence scores plus a colored edge list. The
//! assembler stitches body, face and hand poses into one graph, assigning node indices in a single
//! increasing sequence: body, then face, then left hand, then right hand. Each part's edge template
//! is shifted by the node count at the time that part is appended, and an absent part reserves no
//! index space.

use std::collections::BTreeMap;

use crate::foundation::error::{VGridError, VGridResult};

/// A single keypoint. Encoded as `[x, y, score]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct KeypointNode {
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

impl KeypointNode {
    pub fn new(x: f64, y: f64, score: f64) -> Self {
        Self { x, y, score }
    }
}

impl From<[f64; 3]> for KeypointNode {
    fn from([x, y, score]: [f64; 3]) -> Self {
        Self { x, y, score }
    }
}

impl From<KeypointNode> for [f64; 3] {
    fn from(n: KeypointNode) -> Self {
        [n.x, n.y, n.score]
    }
}

/// A colored edge between two node indices. Encoded as `[start, end, color]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(u32, u32, String)", into = "(u32, u32, String)")]
pub struct KeypointEdge {
    pub start: u32,
    pub end: u32,
    pub color: String,
}

impl From<(u32, u32, String)> for KeypointEdge {
    fn from((start, end, color): (u32, u32, String)) -> Self {
        Self { start, end, color }
    }
}

impl From<KeypointEdge> for (u32, u32, String) {
    fn from(e: KeypointEdge) -> Self {
        (e.start, e.end, e.color)
    }
}

/// Validated keypoint graph: every edge endpoint is a node index.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Keypoints {
    keypoints: BTreeMap<u32, KeypointNode>,
    edges: Vec<KeypointEdge>,
}

impl Keypoints {
    /// Build a graph, failing with [`VGridError::KeypointIndex`] on a dangling edge.
    pub fn new(
        keypoints: BTreeMap<u32, KeypointNode>,
        edges: Vec<KeypointEdge>,
    ) -> VGridResult<Self> {
        for (i, edge) in edges.iter().enumerate() {
            for endpoint in [edge.start, edge.end] {
                if !keypoints.contains_key(&endpoint) {
                    return Err(VGridError::keypoint_index(format!(
                        "edge {i} ({} -> {}) references missing node {endpoint} ({} nodes)",
                        edge.start,
                        edge.end,
                        keypoints.len()
                    )));
                }
            }
        }
        Ok(Self { keypoints, edges })
    }

    pub fn nodes(&self) -> &BTreeMap<u32, KeypointNode> {
        &self.keypoints
    }

    pub fn edges(&self) -> &[KeypointEdge] {
        &self.edges
    }

    /// Assemble a skeleton from OpenPose outputs.
    ///
    /// `body_pose` holds the 18 COCO body points. Empty face/hand slices are skipped; a non-empty
    /// part must have exactly its template's point count (68 face, 21 per hand) or assembly fails
    /// with [`VGridError::KeypointIndex`]. With `show_left_right`, edges touching the left side of
    /// the body get a distinct color.
    pub fn from_openpose(
        body_pose: &[KeypointNode],
        show_left_right: bool,
        face_pose: &[KeypointNode],
        hand_left_pose: &[KeypointNode],
        hand_right_pose: &[KeypointNode],
    ) -> VGridResult<Self> {
        let mut graph = GraphBuilder::default();

        let offset = graph.push_nodes("body", body_pose, POSE_POINTS)?;
        for &(a, b) in POSE_PAIRS {
            let left = POSE_LEFT.contains(&a) || POSE_LEFT.contains(&b);
            let color = if show_left_right && left {
                POSE_LEFT_COLOR
            } else {
                POSE_COLOR
            };
            graph.push_edge(offset, a, b, color);
        }

        if !face_pose.is_empty() {
            let offset = graph.push_nodes("face", face_pose, FACE_POINTS)?;
            for &(a, b) in FACE_PAIRS {
                graph.push_edge(offset, a, b, FACE_COLOR);
            }
        }

        for (part, hand_pose, color) in [
            ("left hand", hand_left_pose, HAND_LEFT_COLOR),
            ("right hand", hand_right_pose, HAND_RIGHT_COLOR),
        ] {
            if hand_pose.is_empty() {
                continue;
            }
            let offset = graph.push_nodes(part, hand_pose, HAND_POINTS)?;
            for &(a, b) in HAND_PAIRS {
                graph.push_edge(offset, a, b, color);
            }
        }

        tracing::debug!(
            nodes = graph.keypoints.len(),
            edges = graph.edges.len(),
            "assembled openpose keypoints"
        );
        Self::new(graph.keypoints, graph.edges)
    }
}

#[derive(Default)]
struct GraphBuilder {
    keypoints: BTreeMap<u32, KeypointNode>,
    edges: Vec<KeypointEdge>,
}

impl GraphBuilder {
    /// Append exactly `count` points at the current node count; returns that offset.
    fn push_nodes(&mut self, part: &str, pose: &[KeypointNode], count: u32) -> VGridResult<u32> {
        if pose.len() != count as usize {
            return Err(VGridError::keypoint_index(format!(
                "{part} pose has {} points, expected {count}",
                pose.len()
            )));
        }
        let offset = self.keypoints.len() as u32;
        for (i, node) in (0..count).zip(pose) {
            self.keypoints.insert(offset + i, *node);
        }
        Ok(offset)
    }

    fn push_edge(&mut self, offset: u32, a: u32, b: u32, color: &str) {
        self.edges.push(KeypointEdge {
            start: offset + a,
            end: offset + b,
            color: color.to_owned(),
        });
    }
}

#[derive(serde::Deserialize)]
pub(crate) struct KeypointsRepr {
    pub(crate) keypoints: BTreeMap<u32, KeypointNode>,
    pub(crate) edges: Vec<KeypointEdge>,
}

impl<'de> serde::Deserialize<'de> for Keypoints {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = <KeypointsRepr as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(repr.keypoints, repr.edges).map_err(serde::de::Error::custom)
    }
}

const POSE_COLOR: &str = "rgb(255, 60, 60)";
const POSE_LEFT_COLOR: &str = "rgb(23, 166, 250)";
const FACE_COLOR: &str = "rgb(240, 240, 240)";
const HAND_LEFT_COLOR: &str = "rgb(233, 255, 49)";
const HAND_RIGHT_COLOR: &str = "rgb(95, 231, 118)";

const POSE_POINTS: u32 = 18;
const POSE_PAIRS: &[(u32, u32)] = &[
    (1, 2),
    (1, 5),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (1, 8),
    (8, 9),
    (9, 10),
    (1, 11),
    (11, 12),
    (12, 13),
    (1, 0),
    (0, 14),
    (14, 16),
    (0, 15),
    (15, 17),
];
const POSE_LEFT: &[u32] = &[2, 3, 4, 8, 9, 10, 14, 16];

const FACE_POINTS: u32 = 68;
#[rustfmt::skip]
const FACE_PAIRS: &[(u32, u32)] = &[
    // jaw
    (0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 8), (8, 9), (9, 10),
    (10, 11), (11, 12), (12, 13), (13, 14), (14, 15), (15, 16),
    // brows
    (17, 18), (18, 19), (19, 20), (20, 21),
    (22, 23), (23, 24), (24, 25), (25, 26),
    // nose
    (27, 28), (28, 29), (29, 30),
    (31, 32), (32, 33), (33, 34), (34, 35),
    // eyes
    (36, 37), (37, 38), (38, 39), (39, 40), (40, 41), (41, 36),
    (42, 43), (43, 44), (44, 45), (45, 46), (46, 47), (47, 42),
    // outer lips
    (48, 49), (49, 50), (50, 51), (51, 52), (52, 53), (53, 54), (54, 55),
    (55, 56), (56, 57), (57, 58), (58, 59), (59, 48),
    // inner lips
    (60, 61), (61, 62), (62, 63), (63, 64), (64, 65), (65, 66), (66, 67), (67, 60),
];

const HAND_POINTS: u32 = 21;
#[rustfmt::skip]
const HAND_PAIRS: &[(u32, u32)] = &[
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (0, 9), (9, 10), (10, 11), (11, 12),
    (0, 13), (13, 14), (14, 15), (15, 16),
    (0, 17), (17, 18), (18, 19), (19, 20),
];

#[cfg(test)]
#[path = "../../tests/unit/annotation/keypoints.rs"]
mod tests;
