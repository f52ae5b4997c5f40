use std::path::Path;

use crate::foundation::{
    core::VideoId,
    error::{VGridError, VGridResult},
};

/// Technical metadata of one video in the catalog.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoMetadata {
    pub id: VideoId,
    pub path: String,
    pub num_frames: u64,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoMetadata {
    pub fn new(
        id: impl Into<VideoId>,
        path: impl Into<String>,
        fps: f64,
        num_frames: u64,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            num_frames,
            fps,
            width,
            height,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.num_frames as f64 / self.fps
    }

    /// Read width, height, frame rate and frame count of a local file with `ffprobe`.
    ///
    /// Requires `ffprobe` on `PATH`. Failures are reported verbatim as [`VGridError::Probe`].
    #[tracing::instrument(skip(id))]
    pub fn probe(path: &Path, id: impl Into<VideoId>) -> VGridResult<Self> {
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
            r_frame_rate: Option<String>,
            nb_frames: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            streams: Vec<ProbeStream>,
        }

        if !path.is_file() {
            return Err(VGridError::probe(format!(
                "local video path '{}' does not exist and video metadata was not given",
                path.display()
            )));
        }

        let out = std::process::Command::new("ffprobe")
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|e| VGridError::probe(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(VGridError::probe(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
            .map_err(|e| VGridError::probe(format!("ffprobe json parse failed: {e}")))?;
        let stream = parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| VGridError::probe("no video stream found"))?;

        let width = stream
            .width
            .ok_or_else(|| VGridError::probe("missing video width from ffprobe"))?;
        let height = stream
            .height
            .ok_or_else(|| VGridError::probe("missing video height from ffprobe"))?;
        let (num, den) = parse_ff_ratio(stream.r_frame_rate.as_deref().unwrap_or("0/1"))
            .ok_or_else(|| VGridError::probe("invalid video r_frame_rate"))?;
        let num_frames = stream
            .nb_frames
            .as_deref()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| VGridError::probe("missing nb_frames from ffprobe"))?;

        Ok(Self {
            id: id.into(),
            path: path.display().to_string(),
            num_frames,
            fps: f64::from(num) / f64::from(den),
            width,
            height,
        })
    }
}

/// Parse an ffprobe `num/den` ratio; rejects zero parts.
pub(crate) fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.split_once('/')?;
    let num = a.trim().parse::<u32>().ok()?;
    let den = b.trim().parse::<u32>().ok()?;
    if num == 0 || den == 0 {
        return None;
    }
    Some((num, den))
}

/// Video table shipped next to the interval blocks.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Database {
    pub videos: Vec<VideoMetadata>,
}

#[cfg(test)]
#[path = "../../tests/unit/spec/database.rs"]
mod tests;
