use crate::{
    foundation::error::{VGridError, VGridResult},
    layout::{block::IntervalBlock, format::VisFormat},
    spec::{
        database::{Database, VideoMetadata},
        envelope::CompressedSpec,
        settings::VGridSettings,
    },
};

/// Where a spec's blocks come from: an explicit list or a layout strategy.
pub enum BlockSource {
    Explicit(Vec<IntervalBlock>),
    Format(Box<dyn VisFormat>),
}

impl BlockSource {
    pub fn format(format: impl VisFormat + 'static) -> Self {
        Self::Format(Box::new(format))
    }
}

impl std::fmt::Debug for BlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(blocks) => f.debug_tuple("Explicit").field(&blocks.len()).finish(),
            Self::Format(_) => f.write_str("Format(..)"),
        }
    }
}

/// The document the widget consumes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncodedSpec {
    pub interval_blocks: Vec<IntervalBlock>,
    pub settings: VGridSettings,
    pub database: Database,
}

impl EncodedSpec {
    pub fn to_json_string(&self) -> VGridResult<String> {
        serde_json::to_string(self).map_err(|e| VGridError::serde(e.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> VGridResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VGridError::serde(e.to_string()))
    }
}

/// Video catalog, settings and blocks for one widget instance.
///
/// Every block's `video_id` should name a video in the catalog; this is not checked.
#[derive(Debug)]
pub struct VGridSpec {
    video_meta: Vec<VideoMetadata>,
    blocks: BlockSource,
    settings: VGridSettings,
}

impl VGridSpec {
    /// Fails with [`VGridError::Validation`] when `settings` do not validate.
    pub fn new(
        video_meta: Vec<VideoMetadata>,
        blocks: BlockSource,
        settings: VGridSettings,
    ) -> VGridResult<Self> {
        settings.validate()?;
        Ok(Self {
            video_meta,
            blocks,
            settings,
        })
    }

    /// Builder taking blocks and layout strategy as separate options.
    pub fn builder(video_meta: Vec<VideoMetadata>) -> VGridSpecBuilder {
        VGridSpecBuilder::new(video_meta)
    }

    pub fn videos(&self) -> &[VideoMetadata] {
        &self.video_meta
    }

    pub fn settings(&self) -> &VGridSettings {
        &self.settings
    }

    /// Resolve the blocks, running the layout strategy if there is one.
    pub fn interval_blocks(&self) -> VGridResult<Vec<IntervalBlock>> {
        match &self.blocks {
            BlockSource::Explicit(blocks) => Ok(blocks.clone()),
            BlockSource::Format(format) => format.interval_blocks(),
        }
    }

    #[tracing::instrument(skip(self), fields(videos = self.video_meta.len()))]
    pub fn encode(&self) -> VGridResult<EncodedSpec> {
        let interval_blocks = self.interval_blocks()?;
        tracing::debug!(blocks = interval_blocks.len(), "encoded spec");
        Ok(EncodedSpec {
            interval_blocks,
            settings: self.settings.clone(),
            database: Database {
                videos: self.video_meta.clone(),
            },
        })
    }

    /// Encode as a JSON value.
    pub fn to_json(&self) -> VGridResult<serde_json::Value> {
        let spec = self.encode()?;
        serde_json::to_value(&spec).map_err(|e| VGridError::serde(e.to_string()))
    }

    /// Encode, serialize to JSON text and deflate it into a [`CompressedSpec`].
    #[tracing::instrument(skip(self))]
    pub fn encode_compressed(&self) -> VGridResult<CompressedSpec> {
        let text = self.encode()?.to_json_string()?;
        let env = CompressedSpec::compress(&text)?;
        tracing::debug!(
            json_bytes = text.len(),
            compressed_bytes = env.data.len(),
            "compressed spec"
        );
        Ok(env)
    }
}

/// Builder for [`VGridSpec`].
pub struct VGridSpecBuilder {
    video_meta: Vec<VideoMetadata>,
    interval_blocks: Option<Vec<IntervalBlock>>,
    vis_format: Option<Box<dyn VisFormat>>,
    settings: VGridSettings,
}

impl VGridSpecBuilder {
    pub fn new(video_meta: Vec<VideoMetadata>) -> Self {
        Self {
            video_meta,
            interval_blocks: None,
            vis_format: None,
            settings: VGridSettings::default(),
        }
    }

    /// Show exactly these blocks.
    pub fn interval_blocks(mut self, blocks: Vec<IntervalBlock>) -> Self {
        self.interval_blocks = Some(blocks);
        self
    }

    /// Produce blocks with a layout strategy.
    pub fn vis_format(mut self, format: impl VisFormat + 'static) -> Self {
        self.vis_format = Some(Box::new(format));
        self
    }

    pub fn settings(mut self, settings: VGridSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Exactly one of blocks and layout strategy must have been given.
    pub fn build(self) -> VGridResult<VGridSpec> {
        let blocks = match (self.interval_blocks, self.vis_format) {
            (Some(blocks), None) => BlockSource::Explicit(blocks),
            (None, Some(format)) => BlockSource::Format(format),
            (Some(_), Some(_)) => {
                return Err(VGridError::configuration(
                    "interval_blocks and vis_format are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(VGridError::configuration(
                    "one of interval_blocks or vis_format must be set",
                ));
            }
        };
        VGridSpec::new(self.video_meta, blocks, self.settings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/vgrid.rs"]
mod tests;
