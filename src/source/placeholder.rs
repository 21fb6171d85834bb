//! Plain-text placeholder source
//!
//! Emits `FRAME_<n>_CAM_<id>` as UTF-8 instead of image data. Useful for
//! tests and for environments where no renderer is wanted.

use async_trait::async_trait;
use bytes::Bytes;

use super::{base_metadata, FrameSource, SourceError, SourceFrame, StreamConfig};

/// Frame source emitting a text marker per frame
#[derive(Debug, Clone, Default)]
pub struct TextPlaceholderSource;

impl TextPlaceholderSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FrameSource for TextPlaceholderSource {
    async fn produce_frame(
        &self,
        config: &StreamConfig,
        frame_number: u64,
    ) -> Result<SourceFrame, SourceError> {
        let text = format!("FRAME_{}_CAM_{}", frame_number, config.camera_id);

        Ok(SourceFrame {
            payload: Bytes::from(text),
            metadata: base_metadata(config, frame_number, "text"),
        })
    }

    fn kind(&self) -> &'static str {
        "text_placeholder"
    }
}
