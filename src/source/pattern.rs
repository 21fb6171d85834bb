//! Synthetic test-pattern source
//!
//! Renders a binary PPM (`P6`) image with vertical color bars that shift
//! with the frame number, so consecutive frames are visibly distinct. PPM
//! needs no imaging dependency: a text header followed by raw RGB triples.

use async_trait::async_trait;
use bytes::Bytes;

use super::{base_metadata, FrameSource, SourceError, SourceFrame, StreamConfig};

const BAR_SPACING: u32 = 40;
const BAR_WIDTH: u32 = 20;

/// Frame source rendering a moving bar pattern
#[derive(Debug, Clone)]
pub struct TestPatternSource {
    width: u32,
    height: u32,
}

impl TestPatternSource {
    /// Create a source with the default 320x180 frame size
    ///
    /// PPM is uncompressed, so frame size drives buffer memory directly: a
    /// full 60s window at 25 fps holds 1500 frames (~260 MB at this size).
    pub fn new() -> Self {
        Self {
            width: 320,
            height: 180,
        }
    }

    /// Override the frame dimensions (clamped to at least 1x1)
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn render(&self, frame_number: u64) -> Bytes {
        let (w, h) = (self.width as usize, self.height as usize);
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);

        let mut pixels = vec![0u8; w * h * 3];

        // Dark background with a row-dependent tint
        for y in 0..h {
            let tint = (y * 40 / h.max(1)) as u8;
            for x in 0..w {
                let i = (y * w + x) * 3;
                pixels[i] = 20;
                pixels[i + 1] = 30 + tint;
                pixels[i + 2] = 40 + tint;
            }
        }

        // Vertical bars shifted by the frame number
        let shift = (frame_number * 2) as u32;
        for bar_start in (0..self.width).step_by(BAR_SPACING as usize) {
            let x0 = (bar_start + shift) % self.width;
            let intensity = (128 + 127 * bar_start / self.width.max(1)) as u8;
            for dx in 0..BAR_WIDTH {
                let x = ((x0 + dx) % self.width) as usize;
                for y in 0..h {
                    let i = (y * w + x) * 3;
                    pixels[i] = intensity;
                    pixels[i + 1] = 50;
                    pixels[i + 2] = 200u8.saturating_sub(intensity);
                }
            }
        }

        let mut data = Vec::with_capacity(header.len() + pixels.len());
        data.extend_from_slice(header.as_bytes());
        data.extend_from_slice(&pixels);
        Bytes::from(data)
    }
}

impl Default for TestPatternSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for TestPatternSource {
    async fn produce_frame(
        &self,
        config: &StreamConfig,
        frame_number: u64,
    ) -> Result<SourceFrame, SourceError> {
        Ok(SourceFrame {
            payload: self.render(frame_number),
            metadata: base_metadata(config, frame_number, "ppm"),
        })
    }

    fn kind(&self) -> &'static str {
        "test_pattern"
    }
}
