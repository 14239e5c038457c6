//! Frame descriptor: image layout independent of pixel content.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dimensions, bit depth and component count of an image.
///
/// Samples are stored one per `u16`, interleaved by component, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Significant bits per sample.
    pub bits_per_sample: i32,
    /// Number of interleaved components per pixel.
    pub component_count: i32,
}

impl FrameInfo {
    /// The fixed benchmark workload: 8K UHD, 12-bit, single component.
    pub const EIGHT_K_MONO_12: Self = Self {
        width: 7680,
        height: 4320,
        bits_per_sample: 12,
        component_count: 1,
    };

    /// Create a validated frame descriptor.
    pub fn new(width: u32, height: u32, bits_per_sample: i32, component_count: i32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidFrame(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !(2..=16).contains(&bits_per_sample) {
            return Err(Error::InvalidFrame(format!(
                "bits per sample must be in 2..=16, got {}",
                bits_per_sample
            )));
        }
        if !(1..=4).contains(&component_count) {
            return Err(Error::InvalidFrame(format!(
                "component count must be in 1..=4, got {}",
                component_count
            )));
        }
        Ok(Self {
            width,
            height,
            bits_per_sample,
            component_count,
        })
    }

    /// Largest representable sample value, `2^bits_per_sample - 1`.
    ///
    /// Depths outside `0..=16` (possible on a deserialized descriptor that
    /// skipped [`FrameInfo::new`]) saturate to `0` or `u16::MAX`.
    #[must_use]
    pub fn max_value(&self) -> u16 {
        let bits = u32::try_from(self.bits_per_sample).unwrap_or(0).min(16);
        ((1u32 << bits) - 1) as u16
    }

    /// Number of pixels (`width * height`).
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of samples across all components.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.pixel_count() * usize::try_from(self.component_count).unwrap_or(0)
    }

    /// Size of the raw sample buffer in bytes.
    #[must_use]
    pub fn raw_size_bytes(&self) -> usize {
        self.sample_count() * std::mem::size_of::<u16>()
    }

    /// Short human description, e.g. `7680x4320 12-bit mono`.
    #[must_use]
    pub fn describe(&self) -> String {
        let layout = match self.component_count {
            1 => "mono".to_string(),
            n => format!("{}-component", n),
        };
        format!(
            "{}x{} {}-bit {}",
            self.width, self.height, self.bits_per_sample, layout
        )
    }
}

impl Default for FrameInfo {
    fn default() -> Self {
        Self::EIGHT_K_MONO_12
    }
}
