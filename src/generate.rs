//! Deterministic synthetic test images.
//!
//! The workload is a smooth horizontal + vertical gradient with low-amplitude
//! noise on top, similar to sensor noise in raw camera data. It is neither
//! trivially compressible nor random, and it is bit-for-bit identical on
//! every platform for a given seed and frame. Compression ratios are only
//! comparable across runs because of that, so the recurrence and the bits
//! fed to the noise term must not change.

use crate::frame::FrameInfo;

/// Seed used for the benchmark workload.
pub const DEFAULT_SEED: u32 = 42;

/// Noise span: draws are reduced modulo this and re-centered, `[-32, 31]`.
const NOISE_SPAN: i32 = 64;

/// 32-bit linear congruential generator.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return its bits 16..=30.
    pub fn next_value(&mut self) -> i32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.state >> 16) & 0x7FFF) as i32
    }

    /// Noise term in `[-NOISE_SPAN / 2, NOISE_SPAN / 2 - 1]`.
    fn next_noise(&mut self) -> i32 {
        self.next_value() % NOISE_SPAN - NOISE_SPAN / 2
    }
}

/// Generate the gradient + noise test image for `frame`.
///
/// The result holds `frame.sample_count()` samples in row-major order with
/// components interleaved. Every sample lies in `0..=frame.max_value()`.
///
/// # Example
///
/// ```
/// use codec_bench::{FrameInfo, generate::{generate_test_image, DEFAULT_SEED}};
///
/// let frame = FrameInfo::new(8, 4, 12, 1).unwrap();
/// let image = generate_test_image(&frame, DEFAULT_SEED);
/// assert_eq!(image.len(), 32);
/// assert_eq!(&image[..4], &[0, 232, 516, 788]);
/// ```
#[must_use]
pub fn generate_test_image(frame: &FrameInfo, seed: u32) -> Vec<u16> {
    let width = u64::from(frame.width);
    let height = u64::from(frame.height);
    let max_value = i32::from(frame.max_value());
    let max_wide = max_value as u64;
    let components = frame.component_count as usize;

    let mut rng = Lcg::new(seed);
    let mut image = Vec::with_capacity(frame.sample_count());

    for y in 0..height {
        let vertical = y * max_wide / height;
        for x in 0..width {
            let gradient = ((x * max_wide / width + vertical) / 2) as i32;
            for _ in 0..components {
                let value = (gradient + rng.next_noise()).clamp(0, max_value);
                image.push(value as u16);
            }
        }
    }

    image
}
