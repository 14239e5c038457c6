//! Codec adapters.
//!
//! The benchmark never looks inside a codec. It talks to one through the
//! [`Codec`] trait: size estimation, then a fresh [`FrameEncoder`] per encode
//! iteration and a fresh [`FrameDecoder`] per decode iteration. Building the
//! encoder or decoder happens outside the timed window; only
//! [`FrameEncoder::encode`] and [`FrameDecoder::decode`] are timed.
//!
//! Adapters:
//!
//! - [`PngCodec`]: 16-bit PNG via the `png` crate (feature `png`)
//! - [`RawCodec`]: uncompressed samples behind a small header, a baseline for
//!   harness overhead

#[cfg(feature = "png")]
mod png16;
mod raw;

#[cfg(feature = "png")]
pub use png16::{PngCodec, PngDecoder, PngEncoder};
pub use raw::{RawCodec, RawDecoder, RawEncoder};

use crate::error::Result;
use crate::frame::FrameInfo;

/// Encoder bound to one frame descriptor and one destination buffer.
pub trait FrameEncoder {
    /// Encode `samples` into the bound destination, returning the number of
    /// bytes written.
    fn encode(&mut self, samples: &[u16]) -> Result<usize>;
}

/// Decoder bound to one encoded byte stream whose header is already parsed.
pub trait FrameDecoder {
    /// Number of samples the stream decodes to.
    fn sample_count(&self) -> usize;

    /// Decode into `destination`, which must hold exactly
    /// [`sample_count`](Self::sample_count) samples.
    fn decode(&mut self, destination: &mut [u16]) -> Result<()>;
}

/// A lossless codec under benchmark.
pub trait Codec {
    /// Encoder type produced by [`Codec::encoder`].
    type Encoder<'a>: FrameEncoder;
    /// Decoder type produced by [`Codec::decoder`].
    type Decoder<'a>: FrameDecoder;

    /// Short identifier, used in reports and error messages.
    fn name(&self) -> &'static str;

    /// Upper bound on the encoded size for `frame`.
    ///
    /// Encoding any image of this frame never writes more than this.
    fn estimated_destination_size(&self, frame: &FrameInfo) -> Result<usize>;

    /// Configure an encoder for `frame` writing into `destination`.
    fn encoder<'a>(&self, frame: &FrameInfo, destination: &'a mut [u8]) -> Result<Self::Encoder<'a>>;

    /// Parse the header of `source` and return a decoder for it.
    fn decoder<'a>(&self, source: &'a [u8]) -> Result<Self::Decoder<'a>>;
}
