//! 16-bit PNG adapter.
//!
//! Samples up to 16 bits are written as a 16-bit PNG (gray, gray+alpha, RGB
//! or RGBA by component count) with the encoder's default compression. PNG
//! stores 16-bit samples big-endian; the byte swap is part of the timed
//! encode and decode calls.

use std::io::{Cursor, ErrorKind as IoErrorKind};

use png::{BitDepth, ColorType, EncodingError, Transformations};

use super::{Codec, FrameDecoder, FrameEncoder};
use crate::error::{Error, Result};
use crate::frame::FrameInfo;

const NAME: &str = "png";

// Signature, IHDR and IEND chunks.
const FIXED_OVERHEAD: usize = 8 + 25 + 12;
// Length, type and CRC around each IDAT chunk.
const CHUNK_OVERHEAD: usize = 12;
// Budget one IDAT header per this many compressed bytes.
const MIN_IDAT_CHUNK: usize = 8 * 1024;

/// Lossless 16-bit PNG codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

/// Encoder for [`PngCodec`].
pub struct PngEncoder<'a> {
    frame: FrameInfo,
    color: ColorType,
    destination: &'a mut [u8],
    scratch: Vec<u8>,
}

/// Decoder for [`PngCodec`].
pub struct PngDecoder<'a> {
    reader: png::Reader<Cursor<&'a [u8]>>,
    sample_count: usize,
    scratch: Vec<u8>,
}

fn color_type(components: i32) -> Result<ColorType> {
    match components {
        1 => Ok(ColorType::Grayscale),
        2 => Ok(ColorType::GrayscaleAlpha),
        3 => Ok(ColorType::Rgb),
        4 => Ok(ColorType::Rgba),
        n => Err(Error::codec(NAME, format!("unsupported component count {}", n))),
    }
}

fn encoding_error(err: EncodingError, capacity: usize) -> Error {
    match err {
        EncodingError::IoError(io) if io.kind() == IoErrorKind::WriteZero => {
            Error::DestinationTooSmall {
                codec: NAME,
                capacity,
            }
        }
        other => Error::codec(NAME, other),
    }
}

impl Codec for PngCodec {
    type Encoder<'a> = PngEncoder<'a>;
    type Decoder<'a> = PngDecoder<'a>;

    fn name(&self) -> &'static str {
        NAME
    }

    /// Worst case: every filtered row expanded by fixed-Huffman coding
    /// (9 bits per byte), zlib framing, one IDAT header per chunk.
    fn estimated_destination_size(&self, frame: &FrameInfo) -> Result<usize> {
        color_type(frame.component_count)?;
        let row_bytes = 1 + frame.width as usize * frame.component_count as usize * 2;
        let filtered = row_bytes * frame.height as usize;
        let deflated = filtered + filtered / 8 + 64;
        let chunks = deflated / MIN_IDAT_CHUNK + 1;
        Ok(FIXED_OVERHEAD + deflated + chunks * CHUNK_OVERHEAD)
    }

    fn encoder<'a>(&self, frame: &FrameInfo, destination: &'a mut [u8]) -> Result<PngEncoder<'a>> {
        Ok(PngEncoder {
            frame: *frame,
            color: color_type(frame.component_count)?,
            destination,
            scratch: vec![0u8; frame.raw_size_bytes()],
        })
    }

    fn decoder<'a>(&self, source: &'a [u8]) -> Result<PngDecoder<'a>> {
        let mut decoder = png::Decoder::new(Cursor::new(source));
        decoder.set_transformations(Transformations::IDENTITY);
        let reader = decoder.read_info().map_err(|e| Error::codec(NAME, e))?;

        let info = reader.info();
        if info.bit_depth != BitDepth::Sixteen {
            return Err(Error::codec(
                NAME,
                format!("expected 16-bit samples, found {:?}", info.bit_depth),
            ));
        }
        let sample_count = info.width as usize * info.height as usize * info.color_type.samples();

        Ok(PngDecoder {
            reader,
            sample_count,
            scratch: vec![0u8; sample_count * 2],
        })
    }
}

impl FrameEncoder for PngEncoder<'_> {
    fn encode(&mut self, samples: &[u16]) -> Result<usize> {
        let expected = self.frame.sample_count();
        if samples.len() != expected {
            return Err(Error::SizeMismatch {
                codec: NAME,
                what: "source",
                expected,
                actual: samples.len(),
            });
        }
        for (slot, sample) in self.scratch.chunks_exact_mut(2).zip(samples) {
            slot.copy_from_slice(&sample.to_be_bytes());
        }

        let capacity = self.destination.len();
        let mut cursor = Cursor::new(&mut *self.destination);
        let mut encoder = png::Encoder::new(&mut cursor, self.frame.width, self.frame.height);
        encoder.set_color(self.color);
        encoder.set_depth(BitDepth::Sixteen);

        let mut writer = encoder
            .write_header()
            .map_err(|e| encoding_error(e, capacity))?;
        writer
            .write_image_data(&self.scratch)
            .map_err(|e| encoding_error(e, capacity))?;
        writer.finish().map_err(|e| encoding_error(e, capacity))?;

        Ok(cursor.position() as usize)
    }
}

impl FrameDecoder for PngDecoder<'_> {
    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn decode(&mut self, destination: &mut [u16]) -> Result<()> {
        if destination.len() != self.sample_count {
            return Err(Error::SizeMismatch {
                codec: NAME,
                what: "destination",
                expected: self.sample_count,
                actual: destination.len(),
            });
        }
        self.reader
            .next_frame(&mut self.scratch)
            .map_err(|e| Error::codec(NAME, e))?;
        for (sample, bytes) in destination.iter_mut().zip(self.scratch.chunks_exact(2)) {
            *sample = u16::from_be_bytes([bytes[0], bytes[1]]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{DEFAULT_SEED, generate_test_image};

    fn round_trip(frame: &FrameInfo) -> (Vec<u16>, Vec<u16>, usize) {
        let image = generate_test_image(frame, DEFAULT_SEED);
        let codec = PngCodec;
        let mut encoded = vec![0u8; codec.estimated_destination_size(frame).unwrap()];
        let size = codec.encoder(frame, &mut encoded).unwrap().encode(&image).unwrap();
        assert!(size <= encoded.len());

        let mut decoder = codec.decoder(&encoded[..size]).unwrap();
        let mut decoded = vec![0u16; decoder.sample_count()];
        decoder.decode(&mut decoded).unwrap();
        (image, decoded, size)
    }

    #[test]
    fn test_mono_round_trip() {
        let frame = FrameInfo::new(64, 48, 12, 1).unwrap();
        let (image, decoded, size) = round_trip(&frame);
        assert_eq!(image, decoded);
        assert!(size < frame.raw_size_bytes());
    }

    #[test]
    fn test_rgb_round_trip() {
        let frame = FrameInfo::new(17, 9, 16, 3).unwrap();
        let (image, decoded, _) = round_trip(&frame);
        assert_eq!(image, decoded);
    }

    #[test]
    fn test_estimate_bounds_incompressible_data() {
        let frame = FrameInfo::new(128, 64, 16, 1).unwrap();
        let mut state = 0x1234_5678u32;
        let noise: Vec<u16> = (0..frame.sample_count())
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u16
            })
            .collect();
        let codec = PngCodec;
        let mut encoded = vec![0u8; codec.estimated_destination_size(&frame).unwrap()];
        let size = codec.encoder(&frame, &mut encoded).unwrap().encode(&noise).unwrap();
        assert!(size <= encoded.len());
    }

    #[test]
    fn test_destination_too_small() {
        let frame = FrameInfo::new(32, 32, 12, 1).unwrap();
        let image = generate_test_image(&frame, DEFAULT_SEED);
        let mut encoded = vec![0u8; 64];
        let err = PngCodec
            .encoder(&frame, &mut encoded)
            .unwrap()
            .encode(&image)
            .unwrap_err();
        assert!(matches!(err, Error::DestinationTooSmall { capacity: 64, .. }));
    }

    #[test]
    fn test_decode_rejects_wrong_destination() {
        let frame = FrameInfo::new(8, 8, 12, 1).unwrap();
        let image = generate_test_image(&frame, DEFAULT_SEED);
        let mut encoded = vec![0u8; PngCodec.estimated_destination_size(&frame).unwrap()];
        let size = PngCodec.encoder(&frame, &mut encoded).unwrap().encode(&image).unwrap();
        let mut decoder = PngCodec.decoder(&encoded[..size]).unwrap();
        let mut short = vec![0u16; 63];
        assert!(matches!(
            decoder.decode(&mut short),
            Err(Error::SizeMismatch { expected: 64, actual: 63, .. })
        ));
    }

    #[test]
    fn test_decoder_rejects_garbage() {
        assert!(PngCodec.decoder(b"definitely not a png").is_err());
    }
}
