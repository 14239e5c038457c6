//! Uncompressed baseline codec.
//!
//! Layout: magic `RAW1`, then width, height, bits per sample and component
//! count as little-endian `u32`, then the samples as little-endian `u16`.

use super::{Codec, FrameDecoder, FrameEncoder};
use crate::error::{Error, Result};
use crate::frame::FrameInfo;

const NAME: &str = "raw";
const MAGIC: &[u8; 4] = b"RAW1";
const HEADER_LEN: usize = 20;

/// Stores samples verbatim. Ratio is always slightly below 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

/// Encoder for [`RawCodec`].
pub struct RawEncoder<'a> {
    frame: FrameInfo,
    destination: &'a mut [u8],
}

/// Decoder for [`RawCodec`].
pub struct RawDecoder<'a> {
    payload: &'a [u8],
    sample_count: usize,
}

impl Codec for RawCodec {
    type Encoder<'a> = RawEncoder<'a>;
    type Decoder<'a> = RawDecoder<'a>;

    fn name(&self) -> &'static str {
        NAME
    }

    fn estimated_destination_size(&self, frame: &FrameInfo) -> Result<usize> {
        Ok(HEADER_LEN + frame.raw_size_bytes())
    }

    fn encoder<'a>(&self, frame: &FrameInfo, destination: &'a mut [u8]) -> Result<RawEncoder<'a>> {
        Ok(RawEncoder {
            frame: *frame,
            destination,
        })
    }

    fn decoder<'a>(&self, source: &'a [u8]) -> Result<RawDecoder<'a>> {
        if source.len() < HEADER_LEN || &source[..4] != MAGIC {
            return Err(Error::codec(NAME, "missing RAW1 header"));
        }
        let field = |i: usize| {
            let at = 4 + i * 4;
            u32::from_le_bytes([source[at], source[at + 1], source[at + 2], source[at + 3]])
        };
        let frame = FrameInfo::new(field(0), field(1), field(2) as i32, field(3) as i32)
            .map_err(|e| Error::codec(NAME, e))?;
        let payload = &source[HEADER_LEN..];
        if payload.len() != frame.raw_size_bytes() {
            return Err(Error::codec(
                NAME,
                format!(
                    "payload is {} bytes, header describes {}",
                    payload.len(),
                    frame.raw_size_bytes()
                ),
            ));
        }
        Ok(RawDecoder {
            payload,
            sample_count: frame.sample_count(),
        })
    }
}

impl FrameEncoder for RawEncoder<'_> {
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
        let total = HEADER_LEN + self.frame.raw_size_bytes();
        if self.destination.len() < total {
            return Err(Error::DestinationTooSmall {
                codec: NAME,
                capacity: self.destination.len(),
            });
        }

        let (header, body) = self.destination.split_at_mut(HEADER_LEN);
        header[..4].copy_from_slice(MAGIC);
        let fields = [
            self.frame.width,
            self.frame.height,
            self.frame.bits_per_sample as u32,
            self.frame.component_count as u32,
        ];
        for (slot, value) in header[4..].chunks_exact_mut(4).zip(fields) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        for (slot, sample) in body.chunks_exact_mut(2).zip(samples) {
            slot.copy_from_slice(&sample.to_le_bytes());
        }
        Ok(total)
    }
}

impl FrameDecoder for RawDecoder<'_> {
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
        for (sample, bytes) in destination.iter_mut().zip(self.payload.chunks_exact(2)) {
            *sample = u16::from_le_bytes([bytes[0], bytes[1]]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_round_trip() {
        let frame = FrameInfo::new(3, 2, 12, 1).unwrap();
        let samples = [0u16, 1, 4095, 17, 256, 3000];
        let codec = RawCodec;
        let mut encoded = vec![0u8; codec.estimated_destination_size(&frame).unwrap()];

        let size = codec.encoder(&frame, &mut encoded).unwrap().encode(&samples).unwrap();
        assert_eq!(size, encoded.len());

        let mut decoder = codec.decoder(&encoded[..size]).unwrap();
        assert_eq!(decoder.sample_count(), 6);
        let mut decoded = [0u16; 6];
        decoder.decode(&mut decoded).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_destination_too_small() {
        let frame = FrameInfo::new(4, 4, 8, 1).unwrap();
        let mut encoded = vec![0u8; 10];
        let err = RawCodec
            .encoder(&frame, &mut encoded)
            .unwrap()
            .encode(&[0u16; 16])
            .unwrap_err();
        assert!(matches!(err, Error::DestinationTooSmall { capacity: 10, .. }));
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_rejects_wrong_source_length() {
        let frame = FrameInfo::new(4, 4, 8, 1).unwrap();
        let mut encoded = vec![0u8; 64];
        let err = RawCodec
            .encoder(&frame, &mut encoded)
            .unwrap()
            .encode(&[0u16; 15])
            .unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { expected: 16, actual: 15, .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(RawCodec.decoder(b"not an image at all!!").is_err());
        assert!(RawCodec.decoder(b"RAW1").is_err());
    }
}
