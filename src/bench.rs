//! Benchmark driver.
//!
//! [`BenchSession::run`] generates the test image once, runs the encode loop,
//! runs the decode loop, verifies the round trip and prints the report. The
//! two timed loops are also available as [`encode_phase`] and
//! [`decode_phase`], which borrow their buffers from the caller so the same
//! allocation is reused by every iteration.

use std::io::Write;

use tracing::{debug, info, trace};

use crate::codec::{Codec, FrameDecoder, FrameEncoder};
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::frame::FrameInfo;
use crate::generate::generate_test_image;
use crate::report::{self, BenchReport};
use crate::stats::{TimingSamples, TimingSummary, measure};
use crate::verify::verify_round_trip;

/// Output of the encode loop.
#[derive(Debug, Clone)]
pub struct EncodePhase {
    /// Size reported by the last iteration.
    pub encoded_size: usize,
    /// Per-iteration durations (ms).
    pub samples: TimingSamples,
}

/// Encode `image` `loop_count` times into `destination`.
///
/// Each iteration builds a fresh encoder bound to `frame` and `destination`,
/// then times only the encode call. The size returned by the last iteration
/// is the canonical encoded size. A reported size larger than `destination`
/// is an [`Error::DestinationTooSmall`].
pub fn encode_phase<C: Codec>(
    codec: &C,
    frame: &FrameInfo,
    image: &[u16],
    destination: &mut [u8],
    loop_count: usize,
) -> Result<EncodePhase> {
    let mut samples = TimingSamples::with_capacity(loop_count);
    let mut encoded_size = 0;
    let capacity = destination.len();

    for iteration in 0..loop_count {
        let mut encoder = codec.encoder(frame, destination)?;
        let (size, millis) = measure(|| encoder.encode(image));
        encoded_size = size?;
        if encoded_size > capacity {
            return Err(Error::DestinationTooSmall {
                codec: codec.name(),
                capacity,
            });
        }
        samples.push(millis);
        trace!(iteration, millis, encoded_size, "encode iteration");
    }

    Ok(EncodePhase {
        encoded_size,
        samples,
    })
}

/// Decode `encoded` `loop_count` times into `destination`.
///
/// Each iteration builds a fresh decoder over `encoded` (header parsing is
/// not timed), then times only the decode call.
pub fn decode_phase<C: Codec>(
    codec: &C,
    encoded: &[u8],
    destination: &mut [u16],
    loop_count: usize,
) -> Result<TimingSamples> {
    let mut samples = TimingSamples::with_capacity(loop_count);

    for iteration in 0..loop_count {
        let mut decoder = codec.decoder(encoded)?;
        let (result, millis) = measure(|| decoder.decode(destination));
        result?;
        samples.push(millis);
        trace!(iteration, millis, "decode iteration");
    }

    Ok(samples)
}

/// A configured benchmark run.
pub struct BenchSession {
    config: BenchConfig,
}

impl BenchSession {
    /// Create a new session.
    #[must_use]
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Configuration this session runs with.
    #[must_use]
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the full benchmark against `codec`, writing the human-readable
    /// report and the summary line to `out`.
    ///
    /// On a round-trip mismatch the diagnostics are written first and
    /// [`Error::Verification`] is returned.
    pub fn run<C: Codec>(&self, codec: &C, out: &mut impl Write) -> Result<BenchReport> {
        let frame = self.config.frame;
        let loop_count = self.config.loop_count;
        if loop_count == 0 {
            return Err(Error::InvalidLoopCount(loop_count.to_string()));
        }
        let raw_size_bytes = frame.raw_size_bytes();

        report::write_workload(out, codec.name(), &frame, loop_count)?;

        writeln!(
            out,
            "Generating synthetic {}-bit test image...",
            frame.bits_per_sample
        )?;
        let (image, millis) = measure(|| generate_test_image(&frame, self.config.seed));
        debug!(seed = self.config.seed, millis, "generated test image");

        let capacity = codec.estimated_destination_size(&frame)?;
        let mut encoded = vec![0u8; capacity];
        debug!(codec = codec.name(), capacity, "allocated encode destination");

        writeln!(out, "Running encode benchmark ({} iterations)...", loop_count)?;
        out.flush()?;
        let encode = encode_phase(codec, &frame, &image, &mut encoded, loop_count)?;
        let encoded_size = encode.encoded_size;
        let encode_stats = summarize(&encode.samples)?;
        debug!(encoded_size, median_ms = encode_stats.median, "encode phase done");
        report::write_encode_stats(out, raw_size_bytes, encoded_size, &encode_stats)?;

        writeln!(out, "Running decode benchmark ({} iterations)...", loop_count)?;
        out.flush()?;
        let mut decoded = vec![0u16; frame.sample_count()];
        let decode = decode_phase(codec, &encoded[..encoded_size], &mut decoded, loop_count)?;
        let decode_stats = summarize(&decode)?;
        debug!(median_ms = decode_stats.median, "decode phase done");
        report::write_decode_stats(out, raw_size_bytes, &decode_stats)?;

        write!(out, "Verifying round-trip correctness... ")?;
        let verification = verify_round_trip(&image, &decoded);
        verification.write_to(out)?;
        if !verification.passed() {
            out.flush()?;
            return Err(Error::Verification {
                mismatches: verification.mismatch_count,
                total: verification.total_samples,
            });
        }

        let bench_report = BenchReport {
            codec: codec.name().to_string(),
            frame,
            loop_count,
            raw_size_bytes,
            encoded_size,
            encode: encode_stats,
            decode: decode_stats,
            encode_samples_ms: encode.samples.as_slice().to_vec(),
            decode_samples_ms: decode.as_slice().to_vec(),
            timestamp: chrono::Utc::now(),
        };

        writeln!(out)?;
        writeln!(out, "{}", bench_report.summary())?;
        out.flush()?;

        if let Some(path) = &self.config.report_path {
            bench_report.write_json(path)?;
            info!(path = %path.display(), "wrote JSON report");
        }

        Ok(bench_report)
    }
}

fn summarize(samples: &TimingSamples) -> Result<TimingSummary> {
    samples
        .summarize()
        .ok_or_else(|| Error::InvalidLoopCount(samples.len().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RawCodec;

    fn small_frame() -> FrameInfo {
        FrameInfo::new(32, 16, 12, 1).unwrap()
    }

    #[test]
    fn test_encode_phase_reuses_destination() {
        let frame = small_frame();
        let image = generate_test_image(&frame, 42);
        let mut encoded = vec![0u8; RawCodec.estimated_destination_size(&frame).unwrap()];

        let phase = encode_phase(&RawCodec, &frame, &image, &mut encoded, 4).unwrap();
        assert_eq!(phase.samples.len(), 4);
        assert_eq!(phase.encoded_size, encoded.len());
        assert!(phase.samples.as_slice().iter().all(|&ms| ms >= 0.0));
    }

    #[test]
    fn test_decode_phase_fills_destination() {
        let frame = small_frame();
        let image = generate_test_image(&frame, 42);
        let mut encoded = vec![0u8; RawCodec.estimated_destination_size(&frame).unwrap()];
        let phase = encode_phase(&RawCodec, &frame, &image, &mut encoded, 1).unwrap();

        let mut decoded = vec![0u16; frame.sample_count()];
        let samples =
            decode_phase(&RawCodec, &encoded[..phase.encoded_size], &mut decoded, 3).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_encode_phase_propagates_codec_error() {
        let frame = small_frame();
        let image = generate_test_image(&frame, 42);
        let mut encoded = vec![0u8; 8];
        let err = encode_phase(&RawCodec, &frame, &image, &mut encoded, 2).unwrap_err();
        assert!(matches!(err, Error::DestinationTooSmall { .. }));
    }

    #[test]
    fn test_run_rejects_zero_loops() {
        let config = BenchConfig {
            frame: small_frame(),
            loop_count: 0,
            ..BenchConfig::default()
        };
        let mut out = Vec::new();
        let err = BenchSession::new(config).run(&RawCodec, &mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidLoopCount(_)));
        assert!(out.is_empty());
    }
}
