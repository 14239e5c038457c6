//! # codec-bench
//!
//! Deterministic encode/decode round-trip benchmark for lossless image codecs
//! on large high bit depth images.
//!
//! The harness generates a reproducible synthetic image, times repeated
//! encode and decode calls through a [`Codec`] adapter, checks that the
//! round trip is bit-exact and reports latency, throughput and compression
//! ratio, ending with a single machine-parsable `SUMMARY:` line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codec_bench::{BenchConfig, BenchSession, PngCodec};
//!
//! let config = BenchConfig::builder().loop_count(3).build()?;
//! let report = BenchSession::new(config).run(&PngCodec, &mut std::io::stdout())?;
//! println!("ratio {:.3}", report.compression_ratio());
//! # Ok::<(), codec_bench::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types and their classification
//! - [`frame`]: Frame descriptor (dimensions, bit depth, components)
//! - [`generate`]: Deterministic gradient + noise test images
//! - [`stats`]: Timing and summary statistics
//! - [`codec`]: The codec adapter trait and the bundled adapters
//! - [`bench`]: The benchmark driver
//! - [`verify`]: Round-trip verification
//! - [`report`]: Text, summary line and JSON reports
//! - [`config`]: Run configuration

pub mod bench;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod generate;
pub mod report;
pub mod stats;
pub mod verify;

// Re-export commonly used types
pub use bench::{BenchSession, decode_phase, encode_phase};
#[cfg(feature = "png")]
pub use codec::PngCodec;
pub use codec::{Codec, FrameDecoder, FrameEncoder, RawCodec};
pub use config::BenchConfig;
pub use error::{Error, ErrorKind, Result};
pub use frame::FrameInfo;
pub use report::{BenchReport, SummaryLine};
pub use stats::{TimingSamples, TimingSummary};
pub use verify::{Verification, verify_round_trip};
