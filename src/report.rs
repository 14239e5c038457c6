//! Benchmark report and its text and JSON renderings.
//!
//! The human-readable block layout and the `SUMMARY:` line are consumed by
//! regression tooling, so their structure is fixed: the summary line carries
//! `encode_median_ms`, `decode_median_ms`, `encode_MB_s`, `decode_MB_s` and
//! `ratio`, in that order, as space-separated `key=value` tokens.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::FrameInfo;
use crate::stats::TimingSummary;

/// Prefix of the machine-parsable summary line.
pub const SUMMARY_PREFIX: &str = "SUMMARY:";

const SUMMARY_KEYS: [&str; 5] = [
    "encode_median_ms",
    "decode_median_ms",
    "encode_MB_s",
    "decode_MB_s",
    "ratio",
];

/// Results of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// Codec identifier.
    pub codec: String,

    /// Layout of the test image.
    pub frame: FrameInfo,

    /// Iterations per phase.
    pub loop_count: usize,

    /// Size of the raw sample buffer in bytes.
    pub raw_size_bytes: usize,

    /// Encoded size from the last encode iteration.
    pub encoded_size: usize,

    /// Encode latency statistics (ms).
    pub encode: TimingSummary,

    /// Decode latency statistics (ms).
    pub decode: TimingSummary,

    /// Encode durations in iteration order (ms).
    pub encode_samples_ms: Vec<f64>,

    /// Decode durations in iteration order (ms).
    pub decode_samples_ms: Vec<f64>,

    /// When this report was generated.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl BenchReport {
    /// Raw size divided by encoded size.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        compression_ratio(self.raw_size_bytes, self.encoded_size)
    }

    /// The values carried by the `SUMMARY:` line.
    #[must_use]
    pub fn summary(&self) -> SummaryLine {
        SummaryLine {
            encode_median_ms: self.encode.median,
            decode_median_ms: self.decode.median,
            encode_mb_s: self.encode.median_mb_s(self.raw_size_bytes),
            decode_mb_s: self.decode.median_mb_s(self.raw_size_bytes),
            ratio: self.compression_ratio(),
        }
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// `raw / encoded`, or 0 when nothing was encoded.
#[must_use]
pub fn compression_ratio(raw_size_bytes: usize, encoded_size: usize) -> f64 {
    if encoded_size == 0 {
        0.0
    } else {
        raw_size_bytes as f64 / encoded_size as f64
    }
}

/// Workload banner printed before anything runs.
pub fn write_workload(
    out: &mut impl Write,
    codec: &str,
    frame: &FrameInfo,
    loop_count: usize,
) -> std::io::Result<()> {
    writeln!(out, "=== {} {} Benchmark ===", codec.to_uppercase(), frame.describe())?;
    writeln!(out, "Image: {}", frame.describe())?;
    writeln!(out, "Pixel count: {}", frame.pixel_count())?;
    writeln!(out, "Raw size: {} MiB", frame.raw_size_bytes() / (1024 * 1024))?;
    writeln!(out, "Loop count: {}", loop_count)?;
    writeln!(out)
}

/// Encoded size, ratio, and encode latency block.
pub fn write_encode_stats(
    out: &mut impl Write,
    raw_size_bytes: usize,
    encoded_size: usize,
    stats: &TimingSummary,
) -> std::io::Result<()> {
    let percent = if raw_size_bytes == 0 {
        0.0
    } else {
        encoded_size as f64 * 100.0 / raw_size_bytes as f64
    };
    writeln!(out, "  Encoded size: {} bytes ({:.2}%)", encoded_size, percent)?;
    writeln!(
        out,
        "  Compression ratio: {:.4}:1",
        compression_ratio(raw_size_bytes, encoded_size)
    )?;
    write_latency(out, "Encode", raw_size_bytes, stats)
}

/// Decode latency block.
pub fn write_decode_stats(
    out: &mut impl Write,
    raw_size_bytes: usize,
    stats: &TimingSummary,
) -> std::io::Result<()> {
    write_latency(out, "Decode", raw_size_bytes, stats)
}

fn write_latency(
    out: &mut impl Write,
    phase: &str,
    raw_size_bytes: usize,
    stats: &TimingSummary,
) -> std::io::Result<()> {
    let rows = [
        ("min:   ", stats.min, stats.min_mb_s(raw_size_bytes)),
        ("median:", stats.median, stats.median_mb_s(raw_size_bytes)),
        ("mean:  ", stats.mean, stats.mean_mb_s(raw_size_bytes)),
    ];
    for (label, millis, mb_s) in rows {
        writeln!(out, "  {} {} {:.3} ms ({:.2} MB/s)", phase, label, millis, mb_s)?;
    }
    writeln!(out)
}

/// The machine-parsable summary of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryLine {
    pub encode_median_ms: f64,
    pub decode_median_ms: f64,
    pub encode_mb_s: f64,
    pub decode_mb_s: f64,
    pub ratio: f64,
}

impl SummaryLine {
    /// Parse a `SUMMARY:` line. Keys must appear in the fixed order.
    ///
    /// # Example
    ///
    /// ```
    /// use codec_bench::report::SummaryLine;
    ///
    /// let line = "SUMMARY: encode_median_ms=1.5 decode_median_ms=2 encode_MB_s=40 decode_MB_s=30 ratio=2.5";
    /// let summary = SummaryLine::parse(line).unwrap();
    /// assert_eq!(summary.ratio, 2.5);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(SUMMARY_PREFIX)?;
        let mut values = [0.0; 5];
        let mut tokens = rest.split_whitespace();
        for (key, slot) in SUMMARY_KEYS.iter().zip(values.iter_mut()) {
            let (k, v) = tokens.next()?.split_once('=')?;
            if k != *key {
                return None;
            }
            *slot = v.parse().ok()?;
        }
        if tokens.next().is_some() {
            return None;
        }
        let [encode_median_ms, decode_median_ms, encode_mb_s, decode_mb_s, ratio] = values;
        Some(Self {
            encode_median_ms,
            decode_median_ms,
            encode_mb_s,
            decode_mb_s,
            ratio,
        })
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}={:.3} {}={:.3} {}={:.2} {}={:.2} {}={:.4}",
            SUMMARY_PREFIX,
            SUMMARY_KEYS[0],
            self.encode_median_ms,
            SUMMARY_KEYS[1],
            self.decode_median_ms,
            SUMMARY_KEYS[2],
            self.encode_mb_s,
            SUMMARY_KEYS[3],
            self.decode_mb_s,
            SUMMARY_KEYS[4],
            self.ratio,
        )
    }
}

mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
