//! Benchmark configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::frame::FrameInfo;
use crate::generate::DEFAULT_SEED;

/// Default number of encode and decode iterations.
pub const DEFAULT_LOOP_COUNT: usize = 10;

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Layout of the synthetic test image.
    pub frame: FrameInfo,

    /// Seed for the test image noise.
    pub seed: u32,

    /// Iterations per phase (encode, decode). Always at least 1.
    pub loop_count: usize,

    /// Where to write the JSON report after a successful run.
    pub report_path: Option<PathBuf>,
}

impl BenchConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::default()
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            frame: FrameInfo::EIGHT_K_MONO_12,
            seed: DEFAULT_SEED,
            loop_count: DEFAULT_LOOP_COUNT,
            report_path: None,
        }
    }
}

/// Builder for [`BenchConfig`].
#[derive(Debug, Default)]
pub struct BenchConfigBuilder {
    frame: Option<FrameInfo>,
    seed: Option<u32>,
    loop_count: Option<usize>,
    report_path: Option<PathBuf>,
}

impl BenchConfigBuilder {
    /// Set the test image layout.
    #[must_use]
    pub fn frame(mut self, frame: FrameInfo) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Set the noise seed.
    #[must_use]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of iterations per phase.
    #[must_use]
    pub fn loop_count(mut self, loop_count: usize) -> Self {
        self.loop_count = Some(loop_count);
        self
    }

    /// Write the JSON report to `path` after a successful run.
    #[must_use]
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Fails with [`Error::InvalidLoopCount`] if the loop count is zero.
    pub fn build(self) -> Result<BenchConfig> {
        let loop_count = self.loop_count.unwrap_or(DEFAULT_LOOP_COUNT);
        if loop_count == 0 {
            return Err(Error::InvalidLoopCount(loop_count.to_string()));
        }
        Ok(BenchConfig {
            frame: self.frame.unwrap_or_default(),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            loop_count,
            report_path: self.report_path,
        })
    }
}

/// Parse a loop count argument. Accepts positive integers only.
///
/// # Example
///
/// ```
/// use codec_bench::config::parse_loop_count;
///
/// assert_eq!(parse_loop_count("3").unwrap(), 3);
/// assert!(parse_loop_count("0").is_err());
/// assert!(parse_loop_count("-5").is_err());
/// ```
pub fn parse_loop_count(arg: &str) -> Result<usize> {
    match arg.trim().parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).map_err(|_| Error::InvalidLoopCount(arg.to_string())),
        _ => Err(Error::InvalidLoopCount(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = BenchConfig::builder().build().unwrap();
        assert_eq!(config.frame, FrameInfo::EIGHT_K_MONO_12);
        assert_eq!(config.seed, 42);
        assert_eq!(config.loop_count, 10);
        assert!(config.report_path.is_none());

        let default = BenchConfig::default();
        assert_eq!(default.loop_count, config.loop_count);
    }

    #[test]
    fn test_builder_overrides() {
        let frame = FrameInfo::new(64, 32, 10, 1).unwrap();
        let config = BenchConfig::builder()
            .frame(frame)
            .seed(7)
            .loop_count(3)
            .report_path("/tmp/report.json")
            .build()
            .unwrap();
        assert_eq!(config.frame, frame);
        assert_eq!(config.seed, 7);
        assert_eq!(config.loop_count, 3);
        assert_eq!(config.report_path, Some(PathBuf::from("/tmp/report.json")));
    }

    #[test]
    fn test_zero_loop_count_rejected() {
        let err = BenchConfig::builder().loop_count(0).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_parse_loop_count() {
        assert_eq!(parse_loop_count("1").unwrap(), 1);
        assert_eq!(parse_loop_count("25").unwrap(), 25);
        for bad in ["0", "-5", "abc", "", "1.5"] {
            let err = parse_loop_count(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Usage, "{bad:?}");
        }
    }
}
