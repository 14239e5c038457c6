//! Round-trip verification.

use std::io::Write;

/// Number of individual mismatches kept for the diagnostic dump.
pub const MAX_REPORTED_MISMATCHES: usize = 5;

/// One differing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// Sample index.
    pub index: usize,
    /// Value in the source image.
    pub expected: u16,
    /// Value after the round trip.
    pub actual: u16,
}

/// Outcome of comparing the source image with the decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// First mismatches in index order, at most [`MAX_REPORTED_MISMATCHES`].
    pub first_mismatches: Vec<Mismatch>,
    /// Total number of differing samples.
    pub mismatch_count: usize,
    /// Number of samples compared.
    pub total_samples: usize,
}

impl Verification {
    /// True when every sample matched.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatch_count == 0
    }

    /// Write `PASS`, or `FAIL` followed by the mismatch dump.
    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.passed() {
            return writeln!(out, "PASS");
        }
        writeln!(out, "FAIL")?;
        for m in &self.first_mismatches {
            writeln!(
                out,
                "  Mismatch at index {}: expected {}, got {}",
                m.index, m.expected, m.actual
            )?;
        }
        writeln!(
            out,
            "  Total mismatches: {} / {}",
            self.mismatch_count, self.total_samples
        )
    }
}

/// Compare `expected` and `actual` element by element.
///
/// A length difference counts every sample past the shorter buffer as a
/// mismatch against 0.
#[must_use]
pub fn verify_round_trip(expected: &[u16], actual: &[u16]) -> Verification {
    let total_samples = expected.len().max(actual.len());
    let mut first_mismatches = Vec::new();
    let mut mismatch_count = 0;

    if expected == actual {
        return Verification {
            first_mismatches,
            mismatch_count,
            total_samples,
        };
    }

    for index in 0..total_samples {
        let e = expected.get(index).copied().unwrap_or(0);
        let a = actual.get(index).copied().unwrap_or(0);
        let in_both = index < expected.len() && index < actual.len();
        if e != a || !in_both {
            if first_mismatches.len() < MAX_REPORTED_MISMATCHES {
                first_mismatches.push(Mismatch {
                    index,
                    expected: e,
                    actual: a,
                });
            }
            mismatch_count += 1;
        }
    }

    Verification {
        first_mismatches,
        mismatch_count,
        total_samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_passes() {
        let image: Vec<u16> = (0..100).collect();
        let result = verify_round_trip(&image, &image.clone());
        assert!(result.passed());
        assert_eq!(result.total_samples, 100);

        let mut out = Vec::new();
        result.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "PASS\n");
    }

    #[test]
    fn test_two_corrupted_samples() {
        let image: Vec<u16> = (0..1000).map(|i| (i % 4096) as u16).collect();
        let mut decoded = image.clone();
        decoded[10] = 4095;
        decoded[20] = 0;

        let result = verify_round_trip(&image, &decoded);
        assert!(!result.passed());
        assert_eq!(result.mismatch_count, 2);
        assert_eq!(
            result.first_mismatches,
            vec![
                Mismatch { index: 10, expected: 10, actual: 4095 },
                Mismatch { index: 20, expected: 20, actual: 0 },
            ]
        );

        let mut out = Vec::new();
        result.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("FAIL\n"));
        assert!(text.contains("Mismatch at index 10: expected 10, got 4095"));
        assert!(text.contains("Mismatch at index 20: expected 20, got 0"));
        assert!(text.contains("Total mismatches: 2 / 1000"));
    }

    #[test]
    fn test_dump_is_bounded() {
        let image = vec![1u16; 50];
        let decoded = vec![2u16; 50];
        let result = verify_round_trip(&image, &decoded);
        assert_eq!(result.mismatch_count, 50);
        assert_eq!(result.first_mismatches.len(), MAX_REPORTED_MISMATCHES);
        assert_eq!(result.first_mismatches[4].index, 4);

        let mut out = Vec::new();
        result.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Mismatch at index").count(), 5);
        assert!(text.contains("Total mismatches: 50 / 50"));
    }

    #[test]
    fn test_length_difference_counts() {
        let result = verify_round_trip(&[1, 2, 3], &[1, 2]);
        assert_eq!(result.mismatch_count, 1);
        assert_eq!(result.total_samples, 3);
        assert_eq!(result.first_mismatches[0], Mismatch { index: 2, expected: 3, actual: 0 });
    }
}
