use std::time::Instant;

/// Run `op` once and return its result with the elapsed wall-clock time in
/// fractional milliseconds.
///
/// Only the body of `op` is inside the timed window.
pub fn measure<T>(op: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let value = op();
    let elapsed = start.elapsed();
    (value, elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_measure_returns_value() {
        let (value, millis) = measure(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(millis >= 0.0);
    }

    #[test]
    fn test_measure_covers_op() {
        let (_, millis) = measure(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(millis >= 5.0);
    }
}
