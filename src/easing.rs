//! Pure easing and timing helpers for counter animations.
//!
//! Timestamps are plain milliseconds (as from `performance.now()`), so the
//! same math runs under a real frame clock and a fake one in tests.

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Animation progress in [0, 1] at `now_ms` for an animation started at `start_ms`.
///
/// A zero (or negative) duration is complete immediately.
#[inline]
pub fn progress(start_ms: f64, now_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    let ratio = (now_ms - start_ms) / duration_ms;
    if ratio.is_nan() {
        return 1.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_boundaries() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        // out of range input is clamped
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= prev, "not monotonic at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(100.0, 100.0, 1000.0), 0.0);
        assert!((progress(100.0, 600.0, 1000.0) - 0.5).abs() < 1e-12);
        assert_eq!(progress(100.0, 5000.0, 1000.0), 1.0);
        // clock behind start
        assert_eq!(progress(100.0, 50.0, 1000.0), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(10.0, 10.0, 0.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert_eq!(lerp(20.0, 10.0, 1.0), 10.0);
    }
}
