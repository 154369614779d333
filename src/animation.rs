//! Per-element counter animation.

use crate::easing::{ease_out_cubic, lerp, progress};
use crate::{CounterOptions, ParsedNumber};

/// Lifecycle of a single counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterPhase {
    /// Registered, waiting for its trigger
    #[default]
    Idle,
    /// Counting towards the target on every frame
    Running,
    /// Final exact value has been rendered
    Done,
}

/// Timing and range of a counter animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Starting value
    pub from: f64,
    /// Target value (the parsed number)
    pub to: f64,
    /// Timestamp the animation began, in milliseconds
    pub start_ms: f64,
    /// Total animation length in milliseconds
    pub duration_ms: f64,
    /// Set once the counter has been triggered; never cleared
    pub has_run: bool,
}

/// A counter bound to one element's parsed text.
///
/// The caller drives timing: call [`CounterAnimation::start`] once, then
/// [`CounterAnimation::frame`] on every animation frame with the current
/// timestamp and write the returned text back to the element.
///
/// ## Example
///
/// ```rust
/// use ccreveal_core::{CounterAnimation, CounterOptions, CounterPhase, ParsedNumber};
///
/// let parsed = ParsedNumber::parse("1,234.56 users").unwrap();
/// let mut counter = CounterAnimation::new(parsed, &CounterOptions::default());
///
/// counter.start(0.0);
/// assert_eq!(counter.phase(), CounterPhase::Running);
///
/// assert_eq!(counter.frame(0.0).as_deref(), Some("0.00 users"));
/// assert_eq!(counter.frame(1200.0).as_deref(), Some("1,234.56 users"));
/// assert_eq!(counter.phase(), CounterPhase::Done);
/// assert_eq!(counter.frame(1300.0), None);
/// ```
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    parsed: ParsedNumber,
    state: AnimationState,
    phase: CounterPhase,
}

impl CounterAnimation {
    /// Create an idle counter counting from `options.from` to the parsed value.
    pub fn new(parsed: ParsedNumber, options: &CounterOptions) -> Self {
        let state = AnimationState {
            from: options.from,
            to: parsed.value,
            start_ms: 0.0,
            duration_ms: options.duration_ms,
            has_run: false,
        };
        Self {
            parsed,
            state,
            phase: CounterPhase::Idle,
        }
    }

    /// The number this counter was parsed from.
    #[inline]
    pub fn parsed(&self) -> &ParsedNumber {
        &self.parsed
    }

    /// Current timing state.
    #[inline]
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Whether the counter has already been triggered.
    #[inline]
    pub fn has_run(&self) -> bool {
        self.state.has_run
    }

    /// Begin counting at `now_ms`.
    ///
    /// Returns false (and changes nothing) if the counter already ran.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.state.has_run {
            return false;
        }
        self.state.has_run = true;
        self.state.start_ms = now_ms;
        self.phase = CounterPhase::Running;
        true
    }

    /// Jump straight to the final value without intermediate frames.
    ///
    /// Returns the text to write, or `None` if the counter already ran.
    pub fn finish(&mut self) -> Option<String> {
        if self.state.has_run {
            return None;
        }
        self.state.has_run = true;
        self.phase = CounterPhase::Done;
        Some(self.parsed.render_target())
    }

    /// Eased value at `now_ms` (not rounded).
    pub fn value_at(&self, now_ms: f64) -> f64 {
        let t = progress(self.state.start_ms, now_ms, self.state.duration_ms);
        lerp(self.state.from, self.state.to, ease_out_cubic(t))
    }

    /// Advance to `now_ms` and return the text to display.
    ///
    /// Returns `None` unless the counter is running. When the elapsed time
    /// reaches the duration, the exact target is rendered and the counter
    /// moves to [`CounterPhase::Done`].
    pub fn frame(&mut self, now_ms: f64) -> Option<String> {
        if self.phase != CounterPhase::Running {
            return None;
        }
        let t = progress(self.state.start_ms, now_ms, self.state.duration_ms);
        if t >= 1.0 {
            self.phase = CounterPhase::Done;
            return Some(self.parsed.render_target());
        }
        let current = lerp(self.state.from, self.state.to, ease_out_cubic(t));
        Some(self.parsed.render(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(text: &str, from: f64, duration_ms: f64) -> CounterAnimation {
        let parsed = ParsedNumber::parse(text).unwrap();
        CounterAnimation::new(parsed, &CounterOptions { from, duration_ms })
    }

    #[test]
    fn test_idle_does_not_render() {
        let mut ctr = counter("99%", 0.0, 1000.0);
        assert_eq!(ctr.phase(), CounterPhase::Idle);
        assert!(!ctr.has_run());
        assert_eq!(ctr.frame(500.0), None);
    }

    #[test]
    fn test_frames_follow_ease_out() {
        let mut ctr = counter("1000 pts", 0.0, 1000.0);
        ctr.start(100.0);

        // halfway in time: 1 - 0.5³ = 0.875
        assert_eq!(ctr.frame(600.0).as_deref(), Some("875 pts"));
        assert_eq!(ctr.phase(), CounterPhase::Running);
        assert_eq!(ctr.frame(1100.0).as_deref(), Some("1,000 pts"));
        assert_eq!(ctr.phase(), CounterPhase::Done);
    }

    #[test]
    fn test_final_frame_is_exact_target() {
        let mut ctr = counter("€12.345,67", 0.0, 1000.0);
        ctr.start(0.0);
        ctr.frame(400.0);
        // overshooting the duration still renders the exact target
        assert_eq!(ctr.frame(5000.0).as_deref(), Some("€12.345,67"));
    }

    #[test]
    fn test_counts_down_from_override() {
        let mut ctr = counter("10 left", 100.0, 1000.0);
        ctr.start(0.0);
        assert_eq!(ctr.frame(0.0).as_deref(), Some("100 left"));
        assert_eq!(ctr.frame(1000.0).as_deref(), Some("10 left"));
    }

    #[test]
    fn test_start_only_once() {
        let mut ctr = counter("500", 0.0, 1000.0);
        assert!(ctr.start(0.0));
        assert!(!ctr.start(800.0));
        assert_eq!(ctr.state().start_ms, 0.0);
        assert!(ctr.finish().is_none());
    }

    #[test]
    fn test_finish_skips_frames() {
        let mut ctr = counter("500 ms", 0.0, 1000.0);
        assert_eq!(ctr.finish().as_deref(), Some("500 ms"));
        assert_eq!(ctr.phase(), CounterPhase::Done);
        assert_eq!(ctr.frame(10.0), None);
        assert!(!ctr.start(20.0));
    }

    #[test]
    fn test_counting_down_below_zero_has_no_signed_zero() {
        let mut ctr = counter("-45 °C", 0.0, 1000.0);
        ctr.start(0.0);
        // -45 * (1 - 0.999³) ≈ -0.13, rounds to zero
        assert_eq!(ctr.frame(1.0).as_deref(), Some("0 °C"));
        assert_eq!(ctr.frame(1000.0).as_deref(), Some("-45 °C"));
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut ctr = counter("42", 0.0, 0.0);
        ctr.start(0.0);
        assert_eq!(ctr.frame(0.0).as_deref(), Some("42"));
        assert_eq!(ctr.phase(), CounterPhase::Done);
    }

    #[test]
    fn test_value_at() {
        let ctr = {
            let mut c = counter("200", 0.0, 1000.0);
            c.start(0.0);
            c
        };
        assert_eq!(ctr.value_at(0.0), 0.0);
        assert!((ctr.value_at(500.0) - 175.0).abs() < 1e-9);
        assert_eq!(ctr.value_at(2000.0), 200.0);
    }
}
