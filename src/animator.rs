//! Orchestration of many counters over a shared frame loop.
//!
//! The animator owns one [`CounterAnimation`] per element identity and never
//! touches the platform directly: time, frame scheduling and text writes go
//! through a [`FrameHost`]. Parse failures, ineligible elements and repeat
//! triggers are reported as [`Trigger::Skipped`] values, never as errors.

use std::collections::HashMap;
use std::hash::Hash;

use crate::animation::{CounterAnimation, CounterPhase};
use crate::parser::{parse_number, ParseError};
use crate::CounterOptions;

/// Platform capabilities the animator needs.
pub trait FrameHost<K> {
    /// Current timestamp in milliseconds.
    fn now_ms(&self) -> f64;
    /// Ask for [`CounterAnimator::on_frame`] to be called before the next repaint.
    fn request_frame(&mut self);
    /// Replace the displayed text of element `key`.
    fn set_text(&mut self, key: &K, text: &str);
}

/// Why a counter was left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Element has neither `data-from` nor `data-count`
    NotOptedIn,
    /// Text contains no digits
    NoNumberFound,
    /// Numeral could not be converted to a finite number
    UnparsableNumber,
    /// Counter was already triggered
    AlreadyRan,
    /// Element was never registered
    Unknown,
}

impl From<&ParseError> for SkipReason {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::NoNumberFound => SkipReason::NoNumberFound,
            ParseError::UnparsableNumber { .. } => SkipReason::UnparsableNumber,
        }
    }
}

/// Outcome of registering or triggering a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Registered and waiting for a trigger
    Registered,
    /// Animation started; frames will follow
    Started,
    /// Final value written at once (reduced motion)
    Completed,
    /// Nothing happened
    Skipped(SkipReason),
}

/// Drives counter animations for a set of elements identified by `K`.
///
/// ## Example
///
/// ```rust
/// use ccreveal_core::{CounterAnimator, FrameHost, Trigger};
///
/// #[derive(Default)]
/// struct Page { now: f64, frame_requested: bool, text: String }
///
/// impl FrameHost<u32> for Page {
///     fn now_ms(&self) -> f64 { self.now }
///     fn request_frame(&mut self) { self.frame_requested = true; }
///     fn set_text(&mut self, _key: &u32, text: &str) { self.text = text.to_string(); }
/// }
///
/// let mut page = Page::default();
/// let mut animator: CounterAnimator<u32> = CounterAnimator::new(false);
///
/// let outcome = animator.begin(&mut page, 1, "99%", |key| (key == "count").then(String::new));
/// assert_eq!(outcome, Trigger::Started);
///
/// while page.frame_requested {
///     page.frame_requested = false;
///     page.now += 16.0;
///     animator.on_frame(&mut page);
/// }
/// assert_eq!(page.text, "99%");
/// ```
#[derive(Debug)]
pub struct CounterAnimator<K> {
    counters: HashMap<K, CounterAnimation>,
    reduced_motion: bool,
    frame_pending: bool,
}

impl<K> Default for CounterAnimator<K> {
    fn default() -> Self {
        Self {
            counters: HashMap::new(),
            reduced_motion: false,
            frame_pending: false,
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> CounterAnimator<K> {
    /// Create an animator. `reduced_motion` is read once by the host at startup.
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    #[inline]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Register an element from its original text and data attributes.
    ///
    /// The text is parsed once here, before any animation writes to the
    /// element. Registering an already known element keeps the first parse.
    pub fn register<F>(&mut self, key: K, text: &str, dataset: F) -> Trigger
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.counters.contains_key(&key) {
            return Trigger::Registered;
        }
        let Some(options) = CounterOptions::from_dataset(dataset) else {
            return Trigger::Skipped(SkipReason::NotOptedIn);
        };
        self.register_with(key, text, &options)
    }

    /// Register an element with already resolved options.
    pub fn register_with(&mut self, key: K, text: &str, options: &CounterOptions) -> Trigger {
        if self.counters.contains_key(&key) {
            return Trigger::Registered;
        }
        match parse_number(text) {
            Ok(parsed) => {
                tracing::trace!(?key, value = parsed.value, "registered counter");
                self.counters.insert(key, CounterAnimation::new(parsed, options));
                Trigger::Registered
            }
            Err(err) => {
                tracing::debug!(?key, "skipping counter: {}", err);
                Trigger::Skipped(SkipReason::from(&err))
            }
        }
    }

    /// Start the counter for `key`, typically when it becomes visible.
    ///
    /// Under reduced motion the exact final text is written immediately and
    /// no frames are requested. A second trigger is a no-op.
    pub fn trigger<H: FrameHost<K>>(&mut self, host: &mut H, key: &K) -> Trigger {
        let Some(counter) = self.counters.get_mut(key) else {
            return Trigger::Skipped(SkipReason::Unknown);
        };
        if counter.has_run() {
            tracing::trace!(?key, "counter already ran");
            return Trigger::Skipped(SkipReason::AlreadyRan);
        }

        if self.reduced_motion {
            if let Some(text) = counter.finish() {
                host.set_text(key, &text);
            }
            return Trigger::Completed;
        }

        counter.start(host.now_ms());
        tracing::debug!(?key, from = counter.state().from, to = counter.state().to, "counter started");
        if !self.frame_pending {
            self.frame_pending = true;
            host.request_frame();
        }
        Trigger::Started
    }

    /// Register and trigger in one step.
    pub fn begin<H, F>(&mut self, host: &mut H, key: K, text: &str, dataset: F) -> Trigger
    where
        H: FrameHost<K>,
        F: Fn(&str) -> Option<String>,
    {
        match self.register(key.clone(), text, dataset) {
            Trigger::Registered => self.trigger(host, &key),
            other => other,
        }
    }

    /// Advance every running counter to the host's current time.
    ///
    /// Call this from the frame callback requested via
    /// [`FrameHost::request_frame`]. Another frame is requested while any
    /// counter is still running.
    pub fn on_frame<H: FrameHost<K>>(&mut self, host: &mut H) {
        self.frame_pending = false;
        let now = host.now_ms();

        let mut still_running = false;
        for (key, counter) in self.counters.iter_mut() {
            if let Some(text) = counter.frame(now) {
                host.set_text(key, &text);
                if counter.phase() == CounterPhase::Running {
                    still_running = true;
                } else {
                    tracing::debug!(?key, "counter finished");
                }
            }
        }

        if still_running {
            self.frame_pending = true;
            host.request_frame();
        }
    }

    /// Phase of the counter for `key`, if registered.
    pub fn phase(&self, key: &K) -> Option<CounterPhase> {
        self.counters.get(key).map(CounterAnimation::phase)
    }

    /// The counter for `key`, if registered.
    pub fn counter(&self, key: &K) -> Option<&CounterAnimation> {
        self.counters.get(key)
    }

    /// Whether any counter is mid-animation.
    pub fn is_animating(&self) -> bool {
        self.counters
            .values()
            .any(|c| c.phase() == CounterPhase::Running)
    }

    /// Number of registered counters.
    #[inline]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
