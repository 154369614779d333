//! # ccreveal-core
//!
//! Core of the scroll-reveal counter widget.
//!
//! This crate provides platform-agnostic logic for:
//! - Extracting a number from rendered text such as `"$1.234,56 users"`,
//!   inferring which glyph is the decimal separator
//! - Re-rendering any value in that same separator style and precision
//! - Animating a count-up with cubic ease-out, once per element, with a
//!   reduced-motion fast path
//! - Reading per-element reveal and counter options from data attributes
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`RevealSettings`] from TOML
//! - `web` - Enable web/WASM DOM binding (`requestAnimationFrame`, `matchMedia`)
//!
//! ## Example
//!
//! ```rust
//! use ccreveal_core::{format_number, ParsedNumber};
//!
//! let parsed = ParsedNumber::parse("1,234.56 users").unwrap();
//! assert_eq!(parsed.value, 1234.56);
//! assert_eq!(parsed.decimal_digits, 2);
//!
//! // Halfway through an animation
//! let frame = parsed.render(617.28);
//! assert_eq!(frame, "617.28 users");
//!
//! assert_eq!(
//!     format_number(parsed.value, parsed.decimal_digits, parsed.decimal_separator),
//!     "1,234.56"
//! );
//! ```

mod animation;
mod animator;
pub mod easing;
mod format;
mod options;
mod parser;
mod reveal;

#[cfg(feature = "web")]
pub mod web;

pub use animation::{AnimationState, CounterAnimation, CounterPhase};
pub use animator::{CounterAnimator, FrameHost, SkipReason, Trigger};
pub use format::format_number;
pub use options::{
    CounterOptions, RevealSettings, DEFAULT_COUNT_DURATION_MS, DEFAULT_ROOT_MARGIN,
    DEFAULT_THRESHOLD,
};
pub use parser::{parse_number, DecimalSeparator, ParseError, ParsedNumber};
pub use reveal::{reveal_immediately, RevealStyle, READY_CLASS, REVEAL_SELECTOR, VISIBLE_CLASS};

#[cfg(feature = "web")]
pub use web::{prefers_reduced_motion, CounterController};
