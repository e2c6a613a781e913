//! Configuration errors.
//!
//! Raised synchronously by setters and constructors; the rejected value never
//! replaces the one already in effect.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A swipe threshold at or outside the open interval (0, 1).
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    #[error("animation duration must be greater than 0 ms, got {0}")]
    NonPositiveDuration(i64),

    #[error("text size must be a positive finite number, got {0}")]
    InvalidTextSize(f32),
}
