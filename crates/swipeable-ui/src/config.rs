//! Toggle configuration: the initial state, the swipe thresholds, animation
//! timing and the checked / unchecked style pair.
//!
//! Values are checked once by [`ToggleConfig::validate`] (and again by each
//! setter on the running component); an invalid value never replaces the one
//! in effect.

use std::time::Duration;

use swipeable_core::error::Result;
use swipeable_core::{Color, ConfigError};

use crate::ToggleState;
use crate::threshold::ThresholdConfig;

pub const DEFAULT_ANIMATION_DURATION_MS: i64 = 200;
pub const DEFAULT_TEXT_SIZE: f32 = 16.0;

/// Host-side drawable (icon or background shape), identified by name.
/// Loading it is up to the presenter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Drawable(pub String);

impl Drawable {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Everything drawn for one state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub icon: Drawable,
    /// Track background.
    pub background: Drawable,
    /// Thumb background.
    pub toggle_background: Drawable,
    pub text: String,
    pub text_color: Color,
    pub text_size: f32,
}

impl Style {
    pub fn checked() -> Self {
        Self {
            icon: Drawable::named("ic_stop"),
            background: Drawable::named("shape_scrolling_view_checked"),
            toggle_background: Drawable::named("shape_checked_toggle"),
            text: "Stop".into(),
            text_color: Color::WHITE,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }

    pub fn unchecked() -> Self {
        Self {
            icon: Drawable::named("ic_play"),
            background: Drawable::named("shape_scrolling_view_unchecked"),
            toggle_background: Drawable::named("shape_unchecked_toggle"),
            text: "Start".into(),
            text_color: Color::BLACK,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSet {
    pub checked: Style,
    pub unchecked: Style,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            checked: Style::checked(),
            unchecked: Style::unchecked(),
        }
    }
}

impl StyleSet {
    pub fn get(&self, state: ToggleState) -> &Style {
        match state {
            ToggleState::Checked => &self.checked,
            ToggleState::Unchecked => &self.unchecked,
        }
    }

    pub fn get_mut(&mut self, state: ToggleState) -> &mut Style {
        match state {
            ToggleState::Checked => &mut self.checked,
            ToggleState::Unchecked => &mut self.unchecked,
        }
    }

    /// Colour of the label at style blend `blend` (0 unchecked, 1 checked).
    pub fn text_color_at(&self, blend: f32) -> Color {
        use swipeable_core::animation::Interpolate;
        self.unchecked
            .text_color
            .interpolate(&self.checked.text_color, blend.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ToggleConfig {
    pub checked: bool,
    pub enabled: bool,
    /// A tap plays a short nudge toward the other end.
    pub click_to_swipe: bool,
    pub swipe_progress_to_finish: f32,
    pub swipe_progress_to_start: f32,
    pub animation_duration_ms: i64,
    pub styles: StyleSet,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            checked: false,
            enabled: true,
            click_to_swipe: true,
            swipe_progress_to_finish: 0.5,
            swipe_progress_to_start: 0.5,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            styles: StyleSet::default(),
        }
    }
}

impl ToggleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn click_to_swipe(mut self, on: bool) -> Self {
        self.click_to_swipe = on;
        self
    }

    pub fn swipe_progress(mut self, to_finish: f32, to_start: f32) -> Self {
        self.swipe_progress_to_finish = to_finish;
        self.swipe_progress_to_start = to_start;
        self
    }

    pub fn animation_duration_ms(mut self, ms: i64) -> Self {
        self.animation_duration_ms = ms;
        self
    }

    pub fn styles(mut self, styles: StyleSet) -> Self {
        self.styles = styles;
        self
    }

    pub fn initial_state(&self) -> ToggleState {
        self.checked.into()
    }

    pub fn thresholds(&self) -> Result<ThresholdConfig> {
        ThresholdConfig::new(self.swipe_progress_to_finish, self.swipe_progress_to_start)
    }

    pub fn animation_duration(&self) -> Result<Duration> {
        animation_duration(self.animation_duration_ms)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds()?;
        self.animation_duration()?;
        text_size(self.styles.checked.text_size)?;
        text_size(self.styles.unchecked.text_size)?;
        Ok(())
    }
}

pub fn animation_duration(ms: i64) -> Result<Duration> {
    if ms <= 0 {
        return Err(ConfigError::NonPositiveDuration(ms));
    }
    Ok(Duration::from_millis(ms as u64))
}

pub fn text_size(size: f32) -> Result<f32> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(ConfigError::InvalidTextSize(size))
    }
}
