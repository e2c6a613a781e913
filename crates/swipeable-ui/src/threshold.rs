//! Release policy: does a drag released at a given fraction of the track
//! commit to the other state or snap back?

use swipeable_core::ConfigError;

use crate::ToggleState;

/// A fraction strictly inside (0, 1).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Threshold(f32);

impl Threshold {
    pub fn new(name: &'static str, value: f32) -> Result<Self, ConfigError> {
        // written so that NaN is rejected as well
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::ThresholdOutOfRange { name, value })
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdConfig {
    /// Fraction past which a drag from unchecked commits to checked.
    pub to_commit: Threshold,
    /// Distance from the checked end past which a drag from checked commits
    /// to unchecked.
    pub to_cancel: Threshold,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            to_commit: Threshold(0.5),
            to_cancel: Threshold(0.5),
        }
    }
}

impl ThresholdConfig {
    pub fn new(to_commit: f32, to_cancel: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            to_commit: Threshold::new("swipe_progress_to_finish", to_commit)?,
            to_cancel: Threshold::new("swipe_progress_to_start", to_cancel)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Animate through to the opposite state.
    Commit,
    /// Snap back to the state the drag started from.
    Cancel,
}

/// Decide the outcome of a release at `release_fraction` of the movable range
/// (0 = unchecked end, 1 = checked end).
pub fn decide(current: ToggleState, release_fraction: f32, config: &ThresholdConfig) -> Decision {
    let commit = match current {
        ToggleState::Unchecked => release_fraction > config.to_commit.get(),
        // to_cancel is measured from the checked end
        ToggleState::Checked => release_fraction < 1.0 - config.to_cancel.get(),
    };
    if commit {
        Decision::Commit
    } else {
        Decision::Cancel
    }
}
