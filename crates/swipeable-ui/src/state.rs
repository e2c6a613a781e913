/// Settled value of the toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToggleState {
    #[default]
    Unchecked,
    Checked,
}

impl ToggleState {
    pub fn opposite(self) -> Self {
        match self {
            ToggleState::Unchecked => ToggleState::Checked,
            ToggleState::Checked => ToggleState::Unchecked,
        }
    }

    pub fn is_checked(self) -> bool {
        self == ToggleState::Checked
    }

    /// Style blend coordinate of this state: 0 for unchecked, 1 for checked.
    pub fn blend(self) -> f32 {
        match self {
            ToggleState::Unchecked => 0.0,
            ToggleState::Checked => 1.0,
        }
    }
}

impl From<bool> for ToggleState {
    fn from(checked: bool) -> Self {
        if checked {
            ToggleState::Checked
        } else {
            ToggleState::Unchecked
        }
    }
}

/// Externally visible state of the machine, including in-flight transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineState {
    Unchecked,
    Checked,
    /// Animating toward the given state; a return or nudge targets the
    /// current state.
    Transitioning(ToggleState),
}
