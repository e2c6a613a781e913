//! Swipeable toggle: a thumb the user drags (or taps) along a track to switch
//! between checked and unchecked.
//!
//! Pointer input flows through [`GestureTracker`](gestures::GestureTracker)
//! into the [`ToggleStateMachine`](machine::ToggleStateMachine), which decides
//! on release whether to commit or snap back and animates the result. The
//! [`SwipeButton`] component wires the machine to a host
//! [`PresentationAdapter`] and to swipe listeners.
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use swipeable_core::animation::TestClock;
//! use swipeable_ui::*;
//!
//! let clock = TestClock::new();
//! let mut button =
//!     SwipeButton::with_clock(ToggleConfig::default(), (), Rc::new(clock.clone())).unwrap();
//! button.set_geometry(200.0, 40.0);
//!
//! button.set_checked(true);
//! while button.tick() {
//!     clock.advance(Duration::from_millis(16));
//! }
//! assert!(button.is_checked());
//! ```

pub mod button;
pub mod config;
pub mod gestures;
pub mod listeners;
pub mod machine;
pub mod presenter;
pub mod state;
pub mod threshold;

pub use button::SwipeButton;
pub use config::{Drawable, Style, StyleSet, ToggleConfig};
pub use listeners::{ListenerId, SwipeEvent, SwipeListener};
pub use presenter::{PointerInputSink, PresentationAdapter, Renderable, StyleFrame, TextFrame};
pub use state::{MachineState, ToggleState};
pub use swipeable_core::ConfigError;
