//! # Swipeable core
//!
//! Leaf primitives shared by the swipeable toggle and its tooling:
//!
//! - [`animation`]: keyed, clock-driven interpolation (`AnimationDriver`),
//!   easing curves and the `Clock` abstraction (`SystemClock`, `TestClock`).
//! - [`input`]: the pointer event model delivered by the host.
//! - [`Signal`]: observable value with ordered, synchronous subscribers.
//! - [`Color`], [`Vec2`], [`Rect`]: small value types.
//! - [`ConfigError`]: the only error surfaced to callers.
//!
//! Everything here is single-threaded: handles use `Rc`/`RefCell` and are
//! meant to live on the host's UI thread.
//!
//! ```rust
//! use swipeable_core::*;
//!
//! let state = signal(false);
//! state.subscribe(|on| log::debug!("toggled: {on}"));
//! state.set(true);
//! assert!(state.get());
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod signal;

pub use color::*;
pub use error::ConfigError;
pub use geometry::*;
pub use signal::*;
