//! Drag tracking for the toggle thumb.
//!
//! The thumb slides along a single axis (y grows toward the checked end).
//! [`GestureTracker`] turns raw pointer-down / move / up into a thumb offset
//! kept inside `[0, track − thumb]`; it knows nothing about states or
//! animation.

use swipeable_core::Rect;

use crate::ToggleState;

/// Net motion below which a press/release pair counts as a tap.
pub const TAP_SLOP: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackGeometry {
    pub track_extent: f32,
    pub thumb_extent: f32,
}

impl TrackGeometry {
    pub fn new(track_extent: f32, thumb_extent: f32) -> Self {
        if thumb_extent > track_extent {
            log::warn!("thumb ({thumb_extent}) is larger than its track ({track_extent})");
        }
        Self {
            track_extent: track_extent.max(0.0),
            thumb_extent: thumb_extent.max(0.0),
        }
    }

    /// Length of the range the thumb's leading edge can move through.
    pub fn max_offset(&self) -> f32 {
        (self.track_extent - self.thumb_extent).max(0.0)
    }

    pub fn resting_offset(&self, state: ToggleState) -> f32 {
        match state {
            ToggleState::Unchecked => 0.0,
            ToggleState::Checked => self.max_offset(),
        }
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Offset as a fraction of the movable range; 0 when nothing can move.
    pub fn fraction(&self, offset: f32) -> f32 {
        let max = self.max_offset();
        if max > 0.0 { offset / max } else { 0.0 }
    }

    /// Thumb bounds inside a vertical `track` rect, for host hit testing.
    pub fn thumb_rect(&self, track: Rect, offset: f32) -> Rect {
        Rect {
            x: track.x,
            y: track.y + self.clamp(offset),
            w: track.w,
            h: self.thumb_extent,
        }
    }
}

/// One pointer gesture on the thumb, from down to up or cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start_offset: f32,
    pub current_offset: f32,
    pub active: bool,
    /// Set once a move is recognised as a drag; ancestors must stop
    /// intercepting from then on.
    pub intercept_disallowed: bool,
}

impl DragSession {
    pub fn net_motion(&self) -> f32 {
        (self.current_offset - self.start_offset).abs()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No active session, or input is detached.
    Ignored,
    /// The move was not directional motion the thumb can follow.
    Unchanged,
    Moved { offset: f32, began_drag: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub fraction: f32,
    /// `None` when the release had no matching pointer-down.
    pub session: Option<DragSession>,
}

pub struct GestureTracker {
    geometry: TrackGeometry,
    offset: f32,
    resting: ToggleState,
    enabled: bool,
    session: Option<DragSession>,
}

impl GestureTracker {
    /// A tracker with the thumb resting at `resting`'s end of the track.
    pub fn new(geometry: TrackGeometry, resting: ToggleState) -> Self {
        Self {
            geometry,
            offset: geometry.resting_offset(resting),
            resting,
            enabled: true,
            session: None,
        }
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn fraction(&self) -> f32 {
        self.geometry.fraction(self.offset)
    }

    /// Fraction of the end the thumb settles at between gestures.
    pub fn resting_fraction(&self) -> f32 {
        self.geometry.fraction(self.geometry.resting_offset(self.resting))
    }

    /// Record which end the thumb settles at once the current motion ends.
    pub fn set_resting(&mut self, resting: ToggleState) {
        self.resting = resting;
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|s| s.active)
    }

    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
        self.set_offset(self.offset);
    }

    /// Place the thumb directly (animation ticks, settling). Always clamps.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = self.geometry.clamp(offset);
        if let Some(session) = self.session.as_mut() {
            session.current_offset = self.offset;
        }
    }

    /// Enable or detach input. Detaching drops any session, which is returned.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<DragSession> {
        self.enabled = enabled;
        if enabled { None } else { self.cancel() }
    }

    pub fn on_pointer_down(&mut self) -> bool {
        if !self.enabled || self.is_dragging() {
            return false;
        }
        self.session = Some(DragSession {
            start_offset: self.offset,
            current_offset: self.offset,
            active: true,
            intercept_disallowed: false,
        });
        true
    }

    /// `delta_y` is the pointer position measured from the thumb's leading
    /// edge. The thumb re-centres under the pointer when the move is accepted.
    pub fn on_pointer_move(&mut self, delta_y: f32) -> MoveOutcome {
        if !self.enabled {
            return MoveOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut().filter(|s| s.active) else {
            log::trace!("pointer move without an active drag");
            return MoveOutcome::Ignored;
        };
        if self.offset < 0.0 {
            return MoveOutcome::Ignored;
        }

        let half = self.geometry.thumb_extent / 2.0;
        let pointer = self.offset + delta_y;
        let centre = self.offset + half;
        let moving_down = pointer > centre && self.offset < self.geometry.max_offset();
        let moving_up = pointer < centre && self.offset > 0.0;
        if !(moving_down || moving_up) {
            return MoveOutcome::Unchanged;
        }

        let next = self.geometry.clamp(pointer - half);
        if next == self.offset {
            return MoveOutcome::Unchanged;
        }
        self.offset = next;
        session.current_offset = next;
        let began_drag = !session.intercept_disallowed;
        session.intercept_disallowed = true;
        MoveOutcome::Moved {
            offset: next,
            began_drag,
        }
    }

    /// Ends the gesture. Without a session this reports the resting
    /// fraction, whatever an animation is doing to the live offset.
    pub fn on_pointer_up(&mut self) -> Release {
        match self.session.take() {
            Some(session) => Release {
                fraction: self.fraction(),
                session: Some(session),
            },
            None => Release {
                fraction: self.resting_fraction(),
                session: None,
            },
        }
    }

    /// Abort the gesture (an ancestor intercepted it).
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> GestureTracker {
        GestureTracker::new(TrackGeometry::new(200.0, 40.0), ToggleState::Unchecked)
    }

    #[test]
    fn geometry_resting_offsets_and_fraction() {
        let g = TrackGeometry::new(200.0, 40.0);
        assert_eq!(g.max_offset(), 160.0);
        assert_eq!(g.resting_offset(ToggleState::Unchecked), 0.0);
        assert_eq!(g.resting_offset(ToggleState::Checked), 160.0);
        assert_eq!(g.fraction(150.0), 0.9375);
        assert_eq!(g.fraction(50.0), 0.3125);
        assert_eq!(TrackGeometry::new(30.0, 40.0).fraction(10.0), 0.0);
    }

    #[test]
    fn thumb_rect_follows_offset() {
        let g = TrackGeometry::new(200.0, 40.0);
        let track = Rect {
            x: 10.0,
            y: 20.0,
            w: 40.0,
            h: 200.0,
        };
        let r = g.thumb_rect(track, 500.0);
        assert_eq!((r.y, r.h), (180.0, 40.0));
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut t = tracker();
        assert_eq!(t.on_pointer_move(100.0), MoveOutcome::Ignored);
        assert_eq!(t.offset(), 0.0);

        let release = t.on_pointer_up();
        assert!(release.session.is_none());
        assert_eq!(release.fraction, 0.0);
    }

    #[test]
    fn thumb_recentres_under_pointer() {
        let mut t = tracker();
        assert!(t.on_pointer_down());
        assert_eq!(
            t.on_pointer_move(170.0),
            MoveOutcome::Moved {
                offset: 150.0,
                began_drag: true
            }
        );
        // pointer 10 above the new centre
        assert_eq!(
            t.on_pointer_move(10.0),
            MoveOutcome::Moved {
                offset: 140.0,
                began_drag: false
            }
        );
        let release = t.on_pointer_up();
        assert_eq!(release.fraction, 140.0 / 160.0);
        let session = release.session.unwrap();
        assert_eq!(session.start_offset, 0.0);
        assert!(session.intercept_disallowed);
        assert!(!t.is_dragging());
    }

    #[test]
    fn drags_clamp_exactly_at_both_ends() {
        let mut t = tracker();
        t.on_pointer_down();
        assert_eq!(
            t.on_pointer_move(180.0),
            MoveOutcome::Moved {
                offset: 160.0,
                began_drag: true
            }
        );
        // already at the far end: further downward motion is not followed
        assert_eq!(t.on_pointer_move(500.0), MoveOutcome::Unchanged);
        assert_eq!(t.offset(), 160.0);

        assert!(matches!(
            t.on_pointer_move(-400.0),
            MoveOutcome::Moved { offset, .. } if offset == 0.0
        ));
        assert_eq!(t.on_pointer_move(-50.0), MoveOutcome::Unchanged);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn pointer_at_centre_is_not_motion() {
        let mut t = tracker();
        t.on_pointer_down();
        assert_eq!(t.on_pointer_move(20.0), MoveOutcome::Unchanged);
        assert!(!t.session().unwrap().intercept_disallowed);
    }

    #[test]
    fn disabled_tracker_detaches_input() {
        let mut t = tracker();
        t.on_pointer_down();
        t.on_pointer_move(60.0);

        let dropped = t.set_enabled(false).expect("session was active");
        assert_eq!(dropped.current_offset, 40.0);
        assert!(!t.on_pointer_down());
        assert_eq!(t.on_pointer_move(100.0), MoveOutcome::Ignored);

        t.set_enabled(true);
        assert!(t.on_pointer_down());
    }

    #[test]
    fn release_without_session_reports_resting_fraction() {
        let mut t = GestureTracker::new(TrackGeometry::new(200.0, 40.0), ToggleState::Checked);
        assert_eq!(t.offset(), 160.0);

        // an animation has carried the thumb away from its resting end
        t.set_offset(40.0);
        let release = t.on_pointer_up();
        assert!(release.session.is_none());
        assert_eq!(release.fraction, 1.0);

        t.set_resting(ToggleState::Unchecked);
        assert_eq!(t.on_pointer_up().fraction, 0.0);

        let mut flat = GestureTracker::new(TrackGeometry::new(30.0, 40.0), ToggleState::Checked);
        assert_eq!(flat.on_pointer_up().fraction, 0.0);
    }

    #[test]
    fn set_offset_and_geometry_clamp() {
        let mut t = tracker();
        t.set_offset(-5.0);
        assert_eq!(t.offset(), 0.0);
        t.set_offset(999.0);
        assert_eq!(t.offset(), 160.0);
        t.set_geometry(TrackGeometry::new(100.0, 40.0));
        assert_eq!(t.offset(), 60.0);
    }
}
