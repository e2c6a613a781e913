//! # Toggle state machine
//!
//! Owns the settled [`ToggleState`], the [`GestureTracker`] and an
//! [`AnimationDriver`] keyed by [`Channel`]. Every operation returns the
//! [`Effects`] it produced; the caller forwards them to the presenter and the
//! listeners, so the machine never calls out while it is being mutated.
//!
//! ```text
//!            pointer down                 release: commit / cancel / tap
//!   Idle ─────────────────▶ Dragging ─────────────────────────────┐
//!    ▲                        ▲                                    ▼
//!    │ settle                 │ pointer down (interrupt)   Transitioning
//!    └────────────────────────┴─────────────────────────── { target, kind }
//! ```
//!
//! A transition settles on the first tick after all of its runs finished.
//! Only a settled commit changes the state.

use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;
use swipeable_core::animation::{AnimationDriver, AnimationSpec, Clock, Easing};
use swipeable_core::error::Result;

use crate::config::ToggleConfig;
use crate::gestures::{GestureTracker, MoveOutcome, TAP_SLOP, TrackGeometry};
use crate::threshold::{Decision, ThresholdConfig, decide};
use crate::{MachineState, ToggleState};

/// Text alpha at or below which the label shows the target state's text.
pub const LABEL_SWAP_ALPHA: f32 = 0.3;

/// Property groups animated by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    /// 0 shows the unchecked style, 1 the checked style.
    Style,
    TextAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Gesture,
    Programmatic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Commit(Origin),
    /// Snap back to the current state after a cancelled drag.
    Return,
    /// Tap feedback toward the opposite end and back.
    Nudge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Transitioning {
        target: ToggleState,
        kind: TransitionKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ThumbOffset(f32),
    StyleBlend(f32),
    Text { label: ToggleState, alpha: f32 },
    StateChanged(ToggleState),
    /// A gesture commit settled; listeners fire.
    Swiped(ToggleState),
    DisallowIntercept(bool),
}

pub type Effects = SmallVec<[Effect; 4]>;

pub struct ToggleStateMachine {
    state: ToggleState,
    phase: Phase,
    enabled: bool,
    click_to_swipe: bool,
    thresholds: ThresholdConfig,
    duration: Duration,
    tracker: GestureTracker,
    driver: AnimationDriver<Channel>,
    blend: f32,
    label: ToggleState,
    text_alpha: f32,
}

impl ToggleStateMachine {
    pub fn new(
        initial: ToggleState,
        thresholds: ThresholdConfig,
        duration: Duration,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            state: initial,
            phase: Phase::Idle,
            enabled: true,
            click_to_swipe: true,
            thresholds,
            duration,
            tracker: GestureTracker::new(TrackGeometry::default(), initial),
            driver: AnimationDriver::new(clock),
            blend: initial.blend(),
            label: initial,
            text_alpha: 1.0,
        }
    }

    pub fn from_config(config: &ToggleConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        let mut machine = Self::new(
            config.initial_state(),
            config.thresholds()?,
            config.animation_duration()?,
            clock,
        );
        machine.click_to_swipe = config.click_to_swipe;
        machine.set_enabled(config.enabled);
        Ok(machine)
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn machine_state(&self) -> MachineState {
        match (self.phase, self.state) {
            (Phase::Transitioning { target, .. }, _) => MachineState::Transitioning(target),
            (_, ToggleState::Checked) => MachineState::Checked,
            (_, ToggleState::Unchecked) => MachineState::Unchecked,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn click_to_swipe(&self) -> bool {
        self.click_to_swipe
    }

    pub fn thresholds(&self) -> ThresholdConfig {
        self.thresholds
    }

    pub fn animation_duration(&self) -> Duration {
        self.duration
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.tracker.geometry()
    }

    pub fn thumb_offset(&self) -> f32 {
        self.tracker.offset()
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// State whose text is currently shown.
    pub fn label(&self) -> ToggleState {
        self.label
    }

    pub fn text_alpha(&self) -> f32 {
        self.text_alpha
    }

    pub fn set_click_to_swipe(&mut self, on: bool) {
        self.click_to_swipe = on;
    }

    /// Applies from the next release on.
    pub fn set_thresholds(&mut self, thresholds: ThresholdConfig) {
        self.thresholds = thresholds;
    }

    /// Applies from the next transition on.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_geometry(&mut self, geometry: TrackGeometry) -> Effects {
        let mut fx = Effects::new();
        self.tracker.set_geometry(geometry);
        if self.phase == Phase::Idle {
            self.tracker.set_offset(geometry.resting_offset(self.state));
        }
        fx.push(Effect::ThumbOffset(self.tracker.offset()));
        fx
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Effects {
        let mut fx = Effects::new();
        if self.enabled == enabled {
            return fx;
        }
        self.enabled = enabled;
        let dropped = self.tracker.set_enabled(enabled);
        log::debug!("toggle {}", if enabled { "enabled" } else { "disabled" });

        if let Some(session) = dropped {
            self.phase = Phase::Idle;
            if session.intercept_disallowed {
                fx.push(Effect::DisallowIntercept(false));
            }
            self.rest_visuals(self.state, &mut fx);
        }
        fx
    }

    /// Programmatic state change.
    pub fn set_checked(&mut self, value: ToggleState) -> Effects {
        let mut fx = Effects::new();
        if self.is_animating() {
            log::debug!("set_checked({value:?}) ignored: transition in flight");
            return fx;
        }
        if value == self.state {
            return fx;
        }
        if self.phase == Phase::Dragging {
            self.abort_drag(&mut fx);
        }

        if !self.enabled {
            self.state = value;
            self.tracker.set_resting(value);
            self.rest_visuals(value, &mut fx);
            fx.push(Effect::StateChanged(value));
            return fx;
        }
        self.start_transition(value, TransitionKind::Commit(Origin::Programmatic), &mut fx);
        fx
    }

    pub fn pointer_down(&mut self) -> Effects {
        let mut fx = Effects::new();
        if !self.enabled {
            log::trace!("pointer down ignored: disabled");
            return fx;
        }
        if self.is_animating() {
            self.interrupt(&mut fx);
        }
        if self.tracker.on_pointer_down() {
            self.phase = Phase::Dragging;
        }
        fx
    }

    pub fn pointer_move(&mut self, delta_y: f32) -> Effects {
        let mut fx = Effects::new();
        if self.phase != Phase::Dragging {
            log::trace!("pointer move ignored in {:?}", self.phase);
            return fx;
        }
        if let MoveOutcome::Moved { offset, began_drag } = self.tracker.on_pointer_move(delta_y) {
            if began_drag {
                fx.push(Effect::DisallowIntercept(true));
            }
            fx.push(Effect::ThumbOffset(offset));
        }
        fx
    }

    pub fn pointer_up(&mut self) -> Effects {
        let mut fx = Effects::new();
        if self.phase != Phase::Dragging {
            log::trace!("pointer up ignored in {:?}", self.phase);
            return fx;
        }
        let release = self.tracker.on_pointer_up();
        self.phase = Phase::Idle;
        let Some(session) = release.session else {
            return fx;
        };
        if session.intercept_disallowed {
            fx.push(Effect::DisallowIntercept(false));
        }

        let rest = self.geometry().resting_offset(self.state);
        let tap = session.net_motion() < TAP_SLOP && (session.start_offset - rest).abs() < TAP_SLOP;
        if tap && self.click_to_swipe {
            self.start_nudge(&mut fx);
            return fx;
        }

        match decide(self.state, release.fraction, &self.thresholds) {
            Decision::Commit => {
                let target = self.state.opposite();
                self.start_transition(target, TransitionKind::Commit(Origin::Gesture), &mut fx);
            }
            Decision::Cancel => {
                self.start_transition(self.state, TransitionKind::Return, &mut fx);
            }
        }
        fx
    }

    /// An ancestor took the gesture over.
    pub fn pointer_cancel(&mut self) -> Effects {
        let mut fx = Effects::new();
        if self.phase != Phase::Dragging {
            return fx;
        }
        self.abort_drag(&mut fx);
        self.start_transition(self.state, TransitionKind::Return, &mut fx);
        fx
    }

    /// Advance running animations to the clock's current time.
    pub fn tick(&mut self) -> Effects {
        let mut fx = Effects::new();
        if !self.is_animating() {
            return fx;
        }
        for sample in self.driver.tick() {
            self.apply(sample.key, sample.value, &mut fx);
        }
        if self.driver.is_idle() {
            self.settle(&mut fx);
        }
        fx
    }

    fn spec(&self) -> AnimationSpec {
        AnimationSpec::tween(self.duration, Easing::EaseInOut)
    }

    fn abort_drag(&mut self, fx: &mut Effects) {
        if let Some(session) = self.tracker.cancel() {
            log::debug!("drag aborted at offset {}", session.current_offset);
            if session.intercept_disallowed {
                fx.push(Effect::DisallowIntercept(false));
            }
        }
        self.phase = Phase::Idle;
    }

    fn start_transition(&mut self, target: ToggleState, kind: TransitionKind, fx: &mut Effects) {
        let spec = self.spec();
        let from = self.tracker.offset();
        let to = self.geometry().resting_offset(target);
        if from != to {
            self.driver.start(Channel::Position, from, to, spec);
        }
        if self.blend != target.blend() {
            self.driver.start(Channel::Style, self.blend, target.blend(), spec);
        }
        if self.label != target || self.text_alpha < 1.0 {
            self.driver
                .start_keyframes(Channel::TextAlpha, &[self.text_alpha, 0.0, 1.0], spec);
        }

        self.phase = Phase::Transitioning { target, kind };
        log::debug!("transition {kind:?} toward {target:?} from offset {from}");
        if self.driver.is_idle() {
            // nothing to animate
            self.settle(fx);
        }
    }

    fn start_nudge(&mut self, fx: &mut Effects) {
        let geometry = self.geometry();
        let rest = geometry.resting_offset(self.state);
        let reach = geometry.thumb_extent / 2.0;
        let peak = geometry.clamp(match self.state {
            ToggleState::Unchecked => rest + reach,
            ToggleState::Checked => rest - reach,
        });
        if peak == rest {
            self.rest_visuals(self.state, fx);
            return;
        }
        self.driver.start_keyframes(
            Channel::Position,
            &[self.tracker.offset(), peak, rest],
            self.spec(),
        );
        self.phase = Phase::Transitioning {
            target: self.state,
            kind: TransitionKind::Nudge,
        };
        log::debug!("tap nudge toward {peak}");
    }

    fn interrupt(&mut self, fx: &mut Effects) {
        for (channel, value) in self.driver.stop_all() {
            self.apply(channel, value, fx);
        }
        log::debug!(
            "{:?} interrupted at offset {}",
            self.phase,
            self.tracker.offset()
        );
        self.phase = Phase::Idle;
    }

    fn apply(&mut self, channel: Channel, value: f32, fx: &mut Effects) {
        match channel {
            Channel::Position => {
                self.tracker.set_offset(value);
                fx.push(Effect::ThumbOffset(self.tracker.offset()));
            }
            Channel::Style => {
                self.blend = value;
                fx.push(Effect::StyleBlend(value));
            }
            Channel::TextAlpha => {
                self.text_alpha = value;
                if let Phase::Transitioning { target, .. } = self.phase {
                    if self.label != target && value <= LABEL_SWAP_ALPHA {
                        self.label = target;
                    }
                }
                fx.push(Effect::Text {
                    label: self.label,
                    alpha: value,
                });
            }
        }
    }

    fn settle(&mut self, fx: &mut Effects) {
        let Phase::Transitioning { target, kind } = self.phase else {
            return;
        };
        self.phase = Phase::Idle;
        self.rest_visuals(target, fx);
        log::debug!("transition {kind:?} settled at {target:?}");

        if let TransitionKind::Commit(origin) = kind {
            self.state = target;
            self.tracker.set_resting(target);
            fx.push(Effect::StateChanged(target));
            if origin == Origin::Gesture {
                fx.push(Effect::Swiped(target));
            }
        }
    }

    /// Put every property on its resting value for `state`, emitting only
    /// what changed.
    fn rest_visuals(&mut self, state: ToggleState, fx: &mut Effects) {
        let rest = self.geometry().resting_offset(state);
        if self.tracker.offset() != rest {
            self.tracker.set_offset(rest);
            fx.push(Effect::ThumbOffset(rest));
        }
        if self.blend != state.blend() {
            self.blend = state.blend();
            fx.push(Effect::StyleBlend(self.blend));
        }
        if self.label != state || self.text_alpha != 1.0 {
            self.label = state;
            self.text_alpha = 1.0;
            fx.push(Effect::Text {
                label: state,
                alpha: 1.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipeable_core::animation::TestClock;

    fn machine(initial: ToggleState) -> (TestClock, ToggleStateMachine) {
        let clock = TestClock::new();
        let mut m = ToggleStateMachine::new(
            initial,
            ThresholdConfig::default(),
            Duration::from_millis(200),
            Rc::new(clock.clone()),
        );
        m.set_geometry(TrackGeometry::new(200.0, 40.0));
        (clock, m)
    }

    fn run_to_end(clock: &TestClock, m: &mut ToggleStateMachine) -> Vec<Effect> {
        let mut all = Vec::new();
        for _ in 0..100 {
            if !m.is_animating() {
                break;
            }
            clock.advance(Duration::from_millis(16));
            all.extend(m.tick());
        }
        assert!(!m.is_animating(), "transition never settled");
        all
    }

    /// Press, drag the thumb so its leading edge lands on `offset`, release.
    fn drag_to(m: &mut ToggleStateMachine, offset: f32) -> Vec<Effect> {
        let mut all: Vec<Effect> = m.pointer_down().into_vec();
        let delta = offset - m.thumb_offset() + 20.0;
        all.extend(m.pointer_move(delta));
        assert_eq!(m.thumb_offset(), offset);
        all.extend(m.pointer_up());
        all
    }

    fn count(fx: &[Effect], pred: impl Fn(&Effect) -> bool) -> usize {
        fx.iter().filter(|e| pred(e)).count()
    }

    fn last_offset(fx: &[Effect]) -> Option<f32> {
        fx.iter().rev().find_map(|e| match e {
            Effect::ThumbOffset(o) => Some(*o),
            _ => None,
        })
    }

    #[test]
    fn release_past_threshold_commits() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        let mut fx = drag_to(&mut m, 150.0);
        assert_eq!(
            m.machine_state(),
            MachineState::Transitioning(ToggleState::Checked)
        );
        assert_eq!(m.state(), ToggleState::Unchecked);

        fx.extend(run_to_end(&clock, &mut m));
        assert_eq!(m.state(), ToggleState::Checked);
        assert_eq!(m.thumb_offset(), 160.0);
        assert_eq!(last_offset(&fx), Some(160.0));
        assert_eq!(count(&fx, |e| *e == Effect::Swiped(ToggleState::Checked)), 1);
        assert_eq!(count(&fx, |e| matches!(e, Effect::StateChanged(_))), 1);
        // state change precedes the listener event
        let changed = fx.iter().position(|e| matches!(e, Effect::StateChanged(_)));
        let swiped = fx.iter().position(|e| matches!(e, Effect::Swiped(_)));
        assert!(changed < swiped);
    }

    #[test]
    fn release_short_of_threshold_returns() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        let mut fx = drag_to(&mut m, 50.0);
        assert_eq!(
            m.machine_state(),
            MachineState::Transitioning(ToggleState::Unchecked)
        );
        fx.extend(run_to_end(&clock, &mut m));
        assert_eq!(m.state(), ToggleState::Unchecked);
        assert_eq!(m.thumb_offset(), 0.0);
        assert_eq!(
            count(&fx, |e| matches!(e, Effect::Swiped(_) | Effect::StateChanged(_))),
            0
        );
    }

    #[test]
    fn checked_drag_back_commits_to_unchecked() {
        let (clock, mut m) = machine(ToggleState::Checked);
        assert_eq!(m.thumb_offset(), 160.0);
        let mut fx = drag_to(&mut m, 40.0);
        fx.extend(run_to_end(&clock, &mut m));
        assert_eq!(m.state(), ToggleState::Unchecked);
        assert_eq!(count(&fx, |e| *e == Effect::Swiped(ToggleState::Unchecked)), 1);
    }

    #[test]
    fn drags_to_the_exact_ends() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        drag_to(&mut m, 160.0);
        run_to_end(&clock, &mut m);
        assert_eq!(m.state(), ToggleState::Checked);

        drag_to(&mut m, 0.0);
        run_to_end(&clock, &mut m);
        assert_eq!(m.state(), ToggleState::Unchecked);
        assert_eq!(m.thumb_offset(), 0.0);
    }

    #[test]
    fn set_checked_is_idempotent() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        let mut fx = m.set_checked(ToggleState::Checked).into_vec();
        fx.extend(run_to_end(&clock, &mut m));
        fx.extend(m.set_checked(ToggleState::Checked));
        fx.extend(run_to_end(&clock, &mut m));

        assert_eq!(m.state(), ToggleState::Checked);
        assert_eq!(count(&fx, |e| matches!(e, Effect::StateChanged(_))), 1);
        assert_eq!(count(&fx, |e| matches!(e, Effect::Swiped(_))), 0);
    }

    #[test]
    fn set_checked_round_trip_restores_offset() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.set_checked(ToggleState::Checked);
        run_to_end(&clock, &mut m);
        m.set_checked(ToggleState::Unchecked);
        run_to_end(&clock, &mut m);
        assert!(m.thumb_offset().abs() < 1e-4);
        assert_eq!(m.blend(), 0.0);
        assert_eq!(m.label(), ToggleState::Unchecked);
    }

    #[test]
    fn set_checked_during_transition_is_ignored() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.set_checked(ToggleState::Checked);
        clock.advance(Duration::from_millis(50));
        m.tick();
        assert!(m.set_checked(ToggleState::Unchecked).is_empty());
        run_to_end(&clock, &mut m);
        assert_eq!(m.state(), ToggleState::Checked);
    }

    #[test]
    fn tap_plays_nudge_without_state_change() {
        let (clock, mut m) = machine(ToggleState::Checked);
        let mut fx = m.pointer_down().into_vec();
        fx.extend(m.pointer_up());
        assert_eq!(
            m.phase(),
            Phase::Transitioning {
                target: ToggleState::Checked,
                kind: TransitionKind::Nudge
            }
        );
        fx.extend(run_to_end(&clock, &mut m));

        let lowest = fx
            .iter()
            .filter_map(|e| match e {
                Effect::ThumbOffset(o) => Some(*o),
                _ => None,
            })
            .fold(f32::MAX, f32::min);
        assert!(lowest < 160.0 && lowest >= 140.0, "{lowest}");
        assert_eq!(m.thumb_offset(), 160.0);
        assert_eq!(m.state(), ToggleState::Checked);
        assert_eq!(
            count(&fx, |e| matches!(e, Effect::Swiped(_) | Effect::StateChanged(_))),
            0
        );
    }

    #[test]
    fn tap_without_click_to_swipe_stays_put() {
        let (_clock, mut m) = machine(ToggleState::Unchecked);
        m.set_click_to_swipe(false);
        m.pointer_down();
        let fx = m.pointer_up();
        assert!(fx.is_empty());
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.state(), ToggleState::Unchecked);
    }

    #[test]
    fn interrupt_resumes_from_sampled_offset() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.set_checked(ToggleState::Checked);
        clock.advance(Duration::from_millis(100));
        m.tick();
        assert_eq!(m.label(), ToggleState::Checked);

        let fx = m.pointer_down();
        assert_eq!(m.phase(), Phase::Dragging);
        assert!((m.thumb_offset() - 80.0).abs() < 0.01);
        assert!((last_offset(&fx).unwrap() - 80.0).abs() < 0.01);
        assert_eq!(m.tracker.session().unwrap().start_offset, m.thumb_offset());

        // released at the midpoint: not a tap, not past the threshold
        let mut fx = m.pointer_up().into_vec();
        fx.extend(run_to_end(&clock, &mut m));
        assert_eq!(m.state(), ToggleState::Unchecked);
        assert_eq!(m.thumb_offset(), 0.0);
        assert_eq!(m.blend(), 0.0);
        assert_eq!(m.label(), ToggleState::Unchecked);
        assert_eq!(m.text_alpha(), 1.0);
        assert_eq!(
            count(&fx, |e| matches!(e, Effect::Swiped(_) | Effect::StateChanged(_))),
            0
        );
    }

    #[test]
    fn label_switches_once_alpha_dips() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.set_checked(ToggleState::Checked);
        let fx = run_to_end(&clock, &mut m);
        let texts: Vec<_> = fx
            .iter()
            .filter_map(|e| match e {
                Effect::Text { label, alpha } => Some((*label, *alpha)),
                _ => None,
            })
            .collect();
        let first_checked = texts
            .iter()
            .position(|(label, _)| *label == ToggleState::Checked)
            .unwrap();
        assert!(texts[first_checked].1 <= LABEL_SWAP_ALPHA);
        assert!(texts[..first_checked].iter().all(|(_, a)| *a > LABEL_SWAP_ALPHA));
        assert_eq!(texts.last(), Some(&(ToggleState::Checked, 1.0)));
    }

    #[test]
    fn passthrough_requested_once_per_drag() {
        let (_clock, mut m) = machine(ToggleState::Unchecked);
        let mut fx = m.pointer_down().into_vec();
        fx.extend(m.pointer_move(40.0));
        fx.extend(m.pointer_move(40.0));
        fx.extend(m.pointer_up());
        let requests: Vec<_> = fx
            .iter()
            .filter(|e| matches!(e, Effect::DisallowIntercept(_)))
            .collect();
        assert_eq!(
            requests,
            [&Effect::DisallowIntercept(true), &Effect::DisallowIntercept(false)]
        );
    }

    #[test]
    fn input_without_down_is_ignored() {
        let (_clock, mut m) = machine(ToggleState::Unchecked);
        assert!(m.pointer_move(100.0).is_empty());
        assert!(m.pointer_up().is_empty());
        assert!(m.pointer_cancel().is_empty());
        assert_eq!(m.thumb_offset(), 0.0);
    }

    #[test]
    fn cancel_returns_thumb() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.pointer_down();
        m.pointer_move(140.0);
        let fx = m.pointer_cancel();
        assert!(fx.contains(&Effect::DisallowIntercept(false)));
        run_to_end(&clock, &mut m);
        assert_eq!(m.thumb_offset(), 0.0);
        assert_eq!(m.state(), ToggleState::Unchecked);
    }

    #[test]
    fn disabling_mid_drag_snaps_back() {
        let (_clock, mut m) = machine(ToggleState::Unchecked);
        m.pointer_down();
        m.pointer_move(100.0);
        assert_eq!(m.thumb_offset(), 80.0);

        let fx = m.set_enabled(false);
        assert_eq!(
            fx.as_slice(),
            [Effect::DisallowIntercept(false), Effect::ThumbOffset(0.0)]
        );
        assert!(m.pointer_move(150.0).is_empty());
        assert!(m.pointer_up().is_empty());
        assert!(m.pointer_down().is_empty());
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn set_checked_mid_drag_animates_from_dragged_offset() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.pointer_down();
        m.pointer_move(100.0);
        assert_eq!(m.thumb_offset(), 80.0);

        let fx = m.set_checked(ToggleState::Checked);
        assert_eq!(fx.first(), Some(&Effect::DisallowIntercept(false)));
        assert_eq!(
            m.phase(),
            Phase::Transitioning {
                target: ToggleState::Checked,
                kind: TransitionKind::Commit(Origin::Programmatic)
            }
        );
        // the released pointer belongs to the aborted drag
        assert!(m.pointer_up().is_empty());

        clock.advance(Duration::from_millis(16));
        let first = last_offset(&m.tick()).unwrap();
        assert!(first > 80.0 && first < 160.0, "{first}");

        let fx = run_to_end(&clock, &mut m);
        assert_eq!(m.state(), ToggleState::Checked);
        assert_eq!(m.thumb_offset(), 160.0);
        assert_eq!(count(&fx, |e| matches!(e, Effect::Swiped(_))), 0);

        drag_to(&mut m, 0.0);
        run_to_end(&clock, &mut m);
        assert_eq!(m.state(), ToggleState::Unchecked);
        assert_eq!(m.thumb_offset(), 0.0);
    }

    #[test]
    fn transition_completes_after_disable() {
        let (clock, mut m) = machine(ToggleState::Unchecked);
        m.set_checked(ToggleState::Checked);
        m.set_enabled(false);
        let fx = run_to_end(&clock, &mut m);
        assert!(fx.contains(&Effect::StateChanged(ToggleState::Checked)));
        assert_eq!(m.thumb_offset(), 160.0);
    }

    #[test]
    fn set_checked_while_disabled_applies_immediately() {
        let (_clock, mut m) = machine(ToggleState::Unchecked);
        m.set_enabled(false);
        let fx = m.set_checked(ToggleState::Checked);
        assert!(!m.is_animating());
        assert_eq!(m.state(), ToggleState::Checked);
        assert_eq!(m.thumb_offset(), 160.0);
        assert_eq!(fx.last(), Some(&Effect::StateChanged(ToggleState::Checked)));
    }

    #[test]
    fn geometry_change_moves_resting_thumb() {
        let (_clock, mut m) = machine(ToggleState::Checked);
        let fx = m.set_geometry(TrackGeometry::new(300.0, 40.0));
        assert_eq!(fx.as_slice(), [Effect::ThumbOffset(260.0)]);
    }

    #[test]
    fn from_config_rejects_bad_values() {
        let clock: Rc<dyn Clock> = Rc::new(TestClock::new());
        let config = ToggleConfig::new().animation_duration_ms(-1);
        assert!(ToggleStateMachine::from_config(&config, clock.clone()).is_err());

        let config = ToggleConfig::new().checked(true).enabled(false);
        let m = ToggleStateMachine::from_config(&config, clock).unwrap();
        assert_eq!(m.state(), ToggleState::Checked);
        assert!(!m.is_enabled());
    }
}
