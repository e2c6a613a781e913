//! The swipeable toggle component.

use std::rc::Rc;

use swipeable_core::animation::{Clock, SystemClock};
use swipeable_core::error::Result;
use swipeable_core::input::{PointerEvent, PointerEventKind, PointerId};
use swipeable_core::{Color, Rect, Signal, Vec2, signal};

use crate::config::{self, Drawable, StyleSet, ToggleConfig};
use crate::gestures::TrackGeometry;
use crate::listeners::{ListenerId, Listeners, SwipeListener};
use crate::machine::{Effect, Effects, ToggleStateMachine};
use crate::presenter::{PointerInputSink, PresentationAdapter, Renderable, StyleFrame, TextFrame};
use crate::threshold::{Threshold, ThresholdConfig};
use crate::{MachineState, ToggleState};

/// A two-state toggle the user swipes (or taps) between checked and
/// unchecked.
///
/// Drive it with pointer input and call [`SwipeButton::tick`] once per frame
/// while [`SwipeButton::is_animating`]; everything visible goes to `P`.
pub struct SwipeButton<P: PresentationAdapter> {
    machine: ToggleStateMachine,
    styles: StyleSet,
    presenter: P,
    listeners: Listeners,
    state: Signal<ToggleState>,
    pointer: Option<PointerId>,
}

impl<P: PresentationAdapter> SwipeButton<P> {
    pub fn new(config: ToggleConfig, presenter: P) -> Result<Self> {
        Self::with_clock(config, presenter, Rc::new(SystemClock))
    }

    pub fn with_clock(config: ToggleConfig, presenter: P, clock: Rc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let machine = ToggleStateMachine::from_config(&config, clock)?;
        let mut button = Self {
            state: signal(machine.state()),
            machine,
            styles: config.styles,
            presenter,
            listeners: Listeners::default(),
            pointer: None,
        };
        button.refresh();
        Ok(button)
    }

    pub fn state(&self) -> ToggleState {
        self.machine.state()
    }

    pub fn is_checked(&self) -> bool {
        self.machine.state().is_checked()
    }

    pub fn machine_state(&self) -> MachineState {
        self.machine.machine_state()
    }

    /// Observable state; updated after each settled change.
    pub fn state_signal(&self) -> Signal<ToggleState> {
        self.state.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    pub fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    pub fn thumb_offset(&self) -> f32 {
        self.machine.thumb_offset()
    }

    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    pub fn machine(&self) -> &ToggleStateMachine {
        &self.machine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn subscribe(&mut self, listener: impl SwipeListener + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Advance animations; returns `true` while a transition is running.
    pub fn tick(&mut self) -> bool {
        let fx = self.machine.tick();
        self.apply(fx);
        self.machine.is_animating()
    }

    /// Host layout result: track length and thumb length along the swipe axis.
    pub fn set_geometry(&mut self, track_extent: f32, thumb_extent: f32) {
        let fx = self
            .machine
            .set_geometry(TrackGeometry::new(track_extent, thumb_extent));
        self.apply(fx);
    }

    /// Current thumb bounds inside `track`, for hit testing.
    pub fn thumb_rect(&self, track: Rect) -> Rect {
        self.machine
            .geometry()
            .thumb_rect(track, self.machine.thumb_offset())
    }

    pub fn set_checked(&mut self, checked: bool) {
        let fx = self.machine.set_checked(checked.into());
        self.apply(fx);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let fx = self.machine.set_enabled(enabled);
        if !enabled {
            self.pointer = None;
        }
        self.apply(fx);
    }

    pub fn set_click_to_swipe_enable(&mut self, on: bool) {
        self.machine.set_click_to_swipe(on);
        self.refresh();
    }

    pub fn set_swipe_progress_to_finish(&mut self, value: f32) -> Result<()> {
        let to_commit = Threshold::new("swipe_progress_to_finish", value)?;
        self.machine.set_thresholds(ThresholdConfig {
            to_commit,
            ..self.machine.thresholds()
        });
        self.refresh();
        Ok(())
    }

    pub fn set_swipe_progress_to_start(&mut self, value: f32) -> Result<()> {
        let to_cancel = Threshold::new("swipe_progress_to_start", value)?;
        self.machine.set_thresholds(ThresholdConfig {
            to_cancel,
            ..self.machine.thresholds()
        });
        self.refresh();
        Ok(())
    }

    pub fn set_animation_duration(&mut self, ms: i64) -> Result<()> {
        let duration = config::animation_duration(ms)?;
        self.machine.set_animation_duration(duration);
        self.refresh();
        Ok(())
    }

    pub fn set_text_size(&mut self, size: f32) -> Result<()> {
        let size = config::text_size(size)?;
        self.styles.checked.text_size = size;
        self.styles.unchecked.text_size = size;
        self.refresh();
        Ok(())
    }

    pub fn set_checked_text(&mut self, text: impl Into<String>) {
        self.edit_style(ToggleState::Checked, |s| s.text = text.into());
    }

    pub fn set_unchecked_text(&mut self, text: impl Into<String>) {
        self.edit_style(ToggleState::Unchecked, |s| s.text = text.into());
    }

    pub fn set_checked_text_color(&mut self, color: Color) {
        self.edit_style(ToggleState::Checked, |s| s.text_color = color);
    }

    pub fn set_unchecked_text_color(&mut self, color: Color) {
        self.edit_style(ToggleState::Unchecked, |s| s.text_color = color);
    }

    pub fn set_checked_icon(&mut self, icon: Drawable) {
        self.edit_style(ToggleState::Checked, |s| s.icon = icon);
    }

    pub fn set_unchecked_icon(&mut self, icon: Drawable) {
        self.edit_style(ToggleState::Unchecked, |s| s.icon = icon);
    }

    pub fn set_checked_toggle_background(&mut self, background: Drawable) {
        self.edit_style(ToggleState::Checked, |s| s.toggle_background = background);
    }

    pub fn set_unchecked_toggle_background(&mut self, background: Drawable) {
        self.edit_style(ToggleState::Unchecked, |s| s.toggle_background = background);
    }

    pub fn set_checked_background(&mut self, background: Drawable) {
        self.edit_style(ToggleState::Checked, |s| s.background = background);
    }

    pub fn set_unchecked_background(&mut self, background: Drawable) {
        self.edit_style(ToggleState::Unchecked, |s| s.background = background);
    }

    fn edit_style(&mut self, state: ToggleState, f: impl FnOnce(&mut config::Style)) {
        f(self.styles.get_mut(state));
        self.refresh();
    }

    /// Repaint the current frame without touching any animation.
    pub fn refresh(&mut self) {
        paint(&self.machine, &self.styles, &mut self.presenter);
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::ThumbOffset(offset) => self.presenter.set_thumb_offset(offset),
                Effect::StyleBlend(blend) => self
                    .presenter
                    .set_style(StyleFrame::at_blend(&self.styles, blend)),
                Effect::Text { label, alpha } => self.presenter.set_text(TextFrame::new(
                    &self.styles,
                    label,
                    self.machine.blend(),
                    alpha,
                )),
                Effect::StateChanged(state) => {
                    self.presenter.notify_state_changed(state);
                    self.state.set(state);
                }
                Effect::Swiped(state) => self.listeners.emit(state),
                Effect::DisallowIntercept(disallow) => {
                    self.presenter.request_disallow_intercept(disallow)
                }
            }
        }
    }
}

fn paint(machine: &ToggleStateMachine, styles: &StyleSet, presenter: &mut dyn PresentationAdapter) {
    presenter.set_thumb_offset(machine.thumb_offset());
    presenter.set_style(StyleFrame::at_blend(styles, machine.blend()));
    presenter.set_text(TextFrame::new(
        styles,
        machine.label(),
        machine.blend(),
        machine.text_alpha(),
    ));
}

impl<P: PresentationAdapter> PointerInputSink for SwipeButton<P> {
    fn on_pointer_down(&mut self, _position: Vec2) {
        let fx = self.machine.pointer_down();
        self.apply(fx);
    }

    fn on_pointer_move(&mut self, delta_y: f32) {
        let fx = self.machine.pointer_move(delta_y);
        self.apply(fx);
    }

    fn on_pointer_up(&mut self, _position: Vec2) {
        let fx = self.machine.pointer_up();
        self.apply(fx);
    }

    fn on_pointer_cancel(&mut self) {
        let fx = self.machine.pointer_cancel();
        self.apply(fx);
    }

    /// Only the pointer that pressed the thumb drives it.
    fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.event {
            PointerEventKind::Down(_) => {
                if !event.is_primary() || self.pointer.is_some() || !self.machine.is_enabled() {
                    log::trace!("pointer {:?} down ignored", event.id);
                    return false;
                }
                self.pointer = Some(event.id);
                self.on_pointer_down(event.position);
            }
            _ if self.pointer != Some(event.id) => {
                log::trace!("foreign pointer {:?} ignored", event.id);
                return false;
            }
            PointerEventKind::Move => self.on_pointer_move(event.position.y),
            PointerEventKind::Up(_) => {
                self.pointer = None;
                self.on_pointer_up(event.position);
            }
            PointerEventKind::Cancel => {
                self.pointer = None;
                self.on_pointer_cancel();
            }
        }
        true
    }
}

impl<P: PresentationAdapter> Renderable for SwipeButton<P> {
    fn render(&self, presenter: &mut dyn PresentationAdapter) {
        paint(&self.machine, &self.styles, presenter);
    }
}
