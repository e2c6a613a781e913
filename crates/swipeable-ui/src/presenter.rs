//! Seams between the toggle and its host.
//!
//! The host implements [`PresentationAdapter`] to draw what the toggle asks
//! for, and feeds pointer input through [`PointerInputSink`].

use swipeable_core::Color;
use swipeable_core::Vec2;
use swipeable_core::input::{PointerEvent, PointerEventKind};

use crate::ToggleState;
use crate::config::{Style, StyleSet};

/// Which style to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleFrame<'a> {
    Settled(&'a Style),
    /// Draw `from` blended toward `to`; `progress` 0 shows only `from`.
    Crossfade {
        from: &'a Style,
        to: &'a Style,
        progress: f32,
    },
}

impl<'a> StyleFrame<'a> {
    pub fn at_blend(styles: &'a StyleSet, blend: f32) -> Self {
        if blend <= 0.0 {
            StyleFrame::Settled(&styles.unchecked)
        } else if blend >= 1.0 {
            StyleFrame::Settled(&styles.checked)
        } else {
            StyleFrame::Crossfade {
                from: &styles.unchecked,
                to: &styles.checked,
                progress: blend,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextFrame<'a> {
    pub text: &'a str,
    pub color: Color,
    pub size: f32,
    pub alpha: f32,
}

impl<'a> TextFrame<'a> {
    pub fn new(styles: &'a StyleSet, label: ToggleState, blend: f32, alpha: f32) -> Self {
        let style = styles.get(label);
        Self {
            text: &style.text,
            color: styles.text_color_at(blend),
            size: style.text_size,
            alpha,
        }
    }
}

pub trait PresentationAdapter {
    /// Thumb leading edge, in `[0, track − thumb]`.
    fn set_thumb_offset(&mut self, offset: f32);

    fn set_style(&mut self, style: StyleFrame<'_>);

    fn set_text(&mut self, text: TextFrame<'_>);

    fn notify_state_changed(&mut self, state: ToggleState);

    /// Ask ancestors to stop (or resume) intercepting the pointer stream.
    fn request_disallow_intercept(&mut self, disallow: bool) {
        let _ = disallow;
    }
}

impl<P: PresentationAdapter + ?Sized> PresentationAdapter for Box<P> {
    fn set_thumb_offset(&mut self, offset: f32) {
        (**self).set_thumb_offset(offset)
    }
    fn set_style(&mut self, style: StyleFrame<'_>) {
        (**self).set_style(style)
    }
    fn set_text(&mut self, text: TextFrame<'_>) {
        (**self).set_text(text)
    }
    fn notify_state_changed(&mut self, state: ToggleState) {
        (**self).notify_state_changed(state)
    }
    fn request_disallow_intercept(&mut self, disallow: bool) {
        (**self).request_disallow_intercept(disallow)
    }
}

/// Headless presenter: draws nothing.
impl PresentationAdapter for () {
    fn set_thumb_offset(&mut self, _offset: f32) {}
    fn set_style(&mut self, _style: StyleFrame<'_>) {}
    fn set_text(&mut self, _text: TextFrame<'_>) {}
    fn notify_state_changed(&mut self, _state: ToggleState) {}
}

/// Pointer input, in the thumb's local coordinates.
pub trait PointerInputSink {
    fn on_pointer_down(&mut self, position: Vec2);
    /// `delta_y` is the pointer's distance from the thumb's leading edge.
    fn on_pointer_move(&mut self, delta_y: f32);
    fn on_pointer_up(&mut self, position: Vec2);
    fn on_pointer_cancel(&mut self);

    /// Route a host pointer event. Returns whether it was consumed.
    fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if !event.is_primary() {
            return false;
        }
        match event.event {
            PointerEventKind::Down(_) => self.on_pointer_down(event.position),
            PointerEventKind::Move => self.on_pointer_move(event.position.y),
            PointerEventKind::Up(_) => self.on_pointer_up(event.position),
            PointerEventKind::Cancel => self.on_pointer_cancel(),
        }
        true
    }
}

/// Something that can repaint its full current frame on demand.
pub trait Renderable {
    fn render(&self, presenter: &mut dyn PresentationAdapter);
}
