use web_time::Instant;

use swipeable_core::Color;
use swipeable_ui::{PresentationAdapter, StyleFrame, TextFrame, ToggleState};

/// One presenter call, owned so it can be inspected after the fact.
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    ThumbOffset(f32),
    Style {
        /// Icon of the style being faded toward (or the settled one).
        icon: String,
        progress: Option<f32>,
    },
    Text {
        text: String,
        color: Color,
        alpha: f32,
    },
    StateChanged(ToggleState),
    DisallowIntercept(bool),
}

/// Frame counter with a smoothed frame rate.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
}

impl FrameStats {
    pub fn record(&mut self, now: Instant) {
        self.frame_count += 1;
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = now.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }
}

/// A [`PresentationAdapter`] that draws nothing and remembers everything.
#[derive(Default)]
pub struct TraceAdapter {
    pub calls: Vec<PresenterCall>,
    pub stats: FrameStats,
    offset: f32,
    state: Option<ToggleState>,
    intercept_disallowed: bool,
}

impl TraceAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a host frame.
    pub fn frame(&mut self, now: Instant) {
        self.stats.record(now);
    }

    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.calls.iter().filter_map(|c| match c {
            PresenterCall::ThumbOffset(o) => Some(*o),
            _ => None,
        })
    }

    pub fn state_changes(&self) -> impl Iterator<Item = ToggleState> + '_ {
        self.calls.iter().filter_map(|c| match c {
            PresenterCall::StateChanged(s) => Some(*s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn overlay_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("frame: {}", self.stats.frames()),
            format!("fps: {:.1}", self.stats.fps()),
            format!("offset: {:.1}", self.offset),
        ];
        if let Some(state) = self.state {
            lines.push(format!("state: {state:?}"));
        }
        if self.intercept_disallowed {
            lines.push("dragging".into());
        }
        lines.push(format!("calls: {}", self.calls.len()));
        lines
    }

    pub fn overlay(&self) -> String {
        self.overlay_lines().join("  |  ")
    }

    fn push(&mut self, call: PresenterCall) {
        log::trace!("presenter: {call:?}");
        self.calls.push(call);
    }
}

impl PresentationAdapter for TraceAdapter {
    fn set_thumb_offset(&mut self, offset: f32) {
        self.offset = offset;
        self.push(PresenterCall::ThumbOffset(offset));
    }

    fn set_style(&mut self, style: StyleFrame<'_>) {
        let (icon, progress) = match style {
            StyleFrame::Settled(s) => (s.icon.name().to_string(), None),
            StyleFrame::Crossfade { to, progress, .. } => {
                (to.icon.name().to_string(), Some(progress))
            }
        };
        self.push(PresenterCall::Style { icon, progress });
    }

    fn set_text(&mut self, text: TextFrame<'_>) {
        self.push(PresenterCall::Text {
            text: text.text.to_string(),
            color: text.color.mul_alpha(text.alpha),
            alpha: text.alpha,
        });
    }

    fn notify_state_changed(&mut self, state: ToggleState) {
        self.state = Some(state);
        self.push(PresenterCall::StateChanged(state));
    }

    fn request_disallow_intercept(&mut self, disallow: bool) {
        self.intercept_disallowed = disallow;
        self.push(PresenterCall::DisallowIntercept(disallow));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use swipeable_core::Vec2;
    use swipeable_core::animation::{Clock, TestClock};
    use swipeable_core::input::PointerEvent;
    use swipeable_ui::{PointerInputSink, SwipeButton, ToggleConfig};
    use web_time::Duration;

    fn button() -> (TestClock, SwipeButton<TraceAdapter>) {
        let clock = TestClock::new();
        let mut b = SwipeButton::with_clock(
            ToggleConfig::default(),
            TraceAdapter::new(),
            Rc::new(clock.clone()),
        )
        .unwrap();
        b.set_geometry(200.0, 40.0);
        (clock, b)
    }

    #[test]
    fn records_a_full_swipe() {
        let (clock, mut b) = button();
        b.presenter_mut().clear();

        b.handle_pointer(&PointerEvent::down(1, Vec2::new(20.0, 20.0)));
        b.handle_pointer(&PointerEvent::moved(1, Vec2::new(20.0, 170.0)));
        assert!(b.presenter().overlay().contains("dragging"));
        b.handle_pointer(&PointerEvent::up(1, Vec2::new(20.0, 20.0)));
        loop {
            clock.advance(Duration::from_millis(16));
            let now = clock.now();
            b.presenter_mut().frame(now);
            if !b.tick() {
                break;
            }
        }

        let trace = b.presenter();
        assert_eq!(trace.calls[0], PresenterCall::DisallowIntercept(true));
        assert_eq!(trace.calls[1], PresenterCall::ThumbOffset(150.0));
        assert_eq!(trace.offsets().last(), Some(160.0));
        assert_eq!(trace.state_changes().collect::<Vec<_>>(), [ToggleState::Checked]);
        assert!(trace.calls.contains(&PresenterCall::Style {
            icon: "ic_stop".into(),
            progress: None
        }));
        assert!(trace.stats.frames() > 10);
    }

    #[test]
    fn fps_is_smoothed() {
        let clock = TestClock::new();
        let mut stats = FrameStats::default();
        for _ in 0..5 {
            stats.record(clock.now());
            clock.advance(Duration::from_millis(20));
        }
        assert_eq!(stats.frames(), 5);
        assert!((stats.fps() - 50.0).abs() < 0.5);

        // one slow frame pulls the average down only partly
        clock.advance(Duration::from_millis(80));
        stats.record(clock.now());
        assert!(stats.fps() > 10.0 && stats.fps() < 50.0);
    }

    #[test]
    fn overlay_summarises_state() {
        let (_clock, mut b) = button();
        b.set_enabled(false);
        b.set_checked(true);
        let overlay = b.presenter().overlay_lines();
        assert_eq!(overlay[2], "offset: 160.0");
        assert_eq!(overlay[3], "state: Checked");
    }
}
