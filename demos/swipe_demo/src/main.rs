use std::thread::sleep;
use std::time::Duration;

use swipeable_core::Vec2;
use swipeable_core::animation::{Clock, SystemClock};
use swipeable_core::input::PointerEvent;
use swipeable_devtools::TraceAdapter;
use swipeable_ui::*;

const FRAME: Duration = Duration::from_millis(16);

fn run_frames(button: &mut SwipeButton<TraceAdapter>) {
    let clock = SystemClock;
    loop {
        sleep(FRAME);
        button.presenter_mut().frame(clock.now());
        if !button.tick() {
            break;
        }
    }
    log::info!("{}", button.presenter().overlay());
}

/// Press the thumb, drag its leading edge to `offset`, release.
fn swipe(button: &mut SwipeButton<TraceAdapter>, offset: f32) {
    let delta = offset - button.thumb_offset() + 20.0;
    button.handle_pointer(&PointerEvent::down(1, Vec2::new(20.0, 20.0)));
    button.handle_pointer(&PointerEvent::moved(1, Vec2::new(20.0, delta)));
    button.handle_pointer(&PointerEvent::up(1, Vec2::new(20.0, 20.0)));
    run_frames(button);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ToggleConfig::default().animation_duration_ms(250);
    let mut button = SwipeButton::new(config, TraceAdapter::new())?;
    button.set_geometry(200.0, 40.0);
    button.set_swipe_progress_to_finish(0.6)?;
    button.subscribe(|e: SwipeEvent| log::info!("listener: {e:?}"));
    button
        .state_signal()
        .subscribe(|s| log::info!("state is now {s:?}"));

    log::info!("swipe most of the way: commits");
    swipe(&mut button, 150.0);

    log::info!("swipe back a little: snaps back");
    swipe(&mut button, 130.0);

    log::info!("tap: nudge");
    button.handle_pointer(&PointerEvent::down(1, Vec2::new(20.0, 20.0)));
    button.handle_pointer(&PointerEvent::up(1, Vec2::new(20.0, 20.0)));
    run_frames(&mut button);

    log::info!("programmatic uncheck");
    button.set_checked(false);
    run_frames(&mut button);

    if let Err(e) = button.set_animation_duration(0) {
        log::warn!("rejected: {e}");
    }

    let trace = button.presenter();
    println!(
        "{} presenter calls, final state {:?}",
        trace.calls.len(),
        button.state()
    );
    Ok(())
}
