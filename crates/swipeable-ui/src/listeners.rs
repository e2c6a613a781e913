use smallvec::SmallVec;

use crate::ToggleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeEvent {
    SwipedOn,
    SwipedOff,
    /// Fired after the direction-specific event of the same swipe.
    Swiped,
}

/// Observer of completed user swipes. Programmatic changes are not swipes.
pub trait SwipeListener {
    fn on_swiped(&mut self) {}
    fn on_swiped_on(&mut self) {}
    fn on_swiped_off(&mut self) {}
}

impl<F: FnMut(SwipeEvent)> SwipeListener for F {
    fn on_swiped(&mut self) {
        self(SwipeEvent::Swiped)
    }
    fn on_swiped_on(&mut self) {
        self(SwipeEvent::SwipedOn)
    }
    fn on_swiped_off(&mut self) {
        self(SwipeEvent::SwipedOff)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: SmallVec<[(ListenerId, Box<dyn SwipeListener>); 2]>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl SwipeListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notify every listener, in subscription order, of a swipe into `state`.
    pub fn emit(&mut self, state: ToggleState) {
        log::debug!("swiped to {state:?}, {} listener(s)", self.entries.len());
        for (_, listener) in self.entries.iter_mut() {
            match state {
                ToggleState::Checked => listener.on_swiped_on(),
                ToggleState::Unchecked => listener.on_swiped_off(),
            }
            listener.on_swiped();
        }
    }
}
