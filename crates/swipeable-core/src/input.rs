//! Pointer event model delivered by the host's input system.
//!
//! Positions are in the receiving element's local coordinates: for a toggle
//! thumb, `position.y` is the distance from the thumb's leading edge.

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    /// The gesture was taken over by an ancestor or aborted by the system.
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn touch(id: u64, event: PointerEventKind, position: Vec2) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            event,
            position,
        }
    }

    pub fn down(id: u64, position: Vec2) -> Self {
        Self::touch(id, PointerEventKind::Down(PointerButton::Primary), position)
    }

    pub fn moved(id: u64, position: Vec2) -> Self {
        Self::touch(id, PointerEventKind::Move, position)
    }

    pub fn up(id: u64, position: Vec2) -> Self {
        Self::touch(id, PointerEventKind::Up(PointerButton::Primary), position)
    }

    pub fn cancel(id: u64) -> Self {
        Self::touch(id, PointerEventKind::Cancel, Vec2::ZERO)
    }

    pub fn is_primary(&self) -> bool {
        match self.event {
            PointerEventKind::Down(b) | PointerEventKind::Up(b) => b == PointerButton::Primary,
            PointerEventKind::Move | PointerEventKind::Cancel => true,
        }
    }
}
