use bevy::prelude::Vec2;

/// One input event for a frame, in y-down window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerDown(Vec2),
}
