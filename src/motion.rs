//! Keyboard-driven motion with per-axis collision resolution
//!
//! Each tick an entity moves along X, and if it left the screen or hit
//! something the X move is undone; then the same happens along Y. Keeping
//! the axes separate lets an entity slide along a wall it is pressed into.

use crate::input::Key;

/// Screen bounds an entity must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Per-axis velocity accumulated from held arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

impl Velocity {
    /// Update from an arrow key press or release.
    ///
    /// Pressing adds `step` in the key's direction and releasing takes it
    /// back, so opposite keys held together cancel out. Key repeats must be
    /// filtered by the caller.
    pub fn apply_key(&mut self, key: Key, pressed: bool, step: i32) {
        let step = if pressed { step } else { -step };
        match key {
            Key::Up => self.y -= step,
            Key::Down => self.y += step,
            Key::Left => self.x -= step,
            Key::Right => self.x += step,
            _ => {},
        }
    }

    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Move `pos` along one axis, undoing the move if `blocked` rejects the new position.
///
/// `blocked` sees the tentative position and should report screen-edge
/// violations as well as collisions.
pub fn step_axis(
    pos: (i32, i32),
    vel: Velocity,
    axis: Axis,
    blocked: impl Fn((i32, i32)) -> bool,
) -> (i32, i32) {
    let moved = match axis {
        Axis::X => (pos.0 + vel.x, pos.1),
        Axis::Y => (pos.0, pos.1 + vel.y),
    };
    if vel.along(axis) != 0 && blocked(moved) {
        pos
    } else {
        moved
    }
}

/// Apply X then Y resolution for one tick
pub fn step(pos: (i32, i32), vel: Velocity, blocked: impl Fn((i32, i32)) -> bool) -> (i32, i32) {
    let pos = step_axis(pos, vel, Axis::X, &blocked);
    step_axis(pos, vel, Axis::Y, &blocked)
}

/// True if a `w`x`h` box at `pos` sticks out of `bounds`
pub fn out_of_bounds(pos: (i32, i32), w: i32, h: i32, bounds: Bounds) -> bool {
    pos.0 < 0 || pos.0 + w > bounds.width || pos.1 < 0 || pos.1 + h > bounds.height
}
