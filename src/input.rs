//! Platform-neutral input events
//!
//! The SDL front end translates its events into these so lessons can be
//! driven (and tested) without a window.

/// Keys the lessons care about. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    /// Number row key 0-9
    Digit(u8),
    Other,
}

impl Key {
    /// Lesson index selected by a number key: 1..9 pick lessons 0..8, 0 picks lesson 9
    pub fn lesson_index(self) -> Option<usize> {
        match self {
            Key::Digit(0) => Some(9),
            Key::Digit(d @ 1..=9) => Some(usize::from(d) - 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
    /// Joystick axis motion. Axis 0 is X, axis 1 is Y.
    JoyAxis { axis: u8, value: i16 },
}

/// Default dead zone for analog sticks
pub const JOYSTICK_DEAD_ZONE: i16 = 8000;

/// Collapse an analog axis value to -1, 0 or 1.
///
/// Values inside `[-dead_zone, dead_zone]` are neutral.
pub fn axis_direction(value: i16, dead_zone: i16) -> i8 {
    if value < dead_zone.saturating_neg() {
        -1
    } else if value > dead_zone {
        1
    } else {
        0
    }
}

/// Angle in degrees of an 8-way direction, with 0 when the stick is centered
pub fn joystick_angle(x_dir: i8, y_dir: i8) -> f64 {
    if x_dir == 0 && y_dir == 0 {
        return 0.0;
    }
    f64::from(y_dir).atan2(f64::from(x_dir)).to_degrees()
}
