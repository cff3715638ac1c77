//! Joystick input
//!
//! The first two stick axes are collapsed to an 8-way direction and an
//! arrow in the middle of the window points that way. Arrow keys stand in
//! when no stick is attached or the stick is centered.

use super::{steer, Lesson, LessonContext};
use crate::display::PixelBuffer;
use crate::input::{axis_direction, joystick_angle, InputEvent};
use crate::motion::Velocity;
use crate::texture::Texture;

const X_AXIS: u8 = 0;
const Y_AXIS: u8 = 1;

pub struct JoystickLesson {
    arrow: Texture,
    dead_zone: i16,
    stick: (i8, i8),
    keys: Velocity,
}

impl JoystickLesson {
    pub fn new(ctx: &LessonContext) -> Self {
        Self {
            arrow: Texture::load_or(ctx.asset("arrow.png"), Texture::arrow),
            dead_zone: ctx.dead_zone,
            stick: (0, 0),
            keys: Velocity::default(),
        }
    }

    /// Current 8-way direction, stick first
    pub fn direction(&self) -> (i8, i8) {
        if self.stick != (0, 0) {
            return self.stick;
        }
        let clamp = |v: i32| v.signum() as i8;
        (clamp(self.keys.x), clamp(self.keys.y))
    }

    pub fn angle(&self) -> f64 {
        let (x, y) = self.direction();
        joystick_angle(x, y)
    }
}

impl Lesson for JoystickLesson {
    fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::JoyAxis { axis: X_AXIS, value } => {
                self.stick.0 = axis_direction(value, self.dead_zone);
            },
            InputEvent::JoyAxis { axis: Y_AXIS, value } => {
                self.stick.1 = axis_direction(value, self.dead_zone);
            },
            _ => steer(&mut self.keys, event, 1),
        }
    }

    fn render(&mut self, buffer: &mut PixelBuffer) {
        buffer.clear(255, 255, 255);
        let x = (buffer.width() as i32 - self.arrow.width() as i32) / 2;
        let y = (buffer.height() as i32 - self.arrow.height() as i32) / 2;
        self.arrow.render_rotated(buffer, x, y, self.angle());
    }

    fn name(&self) -> &str {
        "Joystick"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::lessons::testing::{context, press, release};

    fn axis(axis: u8, value: i16) -> InputEvent {
        InputEvent::JoyAxis { axis, value }
    }

    #[test]
    fn test_stick_sets_angle() {
        let mut lesson = JoystickLesson::new(&context());
        assert_eq!(lesson.angle(), 0.0);

        lesson.handle_event(&axis(0, 20000));
        lesson.handle_event(&axis(1, 20000));
        assert_eq!(lesson.direction(), (1, 1));
        assert!((lesson.angle() - 45.0).abs() < 1e-9);

        // Inside the dead zone counts as centered
        lesson.handle_event(&axis(0, -7999));
        assert_eq!(lesson.direction(), (0, 1));
        assert!((lesson.angle() - 90.0).abs() < 1e-9);

        // Other axes are ignored
        lesson.handle_event(&axis(2, -32768));
        assert_eq!(lesson.direction(), (0, 1));
    }

    #[test]
    fn test_arrow_keys_stand_in_for_stick() {
        let mut lesson = JoystickLesson::new(&context());
        lesson.handle_event(&press(Key::Left));
        assert_eq!(lesson.direction(), (-1, 0));
        assert!((lesson.angle() - 180.0).abs() < 1e-9);

        // A deflected stick wins over the keys
        lesson.handle_event(&axis(1, -30000));
        assert_eq!(lesson.direction(), (0, -1));

        lesson.handle_event(&axis(1, 0));
        lesson.handle_event(&release(Key::Left));
        assert_eq!(lesson.direction(), (0, 0));
    }

    #[test]
    fn test_arrow_is_drawn_centered() {
        let mut lesson = JoystickLesson::new(&context());
        let mut buffer = PixelBuffer::with_size(640, 480);
        lesson.render(&mut buffer);
        assert_ne!(buffer.get_pixel(320, 240), Some((255, 255, 255)));
        assert_eq!(buffer.get_pixel(0, 0), Some((255, 255, 255)));
    }
}
