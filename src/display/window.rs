use log::{info, warn};
use sdl2::event::Event;
use sdl2::joystick::Joystick;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, JoystickSubsystem};

use super::PixelBuffer;
use crate::input::{InputEvent, Key};

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    _joystick_subsystem: JoystickSubsystem,
    /// First attached game controller, if any. Closed on drop.
    _joystick: Option<Joystick>,
}

/// Streaming texture the pixel buffer is uploaded into each frame
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

impl Display {
    /// Create the window and renderer.
    /// vsync=true: locked to monitor refresh
    /// vsync=false: uncapped framerate
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let joystick_subsystem = sdl_context.joystick()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let joystick = open_first_joystick(&joystick_subsystem);

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self {
                canvas,
                event_pump,
                _joystick_subsystem: joystick_subsystem,
                _joystick: joystick,
            },
            texture_creator,
        ))
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        if (buffer.width(), buffer.height()) != (target.width, target.height) {
            return Err(format!(
                "buffer is {}x{} but render target is {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            ));
        }
        target
            .texture
            .update(None, buffer.as_bytes(), (buffer.width() * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => events.push(InputEvent::KeyDown {
                    key: map_keycode(k),
                    repeat,
                }),
                Event::KeyUp {
                    keycode: Some(k),
                    repeat,
                    ..
                } => events.push(InputEvent::KeyUp {
                    key: map_keycode(k),
                    repeat,
                }),
                Event::JoyAxisMotion {
                    axis_idx, value, ..
                } => events.push(InputEvent::JoyAxis {
                    axis: axis_idx,
                    value,
                }),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

fn open_first_joystick(subsystem: &JoystickSubsystem) -> Option<Joystick> {
    let count = match subsystem.num_joysticks() {
        Ok(count) => count,
        Err(e) => {
            warn!("Could not enumerate joysticks: {e}");
            return None;
        },
    };
    if count == 0 {
        warn!("No joysticks connected, arrow keys stand in for the stick");
        return None;
    }
    match subsystem.open(0) {
        Ok(joystick) => {
            info!("Opened joystick 0: {}", joystick.name());
            Some(joystick)
        },
        Err(e) => {
            warn!("Unable to open game controller: {e}");
            None
        },
    }
}

fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Escape => Key::Escape,
        Keycode::Num0 | Keycode::Kp0 => Key::Digit(0),
        Keycode::Num1 | Keycode::Kp1 => Key::Digit(1),
        Keycode::Num2 | Keycode::Kp2 => Key::Digit(2),
        Keycode::Num3 | Keycode::Kp3 => Key::Digit(3),
        Keycode::Num4 | Keycode::Kp4 => Key::Digit(4),
        Keycode::Num5 | Keycode::Kp5 => Key::Digit(5),
        Keycode::Num6 | Keycode::Kp6 => Key::Digit(6),
        Keycode::Num7 | Keycode::Kp7 => Key::Digit(7),
        Keycode::Num8 | Keycode::Kp8 => Key::Digit(8),
        Keycode::Num9 | Keycode::Kp9 => Key::Digit(9),
        _ => Key::Other,
    }
}
