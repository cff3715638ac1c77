//! Ports of the classic SDL2 tutorial lessons
//!
//! The collision routines, the single-slot channel and every lesson are
//! plain Rust over a software pixel buffer. Only the window front end
//! (`display::Display`, behind the `sdl` feature) talks to SDL.

pub mod collision;
pub mod config;
pub mod display;
pub mod input;
pub mod lessons;
pub mod motion;
pub mod particles;
pub mod sync;
pub mod texture;
pub mod util;
