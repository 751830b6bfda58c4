//! Lumen engine crate.
//!
//! Owns the window, the wgpu device and surface, input translation, and the
//! config-driven scene setup that the lessons build on.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
