//! Time subsystem.
//!
//! One `FrameClock` per window; call `tick()` once per presented frame to get
//! a `FrameTime` carrying both the animation elapsed time and a clamped delta.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
