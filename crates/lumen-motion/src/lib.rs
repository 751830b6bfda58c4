//! Animation clock and parameter driver.
//!
//! Everything a lesson animates is derived here from two inputs: seconds since
//! the clock started, and one discrete scale signal per frame. The outputs are
//! plain numbers; the engine decides how they reach the GPU.
//!
//! ```
//! use lumen_motion::{AnimationClock, ManualTime, ParameterDriver, ScaleInput};
//!
//! let time = ManualTime::new();
//! let mut clock = AnimationClock::start_with(time.clone());
//! let mut driver = ParameterDriver::default();
//!
//! time.advance_secs(0.5);
//! let out = driver.frame(clock.elapsed(), ScaleInput::Idle);
//! assert!((out.rotation_angle_radians - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! ```

pub mod clock;
pub mod driver;

pub use clock::{AnimationClock, ManualTime, MonotonicTime, TimeSource};
pub use driver::{
    apply_scale_delta, color_intensity, current_scale, rotation_angle, DriverConfig, DriverState,
    OutputParameters, ParameterDriver, ScaleBounds, ScaleInput, COLOR_FREQUENCY, COLOR_PERIOD,
    ROTATION_DEGREES_PER_SECOND, SCALE_STEP,
};
