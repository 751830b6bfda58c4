use std::f64::consts::PI;

/// Angular frequency of the color pulse, in radians per second.
pub const COLOR_FREQUENCY: f64 = 4.0;

/// Seconds for one full color pulse at the default frequency.
pub const COLOR_PERIOD: f64 = 2.0 * PI / COLOR_FREQUENCY;

/// Rotation rate of the spinning transform, in degrees per second.
pub const ROTATION_DEGREES_PER_SECOND: f64 = 180.0;

/// Scale change applied per frame while a scale key is held.
pub const SCALE_STEP: f64 = 0.01;

/// Red-channel pulse: `(sin(elapsed * 4) + 1) / 2`.
///
/// Output is in `[0, 1]`, equals `0.5` at `elapsed = 0`, and repeats every
/// `π / 2` seconds.
#[inline]
pub fn color_intensity(elapsed: f64) -> f64 {
    pulse(elapsed, COLOR_FREQUENCY)
}

/// Half a turn per second, in radians. Never wrapped.
#[inline]
pub fn rotation_angle(elapsed: f64) -> f64 {
    spin(elapsed, ROTATION_DEGREES_PER_SECOND)
}

#[inline]
fn pulse(elapsed: f64, frequency: f64) -> f64 {
    ((elapsed * frequency).sin() + 1.0) / 2.0
}

#[inline]
fn spin(elapsed: f64, degrees_per_second: f64) -> f64 {
    (elapsed * degrees_per_second).to_radians()
}

/// One scale step of size `step` in `direction`; `Idle` returns `scale`.
#[inline]
fn step_scale(scale: f64, direction: ScaleInput, step: f64) -> f64 {
    match direction {
        ScaleInput::Idle => scale,
        _ => scale + direction.sign() * step,
    }
}

/// Discrete per-frame scale signal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ScaleInput {
    /// `+1`
    Grow,
    /// `-1`
    Shrink,
    #[default]
    Idle,
}

impl ScaleInput {
    /// Maps held up/down keys to a signal. Both or neither held is `Idle`.
    pub fn from_keys(up: bool, down: bool) -> Self {
        match (up, down) {
            (true, false) => Self::Grow,
            (false, true) => Self::Shrink,
            _ => Self::Idle,
        }
    }

    /// `+1`, `-1` or `0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Grow => 1.0,
            Self::Shrink => -1.0,
            Self::Idle => 0.0,
        }
    }
}

/// Optional clamp for the accumulated scale factor.
///
/// Both ends default to `None`, which keeps accumulation unbounded.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScaleBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleBounds {
    pub const UNBOUNDED: Self = Self { min: None, max: None };

    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max);
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Clamps `value` into the configured range.
    pub fn apply(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

/// Driver tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DriverConfig {
    pub color_frequency: f64,
    pub rotation_degrees_per_second: f64,
    pub scale_step: f64,
    pub scale_bounds: ScaleBounds,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            color_frequency: COLOR_FREQUENCY,
            rotation_degrees_per_second: ROTATION_DEGREES_PER_SECOND,
            scale_step: SCALE_STEP,
            scale_bounds: ScaleBounds::UNBOUNDED,
        }
    }
}

/// Mutable driver state. Only `scale_factor` survives across frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DriverState {
    pub scale_factor: f64,
}

impl Default for DriverState {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

/// Adds one scale step in `direction`, unclamped. Returns the new factor.
pub fn apply_scale_delta(state: &mut DriverState, direction: ScaleInput) -> f64 {
    state.scale_factor = step_scale(state.scale_factor, direction, SCALE_STEP);
    state.scale_factor
}

#[inline]
pub fn current_scale(state: &DriverState) -> f64 {
    state.scale_factor
}

/// Render-ready values for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OutputParameters {
    pub color_intensity: f64,
    pub rotation_angle_radians: f64,
    pub scale_factor: f64,
}

/// Maps elapsed time and per-frame input to [`OutputParameters`].
#[derive(Debug, Clone, Default)]
pub struct ParameterDriver {
    config: DriverConfig,
    state: DriverState,
}

impl ParameterDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            state: DriverState {
                scale_factor: config.scale_bounds.apply(1.0),
            },
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    pub fn color_intensity(&self, elapsed: f64) -> f64 {
        pulse(elapsed, self.config.color_frequency)
    }

    pub fn rotation_angle(&self, elapsed: f64) -> f64 {
        spin(elapsed, self.config.rotation_degrees_per_second)
    }

    /// Applies one step of `direction` and the configured bounds.
    ///
    /// Call at most once per frame per sampled signal.
    pub fn apply_scale_delta(&mut self, direction: ScaleInput) -> f64 {
        let raw = step_scale(self.state.scale_factor, direction, self.config.scale_step);
        let clamped = self.config.scale_bounds.apply(raw);
        if clamped != raw {
            log::trace!("scale factor clamped: {raw} -> {clamped}");
        }
        self.state.scale_factor = clamped;
        clamped
    }

    #[inline]
    pub fn current_scale(&self) -> f64 {
        self.state.scale_factor
    }

    /// Applies this frame's input, then evaluates every output at `elapsed`.
    pub fn frame(&mut self, elapsed: f64, input: ScaleInput) -> OutputParameters {
        self.apply_scale_delta(input);
        OutputParameters {
            color_intensity: self.color_intensity(elapsed),
            rotation_angle_radians: self.rotation_angle(elapsed),
            scale_factor: self.current_scale(),
        }
    }
}
