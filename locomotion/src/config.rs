/*!
Controller tuning.

`LocomotionConfig` is fixed when the controller is built. Values are not
clamped or validated by the step functions; out-of-range values simply produce
correspondingly extreme (or degenerate) motion. Hosts that load tuning from
somewhere untrusted can call [`LocomotionConfig::validate`] and report it.

Units are meters, seconds and degrees.
*/

use crate::constants::{
    DEFAULT_ACCELERATION, DEFAULT_CROUCH_CAMERA_OFFSET_M, DEFAULT_CROUCH_SPEED_MULTIPLIER,
    DEFAULT_DECELERATION, DEFAULT_GRAVITY_MPS2, DEFAULT_JUMP_HEIGHT_M, DEFAULT_MOUSE_SENSITIVITY,
    DEFAULT_PITCH_MAX_DEG, DEFAULT_PITCH_MIN_DEG, DEFAULT_SPEED_MPS,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionConfig {
    /// Planar movement speed (m/s) at full input deflection.
    pub speed: f32,

    /// Scales `speed` while crouching. Ignored when `crouch_enabled` is false.
    pub crouch_speed_multiplier: f32,

    /// Peak jump height (meters).
    pub jump_height: f32,

    /// Vertical acceleration (m/s^2). Negative is down.
    pub gravity: f32,

    /// Smoothing rate toward the input target while input is non-zero.
    pub acceleration: f32,

    /// Smoothing rate toward zero while input is zero.
    pub deceleration: f32,

    /// Degrees of rotation per unit of look input per second.
    pub mouse_sensitivity: f32,

    /// Camera drop (meters) while crouched.
    pub crouch_camera_offset: f32,

    /// Lower pitch bound (degrees).
    pub pitch_min: f32,

    /// Upper pitch bound (degrees).
    pub pitch_max: f32,

    /// Whether this controller supports the crouch posture at all.
    pub crouch_enabled: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_MPS,
            crouch_speed_multiplier: DEFAULT_CROUCH_SPEED_MULTIPLIER,
            jump_height: DEFAULT_JUMP_HEIGHT_M,
            gravity: DEFAULT_GRAVITY_MPS2,
            acceleration: DEFAULT_ACCELERATION,
            deceleration: DEFAULT_DECELERATION,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            crouch_camera_offset: DEFAULT_CROUCH_CAMERA_OFFSET_M,
            pitch_min: DEFAULT_PITCH_MIN_DEG,
            pitch_max: DEFAULT_PITCH_MAX_DEG,
            crouch_enabled: true,
        }
    }
}

impl LocomotionConfig {
    /// Same tuning with crouch support switched off.
    pub fn without_crouch(self) -> Self {
        Self {
            crouch_enabled: false,
            ..self
        }
    }

    /// Speed multiplier that applies for the given posture.
    #[inline]
    pub fn speed_multiplier(&self, crouching: bool) -> f32 {
        if crouching && self.crouch_enabled {
            self.crouch_speed_multiplier
        } else {
            1.0
        }
    }

    /// Initial vertical velocity that reaches `jump_height` under `gravity`.
    ///
    /// `sqrt(h * -2 * g)`; a non-negative gravity yields NaN or zero, which is the caller's problem.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    /// Report the first obvious contract violation, if any.
    ///
    /// The controller never calls this itself.
    pub fn validate(&self) -> Result<(), &'static str> {
        let values = [
            self.speed,
            self.crouch_speed_multiplier,
            self.jump_height,
            self.gravity,
            self.acceleration,
            self.deceleration,
            self.mouse_sensitivity,
            self.crouch_camera_offset,
            self.pitch_min,
            self.pitch_max,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Config contains a non-finite value");
        }
        if self.speed < 0.0 {
            return Err("Speed is negative");
        }
        if self.gravity >= 0.0 {
            return Err("Gravity must be negative (downward)");
        }
        if self.jump_height < 0.0 {
            return Err("Jump height is negative");
        }
        if self.acceleration < 0.0 || self.deceleration < 0.0 {
            return Err("Smoothing rates must be non-negative");
        }
        if self.pitch_min > self.pitch_max {
            return Err("Pitch clamp range is inverted");
        }
        Ok(())
    }
}
