//! Mouse-look integration.
//!
//! Pitch is accumulated and clamped; yaw is never stored and is handed to the host as a delta.

use crate::{
    config::LocomotionConfig,
    types::{Quat, Vec3},
};

/// Result of one look step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookOutput {
    /// Camera-local rotation, rebuilt from the stored pitch every frame (not accumulated).
    pub camera_rotation: Quat,
    /// Degrees to turn the entity about its up axis this frame. Positive turns right.
    pub yaw_delta: f32,
}

/// Advance `pitch` (degrees, positive looks down) by one frame of look input.
pub fn integrate_look(
    cfg: &LocomotionConfig,
    pitch: &mut f32,
    look_x: f32,
    look_y: f32,
    dt: f32,
) -> LookOutput {
    let mouse_x = look_x * cfg.mouse_sensitivity * dt;
    let mouse_y = look_y * cfg.mouse_sensitivity * dt;

    *pitch = clamp_pitch(cfg, *pitch - mouse_y);

    LookOutput {
        camera_rotation: pitch_rotation(*pitch),
        yaw_delta: mouse_x,
    }
}

/// Bound `pitch` to the configured range. An inverted or NaN range never panics; the
/// upper bound wins when the bounds cross.
#[inline]
pub fn clamp_pitch(cfg: &LocomotionConfig, pitch: f32) -> f32 {
    pitch.max(cfg.pitch_min).min(cfg.pitch_max)
}

/// Pure pitch about the local right axis. Positive pitch tilts the view down.
#[inline]
pub fn pitch_rotation(pitch_deg: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), -pitch_deg.to_radians())
}

/// Entity rotation for a yaw delta in degrees. Positive turns right (clockwise seen from above).
#[inline]
pub fn yaw_rotation(yaw_delta_deg: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), -yaw_delta_deg.to_radians())
}
