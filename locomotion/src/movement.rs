/*!
Movement integration: planar smoothing, jump impulse and gravity.

A frame runs in a fixed order (see [`integrate`]):
1. Ground refresh, with the grounded stick velocity.
2. Target planar movement from facing-relative input, scaled by speed.
3. Linear smoothing toward the target.
4. Jump impulse when a request is pending and the body is grounded.
5. Gravity, every frame (also on the jump frame, after the impulse).
6. Two discrete moves: planar first, then vertical.
*/

use crate::{
    config::LocomotionConfig,
    constants::GROUNDED_STICK_VELOCITY,
    input::InputSample,
    probe::{CapsuleMover, GroundProbe},
    types::{Quat, Vec3, forward_axis, right_axis},
};

/// Movement-relevant part of the controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Only `y` is read by the vertical logic.
    pub velocity: Vec3,
    /// Smoothed planar movement (m/s). Only ever relaxed toward a target.
    pub smoothed_movement: Vec3,
    /// Refreshed from the ground probe at the start of each frame.
    pub grounded: bool,
    /// Pending jump. Set by a jump press, cleared when a grounded frame consumes it.
    pub jump_requested: bool,
}

/// Translation requests issued for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionDeltas {
    pub planar: Vec3,
    pub vertical: Vec3,
}

/// Linear interpolation with the factor saturated to `[0, 1]`.
///
/// `rate * dt` may exceed 1 for large frames, in which case the result is `target`.
#[inline]
pub fn lerp_clamped(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Facing-relative target planar velocity for this frame.
#[inline]
pub fn target_movement(
    cfg: &LocomotionConfig,
    orientation: &Quat,
    move_axis_x: f32,
    move_axis_y: f32,
    crouching: bool,
) -> Vec3 {
    let dir = right_axis(orientation) * move_axis_x + forward_axis(orientation) * move_axis_y;
    dir * (cfg.speed * cfg.speed_multiplier(crouching))
}

/// Step 1: refresh grounded and pin a falling, grounded body to the stick velocity.
#[inline]
pub fn refresh_ground(motion: &mut MotionState, grounded: bool) {
    motion.grounded = grounded;
    if grounded && motion.velocity.y < 0.0 {
        motion.velocity.y = GROUNDED_STICK_VELOCITY;
    }
}

/// Steps 2 and 3: relax `smoothed_movement` toward the input target; returns the planar delta.
pub fn smooth_planar(
    cfg: &LocomotionConfig,
    motion: &mut MotionState,
    orientation: &Quat,
    input: &InputSample,
    crouching: bool,
    dt: f32,
) -> Vec3 {
    let target = target_movement(
        cfg,
        orientation,
        input.move_axis.x,
        input.move_axis.y,
        crouching,
    );
    let rate = if input.has_move_input() {
        cfg.acceleration
    } else {
        cfg.deceleration
    };
    motion.smoothed_movement = lerp_clamped(motion.smoothed_movement, target, rate * dt);
    motion.smoothed_movement * dt
}

/// Steps 4 and 5: jump impulse (if pending and grounded), then gravity. Returns the vertical delta.
pub fn integrate_vertical(cfg: &LocomotionConfig, motion: &mut MotionState, dt: f32) -> Vec3 {
    if motion.jump_requested && motion.grounded {
        motion.velocity.y = cfg.jump_velocity();
        motion.jump_requested = false;
    }

    motion.velocity.y += cfg.gravity * dt;
    motion.velocity * dt
}

/// Run one full movement frame against the host's probe and mover.
///
/// The planar and vertical deltas are issued as two separate moves, planar first: collision
/// response to the first can change contact for the second.
pub fn integrate<H>(
    cfg: &LocomotionConfig,
    motion: &mut MotionState,
    orientation: &Quat,
    input: &InputSample,
    crouching: bool,
    dt: f32,
    host: &mut H,
) -> MotionDeltas
where
    H: GroundProbe + CapsuleMover,
{
    refresh_ground(motion, host.is_grounded());

    let planar = smooth_planar(cfg, motion, orientation, input, crouching, dt);
    host.move_by(planar);

    let vertical = integrate_vertical(cfg, motion, dt);
    host.move_by(vertical);

    MotionDeltas { planar, vertical }
}
