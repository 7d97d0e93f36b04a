/// Vertical velocity (m/s) the controller sticks to while grounded.
///
/// A pure zero makes the ground probe flicker to "airborne" for single frames on
/// uneven ground, so grounded bodies keep pressing down a little.
pub const GROUNDED_STICK_VELOCITY: f32 = -2.0;

/// Default planar walking speed in meters per second.
pub const DEFAULT_SPEED_MPS: f32 = 5.0;

/// Planar speed multiplier applied while crouching.
pub const DEFAULT_CROUCH_SPEED_MULTIPLIER: f32 = 0.5;

/// Peak height of a jump in meters.
pub const DEFAULT_JUMP_HEIGHT_M: f32 = 2.0;

/// Downward acceleration in meters per second squared.
///
/// Convention: negative means down. Integrate as `v.y += gravity * dt`.
pub const DEFAULT_GRAVITY_MPS2: f32 = -9.81;

/// Rate used to relax planar movement toward the input target while input is held.
pub const DEFAULT_ACCELERATION: f32 = 10.0;

/// Rate used to relax planar movement toward zero once input is released.
pub const DEFAULT_DECELERATION: f32 = 10.0;

/// Look sensitivity in degrees per unit of look input per second.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 100.0;

/// How far the camera drops (meters) when crouching.
pub const DEFAULT_CROUCH_CAMERA_OFFSET_M: f32 = 0.5;

/// Lowest allowed pitch in degrees (looking up).
pub const DEFAULT_PITCH_MIN_DEG: f32 = -90.0;

/// Highest allowed pitch in degrees (looking down).
pub const DEFAULT_PITCH_MAX_DEG: f32 = 90.0;

/// Crouched capsule height as a fraction of the standing height.
pub const CROUCH_HEIGHT_FRACTION: f32 = 0.5;
