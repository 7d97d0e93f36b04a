/*!
Math aliases and small value types shared by the controller modules.

Convention: right-handed, +Y up, forward is -Z and right is +X in the entity's
local frame (nalgebra/Rapier/Bevy agree on this).
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// Capsule dimensions for the controlled body.
///
/// `height` is the full tip-to-tip height, caps included, so the cylinder section is
/// `height - 2 * radius` long (never negative).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub height: f32,
}

impl CapsuleSpec {
    #[inline]
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Half-length of the cylinder section along +Y.
    #[inline]
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    #[inline]
    pub fn with_height(self, height: f32) -> Self {
        Self { height, ..self }
    }
}

/// Entity-local right axis (+X) rotated into world space.
#[inline]
pub fn right_axis(orientation: &Quat) -> Vec3 {
    orientation * Vec3::x()
}

/// Entity-local forward axis (-Z) rotated into world space.
#[inline]
pub fn forward_axis(orientation: &Quat) -> Vec3 {
    orientation * -Vec3::z()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_segment_excludes_caps_and_never_goes_negative() {
        let c = CapsuleSpec::new(0.5, 2.0);
        assert!((c.half_segment() - 0.5).abs() < 1.0e-6);

        // Shorter than two radii collapses to a sphere.
        let squat = c.with_height(0.8);
        assert_eq!(squat.half_segment(), 0.0);
    }

    #[test]
    fn axes_follow_orientation() {
        let identity = Quat::identity();
        assert!((right_axis(&identity) - Vec3::x()).norm() < 1.0e-6);
        assert!((forward_axis(&identity) + Vec3::z()).norm() < 1.0e-6);

        // A quarter turn to the right (negative about +Y) faces +X.
        let turned = Quat::from_axis_angle(&Vec3::y_axis(), -std::f32::consts::FRAC_PI_2);
        assert!((forward_axis(&turned) - Vec3::x()).norm() < 1.0e-5);
        assert!((right_axis(&turned) - Vec3::z()).norm() < 1.0e-5);
    }
}
