//! Conversions between Bevy's glam types and the controller's nalgebra types.

use bevy::prelude::{Quat, Vec3};
use nalgebra as na;

#[inline]
pub fn vec3_to_na(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn vec3_from_na(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn quat_to_na(q: Quat) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::new_normalize(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

#[inline]
pub fn quat_from_na(q: &na::UnitQuaternion<f32>) -> Quat {
    let c = q.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_agree_across_libraries() {
        let q = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.3);
        let n = quat_to_na(q);

        let v = Vec3::new(0.2, -1.0, 3.5);
        let by_glam = q * v;
        let by_na = vec3_from_na(&(n * vec3_to_na(v)));
        assert!((by_glam - by_na).length() < 1.0e-5);

        let back = quat_from_na(&n);
        assert!(back.angle_between(q) < 1.0e-4);
    }
}
