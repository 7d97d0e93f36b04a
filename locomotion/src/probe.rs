/*!
Collaborator seams between the controller and its host.

The controller never owns collision or scene state. Each frame it asks the host:
- "are we grounded?" ([`GroundProbe`]),
- "is there room to stand up?" ([`ClearanceProbe`]),
- "move the capsule by this much" ([`CapsuleMover`]),
- "apply this capsule height / camera offset" ([`PostureSink`]).

Implementations must not hold a reference back to the controller state.
*/

use nalgebra::Unit;

use crate::types::Vec3;

/// Sphere sweep request, expressed relative to the entity origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepQuery {
    /// Sweep start, offset from the entity origin (entity-local axes are not applied).
    pub origin_offset: Vec3,
    /// Radius of the swept sphere.
    pub radius: f32,
    /// Unit direction of the sweep.
    pub direction: Unit<Vec3>,
    /// Sweep length in meters.
    pub distance: f32,
}

impl SweepQuery {
    #[inline]
    pub fn upward(origin_offset: Vec3, radius: f32, distance: f32) -> Self {
        Self {
            origin_offset,
            radius,
            direction: Vec3::y_axis(),
            distance,
        }
    }
}

pub trait GroundProbe {
    /// Is the capsule currently resting on a supporting surface?
    fn is_grounded(&self) -> bool;
}

pub trait ClearanceProbe {
    /// Would the swept sphere intersect world geometry?
    fn sweep_hits(&self, query: &SweepQuery) -> bool;
}

pub trait CapsuleMover {
    /// Move by `delta` (world space), resolving collisions. The achieved motion is not read back.
    fn move_by(&mut self, delta: Vec3);
}

pub trait PostureSink {
    /// Set the capsule's full height (meters).
    fn set_capsule_height(&mut self, height: f32);

    /// Set the camera's local position relative to the entity.
    fn set_camera_offset(&mut self, offset: Vec3);
}
