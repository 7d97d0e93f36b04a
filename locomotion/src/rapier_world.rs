//! Rapier-backed static world and controller collaborators.
//!
//! - [`RapierQueryWorld`] holds immutable world geometry ready for scene queries.
//! - [`RapierCharacter`] implements every controller seam on top of it: grounded state from
//!   the last KCC move, sweep-and-slide moves via Rapier's `KinematicCharacterController`,
//!   upward ball casts for crouch clearance, and capsule/camera posture.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Immutable world: statics do not move after construction.

// Re-export Rapier so the host can build shapes without depending on `rapier3d` directly.
pub use rapier3d;

use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;

use crate::{
    probe::{CapsuleMover, ClearanceProbe, GroundProbe, PostureSink, SweepQuery},
    types::{CapsuleSpec, Iso, Vec3},
};

/// Definition of one immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - For planes the normal is `rotation * +Y` and `dist = dot(normal, translation) + offset`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite half-space, offset along its pose-derived normal.
    Plane { offset_along_normal: f32 },

    /// Oriented box with half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    Sphere { radius: f32 },

    /// Y-aligned capsule. `half_height` is half the cylinder section.
    CapsuleY { radius: f32, half_height: f32 },
}

/// Rapier structures needed for scene queries and the KCC against a static world.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
}

impl RapierQueryWorld {
    /// Build a query world from static collider definitions (sorted by `id` first).
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.into_iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
            colliders.insert_with_parent(collider_from_def(&def), rb_handle, &mut bodies);
        }

        // Collision detection only (no dynamics) so the broad phase is populated for queries.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        log::debug!("built static query world: {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    /// Borrowed `QueryPipeline` view for scene queries and the KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

/// Collider shape in the body's local frame (the pose lives on the parent rigid body).
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            let n = def.rotation * Vector::y();
            let dist = n.dot(&def.translation) + *offset_along_normal;
            let unit_n = UnitVector::new_normalize(n);

            ColliderBuilder::new(SharedShape::new(HalfSpace::new(unit_n)))
                .translation(unit_n.into_inner() * dist)
                .build()
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),
    }
}

/// Kinematic character controller tunables.
///
/// Values are meters and degrees (converted to radians when building the controller).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KccSettings {
    /// Small gap preserved between the character and its surroundings.
    /// Keep it small but non-zero for numerical stability.
    pub offset: f32,

    /// Maximum climbable slope angle.
    pub max_slope_climb_deg: f32,

    /// Minimum slope angle before automatic sliding starts.
    pub min_slope_slide_deg: f32,

    pub autostep_max_height: f32,
    pub autostep_min_width: f32,

    /// Whether the controller slides against obstacles.
    pub slide: bool,

    /// Increase if the character gets stuck when sliding.
    pub normal_nudge_factor: f32,

    /// Max distance to stick to the ground when moving over small drops.
    pub snap_to_ground: f32,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            offset: 0.02,
            max_slope_climb_deg: 52.0,
            min_slope_slide_deg: 45.0,
            autostep_max_height: 0.325,
            autostep_min_width: 0.2,
            slide: true,
            normal_nudge_factor: 0.05,
            snap_to_ground: 0.2,
        }
    }
}

impl KccSettings {
    pub fn controller(&self) -> KinematicCharacterController {
        KinematicCharacterController {
            offset: CharacterLength::Absolute(self.offset),
            slide: self.slide,
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(self.autostep_max_height),
                min_width: CharacterLength::Absolute(self.autostep_min_width),
                include_dynamic_bodies: false,
            }),
            max_slope_climb_angle: self.max_slope_climb_deg.to_radians(),
            min_slope_slide_angle: self.min_slope_slide_deg.to_radians(),
            snap_to_ground: Some(CharacterLength::Absolute(self.snap_to_ground)),
            normal_nudge_factor: self.normal_nudge_factor,
            ..KinematicCharacterController::default()
        }
    }
}

/// Returns whether there is walkable support within `max_dist` under the capsule's feet.
///
/// Used to seed the grounded flag before the first KCC move has happened.
pub fn has_support_within(
    query_pipeline: &QueryPipeline<'_>,
    center: Vec3,
    capsule: CapsuleSpec,
    max_dist: f32,
    min_ground_normal_y: f32,
) -> bool {
    // Probe from slightly above the feet to avoid starting inside geometry.
    let origin_y = center.y - capsule.height * 0.5 + 0.02;
    let ray = Ray::new(point![center.x, origin_y, center.z], vector![0.0, -1.0, 0.0]);

    query_pipeline
        .cast_ray_and_get_normal(&ray, max_dist.max(0.0), true)
        .is_some_and(|(_handle, hit)| hit.normal.y >= min_ground_normal_y)
}

/// One controlled body living in a [`RapierQueryWorld`] for the duration of a frame.
///
/// The host keeps `position`, `capsule`, `camera_offset` and `grounded` between frames
/// and rebuilds this view each frame.
pub struct RapierCharacter<'a> {
    query_pipeline: QueryPipeline<'a>,
    controller: KinematicCharacterController,
    dt: f32,
    pub position: Vec3,
    pub capsule: CapsuleSpec,
    pub camera_offset: Vec3,
    pub grounded: bool,
}

impl<'a> RapierCharacter<'a> {
    pub fn new(
        world: &'a RapierQueryWorld,
        controller: KinematicCharacterController,
        dt: f32,
        position: Vec3,
        capsule: CapsuleSpec,
        camera_offset: Vec3,
        grounded: bool,
    ) -> Self {
        Self {
            query_pipeline: world.query_pipeline(QueryFilter::only_fixed()),
            controller,
            dt,
            position,
            capsule,
            camera_offset,
            grounded,
        }
    }

    /// Re-derive `grounded` from a short ray below the feet.
    pub fn probe_support(&mut self, max_dist: f32) {
        let min_normal_y = self.controller.max_slope_climb_angle.cos();
        self.grounded = has_support_within(
            &self.query_pipeline,
            self.position,
            self.capsule,
            max_dist,
            min_normal_y,
        );
    }

    #[inline]
    fn shape(&self) -> Capsule {
        Capsule::new_y(self.capsule.half_segment(), self.capsule.radius)
    }
}

impl GroundProbe for RapierCharacter<'_> {
    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

impl ClearanceProbe for RapierCharacter<'_> {
    fn sweep_hits(&self, query: &SweepQuery) -> bool {
        let origin = self.position + query.origin_offset;
        let shape_pos = Iso::translation(origin.x, origin.y, origin.z);
        let shape_vel = query.direction.into_inner();

        self.query_pipeline
            .cast_shape(
                &shape_pos,
                &shape_vel,
                &Ball::new(query.radius),
                ShapeCastOptions::with_max_time_of_impact(query.distance.max(0.0)),
            )
            .is_some()
    }
}

impl CapsuleMover for RapierCharacter<'_> {
    fn move_by(&mut self, delta: Vec3) {
        let start = Iso::translation(self.position.x, self.position.y, self.position.z);
        let corrected = self.controller.move_shape(
            self.dt,
            &self.query_pipeline,
            &self.shape(),
            &start,
            delta,
            |_| {},
        );

        self.position += corrected.translation;
        self.grounded = corrected.grounded;
    }
}

impl PostureSink for RapierCharacter<'_> {
    /// Resize about the feet: `position` is the capsule centre, so it moves by half the change.
    fn set_capsule_height(&mut self, height: f32) {
        let old = self.capsule.height;
        self.capsule = self.capsule.with_height(height);
        self.position.y += (height - old) * 0.5;
    }

    fn set_camera_offset(&mut self, offset: Vec3) {
        self.camera_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LocomotionConfig, controller::LocomotionController, crouch::CrouchEvent,
        input::InputSample, types::Quat,
    };

    const DT: f32 = 1.0 / 60.0;

    fn floor() -> WorldStaticDef {
        WorldStaticDef {
            id: 0,
            translation: vector![0.0, 0.0, 0.0],
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        }
    }

    fn ceiling(bottom_y: f32) -> WorldStaticDef {
        WorldStaticDef {
            id: 1,
            translation: vector![0.0, bottom_y + 0.1, 0.0],
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: vector![5.0, 0.1, 5.0],
            },
        }
    }

    fn body(world: &RapierQueryWorld, position: Vec3, grounded: bool) -> RapierCharacter<'_> {
        RapierCharacter::new(
            world,
            KccSettings::default().controller(),
            DT,
            position,
            CapsuleSpec::new(0.4, 1.8),
            Vec3::new(0.0, 0.7, 0.0),
            grounded,
        )
    }

    #[test]
    fn upward_sweep_hits_only_with_ceiling() {
        let open = RapierQueryWorld::build(vec![floor()]);
        let low = RapierQueryWorld::build(vec![floor(), ceiling(2.0)]);
        let query = SweepQuery::upward(Vec3::new(0.0, 0.45, 0.0), 0.4, 0.9);
        let center = Vec3::new(0.0, 0.5, 0.0);

        assert!(!body(&open, center, true).sweep_hits(&query));
        assert!(body(&low, center, true).sweep_hits(&query));
    }

    #[test]
    fn sweep_shorter_than_gap_is_clear() {
        let world = RapierQueryWorld::build(vec![floor(), ceiling(4.0)]);
        let query = SweepQuery::upward(Vec3::new(0.0, 0.45, 0.0), 0.4, 0.9);
        assert!(!body(&world, Vec3::new(0.0, 0.5, 0.0), true).sweep_hits(&query));
    }

    #[test]
    fn falling_move_lands_on_floor_and_reports_grounded() {
        let world = RapierQueryWorld::build(vec![floor()]);
        let mut b = body(&world, Vec3::new(0.0, 3.0, 0.0), false);

        b.move_by(Vec3::new(0.0, -5.0, 0.0));

        assert!(b.is_grounded());
        assert!(b.position.y > 0.85 && b.position.y < 1.0);
    }

    #[test]
    fn support_probe_finds_floor_under_feet() {
        let world = RapierQueryWorld::build(vec![floor()]);
        let mut b = body(&world, Vec3::new(0.0, 0.92, 0.0), false);
        b.probe_support(0.25);
        assert!(b.grounded);

        let mut high = body(&world, Vec3::new(0.0, 5.0, 0.0), true);
        high.probe_support(0.25);
        assert!(!high.grounded);
    }

    #[test]
    fn controller_stays_crouched_under_low_ceiling() {
        let world = RapierQueryWorld::build(vec![floor(), ceiling(1.5)]);
        let capsule = CapsuleSpec::new(0.4, 1.8);
        let mut controller =
            LocomotionController::new(LocomotionConfig::default(), capsule, Vec3::new(0.0, 0.7, 0.0));

        let mut b = body(&world, Vec3::new(0.0, 0.92, 0.0), true);
        let crouch = InputSample {
            crouch_held: true,
            ..InputSample::default()
        };
        let out = controller.step(&crouch, &Quat::identity(), DT, &mut b);
        assert_eq!(out.crouch_event, Some(CrouchEvent::Crouched));
        assert_eq!(b.capsule.height, 0.9);

        for _ in 0..10 {
            let out = controller.step(&InputSample::default(), &Quat::identity(), DT, &mut b);
            assert_eq!(out.crouch_event, Some(CrouchEvent::StandBlocked));
        }
        assert!(controller.state().is_crouching());
        assert_eq!(b.capsule.height, 0.9);
    }

    #[test]
    fn resizing_keeps_feet_in_place() {
        let world = RapierQueryWorld::build(vec![floor()]);
        let mut b = body(&world, Vec3::new(0.0, 0.92, 0.0), true);
        let feet = |b: &RapierCharacter<'_>| b.position.y - b.capsule.height * 0.5;
        let before = feet(&b);

        b.set_capsule_height(0.9);
        assert!((b.position.y - 0.47).abs() < 1.0e-6);
        assert!((feet(&b) - before).abs() < 1.0e-6);

        b.set_capsule_height(1.8);
        assert!((b.position.y - 0.92).abs() < 1.0e-6);
    }

    #[test]
    fn crouch_stand_and_walk_stays_on_the_floor() {
        let world = RapierQueryWorld::build(vec![floor()]);
        let mut controller = LocomotionController::new(
            LocomotionConfig::default(),
            CapsuleSpec::new(0.4, 1.8),
            Vec3::new(0.0, 0.7, 0.0),
        );
        let mut b = body(&world, Vec3::new(0.0, 0.92, 0.0), true);
        let feet = |b: &RapierCharacter<'_>| b.position.y - b.capsule.height * 0.5;

        let crouch = InputSample {
            crouch_held: true,
            ..InputSample::default()
        };
        for _ in 0..60 {
            controller.step(&crouch, &Quat::identity(), DT, &mut b);
        }
        assert!(controller.state().is_crouching());
        assert!(feet(&b) > -0.05 && feet(&b) < 0.1);

        let walk = InputSample {
            move_axis: nalgebra::Vector2::new(0.0, 1.0),
            ..InputSample::default()
        };
        let out = controller.step(&walk, &Quat::identity(), DT, &mut b);
        assert_eq!(out.crouch_event, Some(CrouchEvent::StoodUp));

        for _ in 0..120 {
            controller.step(&walk, &Quat::identity(), DT, &mut b);
        }
        assert!(!controller.state().is_crouching());
        assert!(b.position.z < -1.0);
        assert!(feet(&b) > -0.05 && feet(&b) < 0.1);
        assert!(b.is_grounded());
    }
}
