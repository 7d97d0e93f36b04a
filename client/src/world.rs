//! Static test level: rendered meshes plus the matching Rapier query world.
//!
//! Every piece of geometry is described once as a [`WorldStaticDef`] and used for both the
//! collider and the mesh, so what the player sees is what the controller collides with.

use bevy::prelude::*;
use locomotion::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
use nalgebra::{UnitQuaternion, Vector3};

use crate::convert::{quat_from_na, vec3_from_na};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

/// Immutable collision geometry the controller queries each frame.
#[derive(Resource)]
pub struct StaticWorld(pub RapierQueryWorld);

const FLOOR_SIZE: f32 = 50.0;

fn def(id: u32, translation: [f32; 3], shape: ColliderShapeDef) -> WorldStaticDef {
    WorldStaticDef {
        id,
        translation: Vector3::from(translation),
        rotation: UnitQuaternion::identity(),
        shape,
    }
}

/// Floor, a crate, a low slab to crouch under, a boulder and a post.
pub fn demo_statics() -> Vec<WorldStaticDef> {
    vec![
        def(
            0,
            [0.0, 0.0, 0.0],
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        ),
        def(
            1,
            [5.0, 0.5, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(0.5, 0.5, 0.5),
            },
        ),
        // Underside at 1.3m: too low to stand, high enough for a crouched capsule.
        def(
            2,
            [-4.0, 1.5, 0.0],
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(2.0, 0.2, 2.0),
            },
        ),
        def(3, [0.0, 0.75, -6.0], ColliderShapeDef::Sphere { radius: 0.75 }),
        def(
            4,
            [4.0, 1.5, -4.0],
            ColliderShapeDef::CapsuleY {
                radius: 0.3,
                half_height: 1.2,
            },
        ),
    ]
}

fn mesh_for(shape: &ColliderShapeDef) -> Mesh {
    match shape {
        ColliderShapeDef::Plane { .. } => Plane3d::default()
            .mesh()
            .size(FLOOR_SIZE, FLOOR_SIZE)
            .build(),
        ColliderShapeDef::Cuboid { half_extents } => Cuboid::new(
            half_extents.x * 2.0,
            half_extents.y * 2.0,
            half_extents.z * 2.0,
        )
        .into(),
        ColliderShapeDef::Sphere { radius } => Sphere::new(*radius).mesh().build(),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => Capsule3d::new(*radius, half_height * 2.0).into(),
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let defs = demo_statics();

    let ground = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let props = materials.add(Color::srgb_u8(124, 144, 255));

    for def in &defs {
        let material = match def.shape {
            ColliderShapeDef::Plane { .. } => ground.clone(),
            _ => props.clone(),
        };
        commands.spawn((
            Mesh3d(meshes.add(mesh_for(&def.shape))),
            MeshMaterial3d(material),
            Transform::from_translation(vec3_from_na(&def.translation))
                .with_rotation(quat_from_na(&def.rotation)),
        ));
    }

    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            ..default()
        },
        Transform::from_xyz(-3.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let count = defs.len();
    commands.insert_resource(StaticWorld(RapierQueryWorld::build(defs)));
    info!("World setup: {count} static colliders");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_ids_are_unique() {
        let mut ids: Vec<u32> = demo_statics().iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), demo_statics().len());
    }

    #[test]
    fn slab_fits_a_crouched_capsule_but_not_a_standing_one() {
        let statics = demo_statics();
        let Some(slab) = statics.iter().find(|d| d.id == 2) else {
            panic!("missing slab");
        };
        let ColliderShapeDef::Cuboid { half_extents } = slab.shape else {
            panic!("slab is not a cuboid");
        };
        let underside = slab.translation.y - half_extents.y;

        let standing = crate::settings::ControllerSettings::default().capsule.height;
        assert!(underside < standing);
        assert!(underside > standing * 0.5);
    }
}
