use bevy::prelude::*;
use locomotion::{CapsuleSpec, InputLatch, LocomotionController, RapierCharacter};

use crate::{
    convert::vec3_to_na,
    settings::ControllerSettings,
    world::StaticWorld,
};

mod controller;
mod input;

const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 6.0);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>();

    app.add_systems(Startup, spawn_player);
    app.add_systems(PostStartup, seed_grounded);

    // Input is coalesced into the latch first, then consumed by exactly one controller step.
    app.add_systems(
        Update,
        (input::latch_actions, controller::drive_controller).chain(),
    );
    app.add_systems(Update, input::release_on_teardown);
}

/// Input collected since the last controller step.
#[derive(Resource, Default)]
pub struct PlayerInput(pub InputLatch);

/// The locally controlled first-person entity and its controller state.
#[derive(Component)]
pub struct FirstPersonController(pub LocomotionController);

/// Collision body data the host keeps between frames.
#[derive(Component, Debug)]
pub struct CharacterBody {
    pub capsule: CapsuleSpec,
    pub grounded: bool,
}

fn spawn_player(mut commands: Commands, settings: Res<ControllerSettings>) {
    let controller = LocomotionController::new(
        settings.locomotion,
        settings.capsule,
        settings.camera_offset,
    );

    commands.spawn((
        Name::new("Player"),
        Transform::from_translation(SPAWN_POINT),
        Visibility::Inherited,
        FirstPersonController(controller),
        CharacterBody {
            capsule: settings.capsule,
            grounded: false,
        },
    ));

    info!("Spawned first-person player at {SPAWN_POINT}");
}

/// Derive the first grounded flag from a ray below the feet; afterwards it comes from KCC moves.
fn seed_grounded(
    world: Option<Res<StaticWorld>>,
    settings: Res<ControllerSettings>,
    mut bodies: Query<(&Transform, &mut CharacterBody), Added<CharacterBody>>,
) {
    let Some(world) = world else {
        return;
    };

    for (transform, mut body) in &mut bodies {
        let mut probe = RapierCharacter::new(
            &world.0,
            settings.kcc.controller(),
            0.0,
            vec3_to_na(transform.translation),
            body.capsule,
            settings.camera_offset,
            false,
        );
        probe.probe_support(settings.spawn_support_probe);
        body.grounded = probe.grounded;
    }
}
