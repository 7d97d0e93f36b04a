use crate::{
    camera::PlayerCamera,
    convert::{quat_from_na, quat_to_na, vec3_from_na, vec3_to_na},
    player::{CharacterBody, FirstPersonController, PlayerInput},
    settings::ControllerSettings,
    world::StaticWorld,
};
use bevy::prelude::*;
use locomotion::{CrouchEvent, RapierCharacter, yaw_rotation};

/// Run one controller step for the local player against the static world.
///
/// The Rapier view is rebuilt every frame from the state kept on the entity, then the
/// results are written back: position and yaw on the body, pitch and offset on the camera.
pub(super) fn drive_controller(
    time: Res<Time>,
    world: Option<Res<StaticWorld>>,
    settings: Res<ControllerSettings>,
    mut input: ResMut<PlayerInput>,
    player: Option<
        Single<
            (&mut Transform, &mut FirstPersonController, &mut CharacterBody),
            Without<PlayerCamera>,
        >,
    >,
    camera: Option<Single<&mut Transform, With<PlayerCamera>>>,
) {
    let (Some(world), Some(player), Some(camera)) = (world, player, camera) else {
        return;
    };
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let (mut transform, mut fps, mut body) = player.into_inner();
    let mut camera_tf = camera.into_inner();

    let sample = input.0.take_sample();
    let orientation = quat_to_na(transform.rotation);

    let mut host = RapierCharacter::new(
        &world.0,
        settings.kcc.controller(),
        dt,
        vec3_to_na(transform.translation),
        body.capsule,
        vec3_to_na(camera_tf.translation),
        body.grounded,
    );

    let out = fps.0.step(&sample, &orientation, dt, &mut host);

    transform.translation = vec3_from_na(&host.position);
    transform.rotation = quat_from_na(&(orientation * yaw_rotation(out.yaw_delta)));
    body.capsule = host.capsule;
    body.grounded = host.grounded;

    camera_tf.translation = vec3_from_na(&host.camera_offset);
    camera_tf.rotation = quat_from_na(&out.camera_rotation);

    match out.crouch_event {
        Some(CrouchEvent::Crouched) => debug!("Crouched, capsule height {}", out.capsule_height),
        Some(CrouchEvent::StoodUp) => debug!("Stood up, capsule height {}", out.capsule_height),
        Some(CrouchEvent::StandBlocked) | None => {}
    }
}
