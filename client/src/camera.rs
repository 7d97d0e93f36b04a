use crate::{convert::vec3_from_na, player::FirstPersonController};
use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, attach_camera);
}

/// Marks the camera node driven by the controller's pitch and posture.
#[derive(Component)]
pub struct PlayerCamera;

/// Give every new controller its first-person camera as a child, at the resting offset.
fn attach_camera(
    mut commands: Commands,
    controllers: Query<(Entity, &FirstPersonController), Added<FirstPersonController>>,
) {
    for (entity, fps) in &controllers {
        let offset = vec3_from_na(&fps.0.state().crouch().standing_camera_offset());

        commands.entity(entity).with_child((
            PlayerCamera,
            Camera3d::default(),
            bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
            Transform::from_translation(offset),
            DistanceFog {
                color: Color::srgba(0.35, 0.48, 0.66, 1.0),
                directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
                directional_light_exponent: 30.0,
                falloff: FogFalloff::from_visibility_colors(
                    200.0, // Fog distance
                    Color::srgb(0.35, 0.5, 0.66),
                    Color::srgb(0.8, 0.8, 0.7),
                ),
            },
        ));
    }
}
