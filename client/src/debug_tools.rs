//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::{
    convert::vec3_from_na,
    player::{CharacterBody, FirstPersonController},
};

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, draw_character_gizmos);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Outline the collision capsule, and while crouched, the volume the stand-up sweep covers.
fn draw_character_gizmos(
    mut gizmos: Gizmos,
    players: Query<(&Transform, &CharacterBody, &FirstPersonController)>,
) {
    for (transform, body, fps) in &players {
        let grounded = if body.grounded {
            Color::srgb(0.2, 0.9, 0.3)
        } else {
            Color::srgb(0.9, 0.6, 0.2)
        };
        gizmos.primitive_3d(
            &Capsule3d::new(body.capsule.radius, body.capsule.half_segment() * 2.0),
            Isometry3d::from_translation(transform.translation),
            grounded,
        );

        let crouch = fps.0.state().crouch();
        if !crouch.is_crouching() {
            continue;
        }
        let query = crouch.clearance_query();
        let start = transform.translation + vec3_from_na(&query.origin_offset);
        let end = start + vec3_from_na(&query.direction.into_inner()) * query.distance;

        gizmos.sphere(Isometry3d::from_translation(start), query.radius, Color::WHITE);
        gizmos.sphere(Isometry3d::from_translation(end), query.radius, Color::srgb(0.9, 0.2, 0.2));
        gizmos.line(start, end, Color::WHITE);
    }
}
