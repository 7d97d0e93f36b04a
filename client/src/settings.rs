use bevy::prelude::*;
use locomotion::{CapsuleSpec, KccSettings, LocomotionConfig, Vec3 as NaVec3};

/// Tuning shared by every system that builds or drives the controller.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ControllerSettings {
    pub locomotion: LocomotionConfig,
    pub kcc: KccSettings,
    /// Resting capsule of the player.
    pub capsule: CapsuleSpec,
    /// Resting camera position relative to the capsule center.
    pub camera_offset: NaVec3,
    /// Ray length used to seed the grounded flag on spawn.
    pub spawn_support_probe: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            kcc: KccSettings::default(),
            capsule: CapsuleSpec::new(0.4, 1.8),
            camera_offset: NaVec3::new(0.0, 0.7, 0.0),
            spawn_support_probe: 0.25,
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ControllerSettings>();
    app.add_systems(Startup, report_invalid_settings);
}

fn report_invalid_settings(settings: Res<ControllerSettings>) {
    if let Err(reason) = settings.locomotion.validate() {
        warn!("Locomotion config violates its contract: {reason}");
    }
}
