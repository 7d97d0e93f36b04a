pub mod config;
pub mod constants;
pub mod controller;
pub mod crouch;
pub mod input;
pub mod look;
pub mod movement;
pub mod probe;
pub mod rapier_world;
pub mod types;

pub use config::LocomotionConfig;
pub use controller::{LocomotionController, LocomotionState, StepOutput};
pub use crouch::{CrouchEvent, Posture};
pub use input::{InputLatch, InputSample};
pub use look::{pitch_rotation, yaw_rotation};
pub use probe::{CapsuleMover, ClearanceProbe, GroundProbe, PostureSink, SweepQuery};
pub use rapier_world::{
    ColliderShapeDef, KccSettings, RapierCharacter, RapierQueryWorld, WorldStaticDef,
};
pub use types::{CapsuleSpec, Quat, Vec3};
