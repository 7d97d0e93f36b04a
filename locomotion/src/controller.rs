/*!
Per-frame first-person controller.

`LocomotionController::step` is the single entry point the host calls once per frame.
Within a frame:
1. Latch a jump press into the pending jump request.
2. Crouch state machine (input boundary; posture is applied before any movement).
3. Movement integration (two discrete moves through the host).
4. Look integration (camera pitch + yaw delta, returned to the host).

The state is owned exclusively by the controller. Collaborators are borrowed for the
duration of `step` only.
*/

use crate::{
    config::LocomotionConfig,
    crouch::{CrouchEvent, CrouchState, Posture},
    input::InputSample,
    look::integrate_look,
    movement::{MotionState, integrate},
    probe::{CapsuleMover, ClearanceProbe, GroundProbe, PostureSink},
    types::{CapsuleSpec, Quat, Vec3},
};

/// Mutable per-entity state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionState {
    pub(crate) motion: MotionState,
    pub(crate) crouch: CrouchState,
    pub(crate) pitch: f32,
}

impl LocomotionState {
    pub fn new(standing_capsule: CapsuleSpec, standing_camera_offset: Vec3) -> Self {
        Self {
            motion: MotionState::default(),
            crouch: CrouchState::new(standing_capsule, standing_camera_offset),
            pitch: 0.0,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    #[inline]
    pub fn smoothed_movement(&self) -> Vec3 {
        self.motion.smoothed_movement
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.motion.grounded
    }

    #[inline]
    pub fn jump_requested(&self) -> bool {
        self.motion.jump_requested
    }

    #[inline]
    pub fn posture(&self) -> Posture {
        self.crouch.posture()
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.crouch.is_crouching()
    }

    /// Camera pitch in degrees. Positive looks down.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn crouch(&self) -> &CrouchState {
        &self.crouch
    }
}

/// Everything the host needs to apply after a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutput {
    /// Planar translation requested this frame (already sent to the mover).
    pub planar_delta: Vec3,
    /// Vertical translation requested this frame (already sent to the mover).
    pub vertical_delta: Vec3,
    /// Camera-local rotation to overwrite (pure pitch).
    pub camera_rotation: Quat,
    /// Degrees to turn the entity about its up axis. Positive turns right.
    pub yaw_delta: f32,
    /// Grounded flag read at the start of this frame.
    pub grounded: bool,
    /// Posture change (or refused change) this frame.
    pub crouch_event: Option<CrouchEvent>,
    /// Current capsule height.
    pub capsule_height: f32,
    /// Current camera local position.
    pub camera_offset: Vec3,
}

#[derive(Clone, Debug)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: LocomotionState,
}

impl LocomotionController {
    /// Build a controller, capturing the entity's resting capsule and camera position.
    pub fn new(
        config: LocomotionConfig,
        standing_capsule: CapsuleSpec,
        standing_camera_offset: Vec3,
    ) -> Self {
        Self {
            config,
            state: LocomotionState::new(standing_capsule, standing_camera_offset),
        }
    }

    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Advance one frame.
    ///
    /// `orientation` is the entity's current world rotation; movement is relative to it.
    pub fn step<H>(
        &mut self,
        input: &InputSample,
        orientation: &Quat,
        dt: f32,
        host: &mut H,
    ) -> StepOutput
    where
        H: GroundProbe + ClearanceProbe + CapsuleMover + PostureSink,
    {
        let cfg = &self.config;
        let state = &mut self.state;

        if input.jump_pressed {
            state.motion.jump_requested = true;
        }

        let crouch_event = state.crouch.update(cfg, input.crouch_held, host);

        let deltas = integrate(
            cfg,
            &mut state.motion,
            orientation,
            input,
            state.crouch.is_crouching(),
            dt,
            host,
        );

        let look = integrate_look(
            cfg,
            &mut state.pitch,
            input.look_axis.x,
            input.look_axis.y,
            dt,
        );

        StepOutput {
            planar_delta: deltas.planar,
            vertical_delta: deltas.vertical,
            camera_rotation: look.camera_rotation,
            yaw_delta: look.yaw_delta,
            grounded: state.motion.grounded,
            crouch_event,
            capsule_height: state.crouch.current_height(),
            camera_offset: state.crouch.current_camera_offset(cfg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::InputLatch, probe::SweepQuery};
    use nalgebra::Vector2;
    use std::cell::Cell;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Call {
        Move(Vec3),
        Height(f32),
        Camera(Vec3),
    }

    /// Records every host call in order; ground and ceiling are scripted.
    #[derive(Default)]
    struct RecordingHost {
        grounded: bool,
        ceiling: bool,
        sweeps: Cell<u32>,
        calls: Vec<Call>,
    }

    impl RecordingHost {
        fn on_ground() -> Self {
            Self {
                grounded: true,
                ..Self::default()
            }
        }

        fn moves(&self) -> Vec<Vec3> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Move(d) => Some(*d),
                    _ => None,
                })
                .collect()
        }
    }

    impl GroundProbe for RecordingHost {
        fn is_grounded(&self) -> bool {
            self.grounded
        }
    }

    impl ClearanceProbe for RecordingHost {
        fn sweep_hits(&self, _query: &SweepQuery) -> bool {
            self.sweeps.set(self.sweeps.get() + 1);
            self.ceiling
        }
    }

    impl CapsuleMover for RecordingHost {
        fn move_by(&mut self, delta: Vec3) {
            self.calls.push(Call::Move(delta));
        }
    }

    impl PostureSink for RecordingHost {
        fn set_capsule_height(&mut self, height: f32) {
            self.calls.push(Call::Height(height));
        }

        fn set_camera_offset(&mut self, offset: Vec3) {
            self.calls.push(Call::Camera(offset));
        }
    }

    fn controller() -> LocomotionController {
        LocomotionController::new(
            LocomotionConfig::default(),
            CapsuleSpec::new(0.5, 2.0),
            Vec3::new(0.0, 0.8, 0.0),
        )
    }

    #[test]
    fn fresh_state_stands_level_and_still() {
        let c = controller();
        let s = c.state();
        assert_eq!(s.posture(), Posture::Standing);
        assert_eq!(s.pitch(), 0.0);
        assert_eq!(s.velocity(), Vec3::zeros());
        assert_eq!(s.smoothed_movement(), Vec3::zeros());
        assert!(!s.jump_requested());
    }

    #[test]
    fn each_frame_issues_planar_then_vertical_move() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let input = InputSample {
            move_axis: Vector2::new(0.0, 1.0),
            ..InputSample::default()
        };

        let out = c.step(&input, &Quat::identity(), DT, &mut host);

        assert_eq!(host.moves(), vec![out.planar_delta, out.vertical_delta]);
        assert_eq!(out.planar_delta.y, 0.0);
        assert!(out.planar_delta.z < 0.0);
        assert_eq!(out.vertical_delta.x, 0.0);
        assert_eq!(out.vertical_delta.z, 0.0);
    }

    #[test]
    fn one_second_of_forward_input_matches_closed_form() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let input = InputSample {
            move_axis: Vector2::new(1.0, 0.0),
            ..InputSample::default()
        };

        for _ in 0..60 {
            c.step(&input, &Quat::identity(), DT, &mut host);
        }

        let expected = 5.0 * (1.0 - (1.0_f32 - 10.0 * DT).powi(60));
        assert!((c.state().smoothed_movement().x - expected).abs() < 1.0e-4);
    }

    #[test]
    fn grounded_frames_hold_the_stick_velocity_pattern() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let idle = InputSample::default();

        c.step(&idle, &Quat::identity(), DT, &mut host);
        let v1 = c.state().velocity().y;
        assert!((v1 - (-9.81 * DT)).abs() < 1.0e-6);

        // Next frame: clamped to -2 on refresh, then one frame of gravity.
        c.step(&idle, &Quat::identity(), DT, &mut host);
        assert!((c.state().velocity().y - (-2.0 - 9.81 * DT)).abs() < 1.0e-5);
        assert!(c.state().is_grounded());
    }

    #[test]
    fn airborne_gravity_accumulates_linearly() {
        let mut c = controller();
        let mut host = RecordingHost::default();
        let idle = InputSample::default();

        for _ in 0..45 {
            c.step(&idle, &Quat::identity(), DT, &mut host);
        }
        assert!((c.state().velocity().y - (-9.81 * 45.0 / 60.0)).abs() < 1.0e-3);
    }

    #[test]
    fn latched_jump_fires_once_on_ground() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let mut latch = InputLatch::new();

        // Press and release inside one frame still arrives as a press.
        latch.press_jump();
        let out = c.step(&latch.take_sample(), &Quat::identity(), DT, &mut host);

        let impulse = (2.0_f32 * 2.0 * 9.81).sqrt();
        assert!((c.state().velocity().y - (impulse - 9.81 * DT)).abs() < 1.0e-5);
        assert!(out.vertical_delta.y > 0.0);
        assert!(!c.state().jump_requested());

        // No new press: the next grounded frame does not jump again.
        host.grounded = false;
        let before = c.state().velocity().y;
        c.step(&latch.take_sample(), &Quat::identity(), DT, &mut host);
        assert!(c.state().velocity().y < before);
    }

    #[test]
    fn airborne_jump_press_is_buffered_until_landing() {
        let mut c = controller();
        let mut host = RecordingHost::default();

        let press = InputSample {
            jump_pressed: true,
            ..InputSample::default()
        };
        c.step(&press, &Quat::identity(), DT, &mut host);
        assert!(c.state().jump_requested());
        assert!(c.state().velocity().y < 0.0);

        host.grounded = true;
        c.step(&InputSample::default(), &Quat::identity(), DT, &mut host);
        assert!(!c.state().jump_requested());
        assert!(c.state().velocity().y > 0.0);
    }

    #[test]
    fn crouch_applies_posture_before_moving_and_slows_movement() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let input = InputSample {
            move_axis: Vector2::new(0.0, 1.0),
            crouch_held: true,
            ..InputSample::default()
        };

        let out = c.step(&input, &Quat::identity(), DT, &mut host);

        assert_eq!(out.crouch_event, Some(CrouchEvent::Crouched));
        assert_eq!(out.capsule_height, 1.0);
        assert_eq!(host.calls[0], Call::Height(1.0));
        assert!(matches!(host.calls[1], Call::Camera(_)));
        assert!(matches!(host.calls[2], Call::Move(_)));

        // Crouched target is 2.5 m/s forward: first smoothing step reaches 2.5 * rate * dt.
        let expected = -2.5 * 10.0 * DT;
        assert!((c.state().smoothed_movement().z - expected).abs() < 1.0e-5);
    }

    #[test]
    fn blocked_stand_retries_every_frame_until_clear() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let crouch = InputSample {
            crouch_held: true,
            ..InputSample::default()
        };
        c.step(&crouch, &Quat::identity(), DT, &mut host);

        host.ceiling = true;
        let released = InputSample::default();
        for frame in 1..=20 {
            let out = c.step(&released, &Quat::identity(), DT, &mut host);
            assert_eq!(out.crouch_event, Some(CrouchEvent::StandBlocked));
            assert!(c.state().is_crouching());
            assert_eq!(host.sweeps.get(), frame);
        }

        host.ceiling = false;
        let out = c.step(&released, &Quat::identity(), DT, &mut host);
        assert_eq!(out.crouch_event, Some(CrouchEvent::StoodUp));
        assert_eq!(out.capsule_height, 2.0);
        assert_eq!(out.camera_offset, Vec3::new(0.0, 0.8, 0.0));
    }

    #[test]
    fn look_output_is_pitch_rotation_and_yaw_delta() {
        let mut c = controller();
        let mut host = RecordingHost::on_ground();
        let input = InputSample {
            look_axis: Vector2::new(3.0, -1.2),
            ..InputSample::default()
        };

        let out = c.step(&input, &Quat::identity(), DT, &mut host);

        assert!((out.yaw_delta - 3.0 * 100.0 * DT).abs() < 1.0e-5);
        assert!((c.state().pitch() - 1.2 * 100.0 * DT).abs() < 1.0e-5);
        assert_eq!(out.camera_rotation, crate::look::pitch_rotation(c.state().pitch()));
    }
}
