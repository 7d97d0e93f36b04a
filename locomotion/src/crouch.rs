/*!
Crouch posture state machine.

States: `Standing` (initial) and `Crouching`, cyclic, no timers.

- Crouch held while `Standing` -> `Crouching`: capsule height halves and the camera
  drops by `crouch_camera_offset`.
- Crouch released while `Crouching` -> `Standing`, guarded by an upward sphere sweep
  (collider radius, starting at half the crouched height above the entity origin, long
  enough to cover the height being restored). A hit refuses the transition and the body
  stays crouched; the guard is re-checked every frame for as long as crouch stays released.

Evaluating the held level against the current posture each frame gives exactly the
press/release edges plus the sticky retry.
*/

use log::{debug, trace};

use crate::{
    config::LocomotionConfig,
    constants::CROUCH_HEIGHT_FRACTION,
    probe::{ClearanceProbe, PostureSink, SweepQuery},
    types::{CapsuleSpec, Vec3},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
}

/// What happened to the posture this frame, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrouchEvent {
    Crouched,
    StoodUp,
    /// Crouch is released but the clearance sweep hit something.
    StandBlocked,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrouchState {
    posture: Posture,
    standing_capsule: CapsuleSpec,
    standing_camera_offset: Vec3,
}

impl CrouchState {
    /// Capture the resting dimensions. They are never changed afterwards.
    pub fn new(standing_capsule: CapsuleSpec, standing_camera_offset: Vec3) -> Self {
        Self {
            posture: Posture::Standing,
            standing_capsule,
            standing_camera_offset,
        }
    }

    #[inline]
    pub fn posture(&self) -> Posture {
        self.posture
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.posture == Posture::Crouching
    }

    #[inline]
    pub fn standing_height(&self) -> f32 {
        self.standing_capsule.height
    }

    #[inline]
    pub fn standing_camera_offset(&self) -> Vec3 {
        self.standing_camera_offset
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.standing_capsule.radius
    }

    /// Capsule height implied by the current posture.
    pub fn current_height(&self) -> f32 {
        match self.posture {
            Posture::Standing => self.standing_capsule.height,
            Posture::Crouching => self.standing_capsule.height * CROUCH_HEIGHT_FRACTION,
        }
    }

    /// Camera local position implied by the current posture.
    pub fn current_camera_offset(&self, cfg: &LocomotionConfig) -> Vec3 {
        match self.posture {
            Posture::Standing => self.standing_camera_offset,
            Posture::Crouching => {
                self.standing_camera_offset - Vec3::new(0.0, cfg.crouch_camera_offset, 0.0)
            }
        }
    }

    /// Sweep that must come back clear before standing up from the current height.
    pub fn clearance_query(&self) -> SweepQuery {
        let current = self.current_height();
        SweepQuery::upward(
            Vec3::new(0.0, current * 0.5, 0.0),
            self.radius(),
            self.standing_height() - current,
        )
    }

    /// Evaluate one frame of crouch input. Posture changes are pushed to `host` immediately.
    pub fn update<H>(
        &mut self,
        cfg: &LocomotionConfig,
        crouch_held: bool,
        host: &mut H,
    ) -> Option<CrouchEvent>
    where
        H: ClearanceProbe + PostureSink,
    {
        if !cfg.crouch_enabled {
            return None;
        }

        match (self.posture, crouch_held) {
            (Posture::Standing, true) => {
                self.posture = Posture::Crouching;
                self.apply(cfg, host);
                debug!("crouched: height {:.3}", self.current_height());
                Some(CrouchEvent::Crouched)
            }
            (Posture::Crouching, false) => {
                let query = self.clearance_query();
                if host.sweep_hits(&query) {
                    trace!("stand blocked: sweep {:.3}m overhead", query.distance);
                    return Some(CrouchEvent::StandBlocked);
                }
                self.posture = Posture::Standing;
                self.apply(cfg, host);
                debug!("stood up: height {:.3}", self.current_height());
                Some(CrouchEvent::StoodUp)
            }
            _ => None,
        }
    }

    fn apply<H: PostureSink>(&self, cfg: &LocomotionConfig, host: &mut H) {
        host.set_capsule_height(self.current_height());
        host.set_camera_offset(self.current_camera_offset(cfg));
    }
}
