use nalgebra::Vector2;

/// Per-frame input values consumed by the controller.
///
/// - `move_axis`: planar intent, each component in [-1, 1]. `x` is strafe (right positive),
///   `y` is forward/back (forward positive).
/// - `look_axis`: unbounded look delta (typically mouse motion). `x` right positive,
///   `y` up positive.
/// - `jump_pressed`: a jump press happened since the previous sample.
/// - `crouch_held`: crouch is currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub move_axis: Vector2<f32>,
    pub look_axis: Vector2<f32>,
    pub jump_pressed: bool,
    pub crouch_held: bool,
}

impl InputSample {
    #[inline]
    pub fn has_move_input(&self) -> bool {
        self.move_axis.norm() > 0.0
    }
}

/// Coalesces input events arriving between frames into one `InputSample`.
///
/// Axes and the crouch button are last-write-wins. A jump press is latched until the
/// next [`InputLatch::take_sample`], so a press and release inside one frame is never lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    move_axis: Vector2<f32>,
    look_axis: Vector2<f32>,
    jump_pressed: bool,
    crouch_held: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_move(&mut self, axis: Vector2<f32>) {
        self.move_axis = axis;
    }

    pub fn set_look(&mut self, axis: Vector2<f32>) {
        self.look_axis = axis;
    }

    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }

    pub fn set_crouch_held(&mut self, held: bool) {
        self.crouch_held = held;
    }

    /// Read the coalesced input and consume the latched jump edge.
    pub fn take_sample(&mut self) -> InputSample {
        let sample = InputSample {
            move_axis: self.move_axis,
            look_axis: self.look_axis,
            jump_pressed: self.jump_pressed,
            crouch_held: self.crouch_held,
        };
        self.jump_pressed = false;
        sample
    }

    /// Drop everything, e.g. when the input subscription is released.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
