use crate::{
    input::{InputAction, JUMP_KEY},
    player::{FirstPersonController, PlayerInput},
};
use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use nalgebra::Vector2;

/// Fold this frame's action state into the latch.
///
/// Axes overwrite, jump presses stick until the controller takes the sample.
/// The action state only sees what is held when it is sampled, so the raw key's press edge
/// is read as well: it survives a press and release within one frame.
pub(super) fn latch_actions(
    actions: Res<ActionState<InputAction>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
) {
    input
        .0
        .set_move(move_axis(actions.clamped_axis_pair(&InputAction::Move)));

    // Screen-space mouse motion grows downward; the controller wants up positive.
    let look = actions.axis_pair(&InputAction::Look);
    input.0.set_look(Vector2::new(look.x, -look.y));

    if actions.just_pressed(&InputAction::Jump) || keys.just_pressed(JUMP_KEY) {
        input.0.press_jump();
    }
    input.0.set_crouch_held(actions.pressed(&InputAction::Crouch));
}

/// Keyboard diagonals read as (1, 1); the controller expects a length of at most one.
fn move_axis(raw: Vec2) -> Vector2<f32> {
    let v = raw.clamp_length_max(1.0);
    Vector2::new(v.x, v.y)
}

/// Drop any latched input once the controller goes away.
pub(super) fn release_on_teardown(
    mut removed: RemovedComponents<FirstPersonController>,
    mut input: ResMut<PlayerInput>,
) {
    if removed.read().next().is_some() {
        input.0.reset();
        debug!("Controller removed, input latch cleared");
    }
}
