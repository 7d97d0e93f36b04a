use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    Jump,
    Crouch,
}

/// Physical key bound to [`InputAction::Jump`]. Also read directly for its press edge.
pub const JUMP_KEY: KeyCode = KeyCode::Space;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert_dual_axis(InputAction::Move, VirtualDPad::wasd());
    input_map.insert_dual_axis(InputAction::Look, MouseMove::default());
    input_map.insert(InputAction::Jump, JUMP_KEY);
    input_map.insert(InputAction::Crouch, KeyCode::ControlLeft);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
