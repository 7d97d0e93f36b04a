//! Cursor grab tied to the controller's lifetime.
//!
//! The cursor is locked and hidden when a controller appears and released when it is removed.
//! Both are plain systems registered once, so there is nothing to unsubscribe.

use crate::player::FirstPersonController;
use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, (lock_on_activate, release_on_teardown));
}

fn set_grab(cursor: &mut CursorOptions, locked: bool) {
    if locked {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

fn lock_on_activate(
    added: Query<(), Added<FirstPersonController>>,
    cursor: Option<Single<&mut CursorOptions, With<PrimaryWindow>>>,
) {
    if added.is_empty() {
        return;
    }
    let Some(mut cursor) = cursor else {
        return;
    };
    set_grab(&mut cursor, true);
    info!("Cursor locked");
}

fn release_on_teardown(
    mut removed: RemovedComponents<FirstPersonController>,
    cursor: Option<Single<&mut CursorOptions, With<PrimaryWindow>>>,
) {
    if removed.read().next().is_none() {
        return;
    }
    let Some(mut cursor) = cursor else {
        return;
    };
    set_grab(&mut cursor, false);
    info!("Cursor released");
}
