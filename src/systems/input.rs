//! Input polling.
//!
//! [`update_input_state`] reads hardware input from raylib once per frame and
//! writes it into [`InputState`]. Gamepads are re-enumerated every frame so
//! controllers plugged in mid-game show up without a restart.
use raylib::ffi;
use raylib::prelude::*;

use crate::resources::camera2d::Camera;
use crate::resources::input::{
    GAMEPAD_BUTTONS, GamepadState, InputState, MAX_CONTROLLERS, MAX_KEY_CODE,
};

/// Poll raylib for keyboard, mouse and gamepad input.
pub fn update_input_state(rl: &RaylibHandle, input: &mut InputState, camera: &Camera, scale: f32) {
    // raylib bounds-checks the code; unknown codes read as up
    poll_keys(input, |code| unsafe { ffi::IsKeyDown(code) });

    input.cursor = cursor_to_world(rl.get_mouse_position(), scale, camera);

    input.gamepads.clear();
    for index in 0..MAX_CONTROLLERS as i32 {
        if rl.is_gamepad_available(index) {
            input.gamepads.push(read_gamepad(rl, index));
        }
    }
}

/// Refresh every key code from `is_down`.
pub fn poll_keys(input: &mut InputState, is_down: impl Fn(i32) -> bool) {
    for code in 1..=MAX_KEY_CODE {
        input.set_key_code(code, is_down(code));
    }
}

/// Window mouse position to world coordinates.
pub fn cursor_to_world(mouse: Vector2, scale: f32, camera: &Camera) -> Vector2 {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    camera.screen_to_world(Vector2::new(mouse.x / scale, mouse.y / scale))
}

fn read_gamepad(rl: &RaylibHandle, index: i32) -> GamepadState {
    let mut pad = GamepadState::new(index);
    pad.axis = [
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_LEFT_X),
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_LEFT_Y),
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_RIGHT_X),
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_RIGHT_Y),
    ];
    pad.triggers = [
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_LEFT_TRIGGER),
        rl.get_gamepad_axis_movement(index, GamepadAxis::GAMEPAD_AXIS_RIGHT_TRIGGER),
    ];
    for (i, button) in GAMEPAD_BUTTONS.iter().enumerate() {
        pad.buttons[i] = rl.is_gamepad_button_down(index, *button);
    }
    pad
}
