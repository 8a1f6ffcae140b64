//! Per-frame keyboard, mouse and gamepad state.
//!
//! [`InputState`] is filled by [`crate::systems::input::update_input_state`]
//! once per frame and handed read-only to entity hooks. Key edges
//! (`key_pressed`/`key_released`) compare against the state captured at the
//! end of the previous step.
use arrayvec::ArrayVec;
use raylib::prelude::*;
use rustc_hash::FxHashSet;

/// Maximum number of gamepads the engine tracks.
pub const MAX_CONTROLLERS: usize = 8;

/// Highest raylib key code (`KEY_KB_MENU`); every code up to it is polled.
pub const MAX_KEY_CODE: i32 = 348;

/// Buttons reported in [`GamepadState::buttons`], in this order.
pub const GAMEPAD_BUTTONS: [GamepadButton; 17] = [
    GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_UP,
    GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_RIGHT,
    GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_DOWN,
    GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_LEFT,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_UP,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_RIGHT,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_DOWN,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_LEFT,
    GamepadButton::GAMEPAD_BUTTON_LEFT_TRIGGER_1,
    GamepadButton::GAMEPAD_BUTTON_LEFT_TRIGGER_2,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_TRIGGER_1,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_TRIGGER_2,
    GamepadButton::GAMEPAD_BUTTON_MIDDLE_LEFT,
    GamepadButton::GAMEPAD_BUTTON_MIDDLE,
    GamepadButton::GAMEPAD_BUTTON_MIDDLE_RIGHT,
    GamepadButton::GAMEPAD_BUTTON_LEFT_THUMB,
    GamepadButton::GAMEPAD_BUTTON_RIGHT_THUMB,
];

/// Snapshot of one gamepad.
///
/// Stick axes are ordered left X, left Y, right X, right Y and range over
/// `-1.0..=1.0`. Triggers are left then right, `-1.0` released to `1.0` fully
/// pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadState {
    /// Raylib gamepad index.
    pub index: i32,
    pub axis: [f32; 4],
    pub triggers: [f32; 2],
    pub buttons: [bool; GAMEPAD_BUTTONS.len()],
}

impl GamepadState {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            axis: [0.0; 4],
            triggers: [-1.0; 2],
            buttons: [false; GAMEPAD_BUTTONS.len()],
        }
    }

    pub fn button(&self, button: GamepadButton) -> bool {
        GAMEPAD_BUTTONS
            .iter()
            .position(|b| *b as i32 == button as i32)
            .map(|i| self.buttons[i])
            .unwrap_or(false)
    }

    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        match axis {
            GamepadAxis::GAMEPAD_AXIS_LEFT_X => self.axis[0],
            GamepadAxis::GAMEPAD_AXIS_LEFT_Y => self.axis[1],
            GamepadAxis::GAMEPAD_AXIS_RIGHT_X => self.axis[2],
            GamepadAxis::GAMEPAD_AXIS_RIGHT_Y => self.axis[3],
            GamepadAxis::GAMEPAD_AXIS_LEFT_TRIGGER => self.triggers[0],
            GamepadAxis::GAMEPAD_AXIS_RIGHT_TRIGGER => self.triggers[1],
        }
    }
}

/// Input snapshot shared with entity hooks.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: FxHashSet<i32>,
    previous_keys: FxHashSet<i32>,
    /// Mouse position in world coordinates.
    pub cursor: Vector2,
    /// Connected gamepads, in slot order.
    pub gamepads: ArrayVec<GamepadState, MAX_CONTROLLERS>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: FxHashSet::default(),
            previous_keys: FxHashSet::default(),
            cursor: Vector2::zero(),
            gamepads: ArrayVec::new(),
        }
    }
}

impl InputState {
    pub fn set_key(&mut self, key: KeyboardKey, down: bool) {
        self.set_key_code(key as i32, down);
    }

    /// Same as [`InputState::set_key`] for a raw raylib key code.
    pub fn set_key_code(&mut self, code: i32, down: bool) {
        if down {
            self.keys.insert(code);
        } else {
            self.keys.remove(&code);
        }
    }

    pub fn key_down(&self, key: KeyboardKey) -> bool {
        self.keys.contains(&(key as i32))
    }

    /// Down this step, up the step before.
    pub fn key_pressed(&self, key: KeyboardKey) -> bool {
        let k = key as i32;
        self.keys.contains(&k) && !self.previous_keys.contains(&k)
    }

    /// Up this step, down the step before.
    pub fn key_released(&self, key: KeyboardKey) -> bool {
        let k = key as i32;
        !self.keys.contains(&k) && self.previous_keys.contains(&k)
    }

    /// Remember the current keys as the previous step's keys.
    pub fn end_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys);
    }

    /// Gamepad in slot `slot`, if connected.
    pub fn gamepad(&self, slot: usize) -> Option<&GamepadState> {
        self.gamepads.get(slot)
    }

    pub fn gamepad_button(&self, slot: usize, button: GamepadButton) -> bool {
        self.gamepad(slot).is_some_and(|g| g.button(button))
    }

    pub fn gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.gamepad(slot).map(|g| g.axis(axis)).unwrap_or(0.0)
    }
}
