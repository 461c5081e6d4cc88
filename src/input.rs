//! Input mapping
//!
//! Raw key states are collected by the window layer; this module turns them
//! into the fixed set of logical controls the simulation understands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
pub use winit::keyboard::KeyCode;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Shoot,
    /// Mapped, no gameplay effect yet
    Bomb,
    /// Slow, precise movement
    Focus,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Up,
        Control::Down,
        Control::Left,
        Control::Right,
        Control::Shoot,
        Control::Bomb,
        Control::Focus,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed state of every logical control for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    held: [bool; Control::ALL.len()],
}

impl ControlState {
    /// State with exactly the given controls held
    pub fn with(controls: &[Control]) -> Self {
        let mut state = Self::default();
        for &control in controls {
            state.set(control, true);
        }
        state
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        self.held[control.index()] = pressed;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }
}

/// One physical key bound to one logical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub control: Control,
}

/// Key-to-control mapping. Several keys may drive the same control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub bindings: Vec<KeyBinding>,
}

impl Default for ControlScheme {
    fn default() -> Self {
        Self::from_pairs(&[
            (KeyCode::ArrowUp, Control::Up),
            (KeyCode::ArrowDown, Control::Down),
            (KeyCode::ArrowLeft, Control::Left),
            (KeyCode::ArrowRight, Control::Right),
            (KeyCode::KeyZ, Control::Shoot),
            (KeyCode::KeyX, Control::Bomb),
            (KeyCode::ShiftLeft, Control::Focus),
        ])
    }
}

impl ControlScheme {
    pub fn from_pairs(pairs: &[(KeyCode, Control)]) -> Self {
        Self {
            bindings: pairs
                .iter()
                .map(|&(key, control)| KeyBinding { key, control })
                .collect(),
        }
    }

    /// Resolve held physical keys into logical control states.
    /// Keys without a binding are ignored.
    pub fn resolve(&self, held: &HashSet<KeyCode>) -> ControlState {
        let mut state = ControlState::default();
        for binding in &self.bindings {
            if held.contains(&binding.key) {
                state.set(binding.control, true);
            }
        }
        state
    }

    /// Keys bound to a control, in binding order
    pub fn keys_for(&self, control: Control) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.control == control)
            .map(|b| b.key)
    }
}

/// Keys currently held down, fed by window keyboard events
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Forget everything (window lost focus, releases will not arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn held(&self) -> &HashSet<KeyCode> {
        &self.held
    }
}
