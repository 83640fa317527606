//////////////////////////////////////////////////
// Using

use nalgebra_glm::*;

use crate::io::{ButtonState, CursorEvent, InputEvent, Key, KeyboardEvent, MouseButton, MouseEvent, TouchEvent, TouchState, WheelEvent};

//////////////////////////////////////////////////
// Definition

/// Per-frame input snapshot. Click flags are edges: they are set only on the
/// frame the press arrives and cleared by the next `update`.
#[derive(Debug)]
pub struct RawInputContext {
    cursor_location: Vec2,
    held_buttons: Vec<MouseButton>,
    clicked_buttons: Vec<MouseButton>,
    held_keys: Vec<Key>,
    clicked_keys: Vec<Key>,
    wheel: f32,
}

//////////////////////////////////////////////////
// Implementation

impl RawInputContext {
    pub fn update(&mut self, input_events: &[InputEvent]) {
        // reset inputs
        self.clicked_buttons.clear();
        self.clicked_keys.clear();
        self.wheel = 0.0;

        // process inputs
        input_events.iter().for_each(|input_event| match *input_event {
            InputEvent::Cursor(CursorEvent { location }) => {
                self.cursor_location = vec2(location.x, location.y);
            }
            InputEvent::Mouse(MouseEvent { state, button }) => match state {
                ButtonState::Pressed => self.press(button),
                ButtonState::Released => self.release(button),
            },
            InputEvent::Wheel(WheelEvent { delta }) => {
                if delta.is_finite() {
                    self.wheel += delta;
                }
            }
            InputEvent::Touch(TouchEvent { phase, location }) => {
                self.cursor_location = vec2(location.x, location.y);
                match phase {
                    TouchState::Down => self.press(MouseButton::Left),
                    TouchState::Up | TouchState::Cancelled => self.release(MouseButton::Left),
                    TouchState::Move => {}
                }
            }
            InputEvent::Keyboard(KeyboardEvent { state, key }) => match state {
                ButtonState::Pressed => {
                    // held keys repeat, only the first press is a click
                    if !self.held_keys.contains(&key) {
                        self.held_keys.push(key);
                        self.clicked_keys.push(key);
                    }
                }
                ButtonState::Released => self.held_keys.retain(|held| *held != key),
            },
        });
    }

    //////////////////////////////////////////////////
    // Check Input functions

    pub fn cursor(&self) -> Vec2 {
        self.cursor_location
    }

    pub fn clicked(&self, button: MouseButton) -> bool {
        self.clicked_buttons.contains(&button)
    }

    pub fn key_clicked(&self, key: Key) -> bool {
        self.clicked_keys.contains(&key)
    }

    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    //////////////////////////////////////////////////
    // Internal stuff

    fn press(&mut self, button: MouseButton) {
        if !self.held_buttons.contains(&button) {
            self.held_buttons.push(button);
            self.clicked_buttons.push(button);
        }
    }

    fn release(&mut self, button: MouseButton) {
        self.held_buttons.retain(|held| *held != button);
    }
}

impl Default for RawInputContext {
    fn default() -> Self {
        Self {
            cursor_location: Vec2::zeros(),
            held_buttons: Vec::new(),
            clicked_buttons: Vec::new(),
            held_keys: Vec::new(),
            clicked_keys: Vec::new(),
            wheel: 0.0,
        }
    }
}

//////////////////////////////////////////////////
// Tests
