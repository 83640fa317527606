//////////////////////////////////////////////////
// Using

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

//////////////////////////////////////////////////
// Files

pub struct Files {}

impl Files {
    pub fn new() -> Self {
        Files {}
    }

    pub fn load_bytes(&self, filename: &str) -> Option<Vec<u8>> {
        let path = format!("assets/{}", filename);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::debug!("Cannot read {}: {}", path, err);
                None
            }
        }
    }

    pub fn load_string(&self, filename: &str) -> Option<String> {
        String::from_utf8(self.load_bytes(filename)?).ok()
    }
}

impl Default for Files {
    fn default() -> Self {
        Self::new()
    }
}

//////////////////////////////////////////////////
// Input

// one wheel notch, in the pixel units browsers report
const LINE_DELTA: f32 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Cursor(CursorEvent),
    Mouse(MouseEvent),
    Wheel(WheelEvent),
    Touch(TouchEvent),
    Keyboard(KeyboardEvent),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorEvent {
    pub location: Location,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEvent {
    pub state: ButtonState,
    pub button: MouseButton,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Other,
}

// positive deltas scroll towards later rows
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelEvent {
    pub delta: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchState,
    pub location: Location,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TouchState {
    Down,
    Up,
    Move,
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyboardEvent {
    pub state: ButtonState,
    pub key: Key,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Unknown,
}

//////////////////////////////////////////////////
// Shortcuts

impl InputEvent {
    pub fn cursor(x: f32, y: f32) -> Self {
        InputEvent::Cursor(CursorEvent { location: Location { x, y } })
    }

    pub fn mouse(state: ButtonState, button: MouseButton) -> Self {
        InputEvent::Mouse(MouseEvent { state, button })
    }

    pub fn wheel(delta: f32) -> Self {
        InputEvent::Wheel(WheelEvent { delta })
    }

    pub fn key(state: ButtonState, key: Key) -> Self {
        InputEvent::Keyboard(KeyboardEvent { state, key })
    }
}

//////////////////////////////////////////////////
// Winit conversions

impl From<PhysicalPosition<f64>> for Location {
    fn from(position: PhysicalPosition<f64>) -> Location {
        Location {
            x: position.x as f32,
            y: position.y as f32,
        }
    }
}

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> ButtonState {
        if state.is_pressed() {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> MouseButton {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            _ => MouseButton::Other,
        }
    }
}

impl From<MouseScrollDelta> for WheelEvent {
    fn from(delta: MouseScrollDelta) -> WheelEvent {
        // winit reports wheel-up as positive
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_DELTA,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        };
        WheelEvent { delta }
    }
}

impl From<TouchPhase> for TouchState {
    fn from(phase: TouchPhase) -> TouchState {
        match phase {
            TouchPhase::Started => TouchState::Down,
            TouchPhase::Moved => TouchState::Move,
            TouchPhase::Ended => TouchState::Up,
            TouchPhase::Cancelled => TouchState::Cancelled,
        }
    }
}

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Key {
        match key {
            PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
            _ => Key::Unknown,
        }
    }
}

//////////////////////////////////////////////////
// Tests
