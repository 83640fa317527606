//////////////////////////////////////////////////
// Using

use std::fmt;

use nalgebra_glm::*;
use serde::{Deserialize, Serialize};

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Rect { position: Vec2, size: Vec2, paint: Paint },
    Text { text: String, position: Vec2, size: f32, align: Align, color: Color },
}

#[derive(Debug)]
pub struct RawSurfaceContext {
    resolution: Vec2,
    commands: Vec<DrawCommand>,
}

//////////////////////////////////////////////////
// Implementation

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        let digits = hex.strip_prefix('#').unwrap_or(&hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("expected a color like #b6b6b6, got '{}'", hex));
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).map_err(|err| format!("invalid color '{}': {}", hex, err));
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), stroke: None }
    }

    pub fn with_stroke(self, color: Color) -> Self {
        Self { stroke: Some(color), ..self }
    }
}

impl RawSurfaceContext {
    //////////////////////////////////////////////////
    // Device functions

    pub fn resize(&mut self, width: u32, height: u32) {
        self.resolution = vec2(width as f32, height as f32);
        log::debug!("Surface resized to {} x {}", width, height);
    }

    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    //////////////////////////////////////////////////
    // Frame functions

    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    //////////////////////////////////////////////////
    // Draw functions

    pub fn background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color));
    }

    pub fn rect(&mut self, position: Vec2, size: Vec2, paint: Paint) {
        self.commands.push(DrawCommand::Rect { position, size, paint });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Vec2, size: f32, align: Align, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            position,
            size,
            align,
            color,
        });
    }
}

impl Default for RawSurfaceContext {
    fn default() -> Self {
        Self {
            resolution: Vec2::zeros(),
            commands: Vec::new(),
        }
    }
}

//////////////////////////////////////////////////
// Tests
