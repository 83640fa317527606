//////////////////////////////////////////////////
// Using

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::context::surface::Color;
use crate::error::Result;
use crate::io::Files;

//////////////////////////////////////////////////
// Const

pub const CONFIG_FILE: &str = "lobby.toml";

//////////////////////////////////////////////////
// Definitions

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    pub log_level: LevelFilter,
    pub rejection: RejectionPolicy,
    pub layout: LayoutConfig,
    pub scroll: ScrollConfig,
    pub theme: Theme,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionPolicy {
    #[default]
    Ignore,
    ReturnToMenu,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margin: Margins,
    pub row_height: f32,
    /// Gap above the first row, in row heights.
    pub row_offset: f32,
    /// Distance between two row origins, in row heights.
    pub row_pitch: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub sensitivity: f32,
    pub damping: f32,
    pub min_extent: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub option: Color,
    pub option_hovered: Color,
    pub option_stroke: Color,
    pub foreground: Color,
    pub loading_text_size: f32,
    // relative to the row height
    pub option_text_scale: f32,
    pub option_text_inset: f32,
}

//////////////////////////////////////////////////
// Implementation

impl LobbyConfig {
    pub fn load(files: &Files) -> Result<Self> {
        match files.load_string(CONFIG_FILE) {
            Some(source) => Self::from_toml(&source),
            None => {
                log::info!("No {} found, using default lobby config", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            rejection: RejectionPolicy::default(),
            layout: LayoutConfig::default(),
            scroll: ScrollConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 50.0,
            top: 50.0,
            right: 50.0,
            bottom: 50.0,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: Margins::default(),
            row_height: 80.0,
            row_offset: 0.2,
            row_pitch: 1.2,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.03,
            damping: 0.9,
            min_extent: 0.2,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xb6, 0xb6, 0xb6),
            option: Color::rgb(0x96, 0x96, 0x96),
            option_hovered: Color::rgb(0x85, 0x85, 0x85),
            option_stroke: Color::rgb(0x44, 0x43, 0x43),
            foreground: Color::rgb(0x3d, 0x3d, 0x3d),
            loading_text_size: 40.0,
            option_text_scale: 0.3,
            option_text_inset: 50.0,
        }
    }
}

//////////////////////////////////////////////////
// Tests
