//////////////////////////////////////////////////
// Using

use nalgebra_glm::*;

use crate::config::{LayoutConfig, Theme};
use crate::context::input::RawInputContext;
use crate::context::surface::{Align, Paint, RawSurfaceContext};
use crate::io::MouseButton;
use crate::protocol::SessionId;

//////////////////////////////////////////////////
// Const

const PLUS_LENGTH: f32 = 40.0;
const PLUS_WIDTH: f32 = 10.0;
const LABEL_BASELINE: f32 = 0.65;

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OptionLayout {
    origin: Vec2,
    size: Vec2,
    row_offset: f32,
    row_pitch: f32,
    visible_rows: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Host,
    Game { session: SessionId, player_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    Host,
    Join(SessionId),
}

#[derive(Debug, Clone)]
pub struct MenuOption {
    kind: OptionKind,
    position: Vec2,
    size: Vec2,
    hovered: bool,
}

//////////////////////////////////////////////////
// Implementation

impl OptionLayout {
    pub fn new(config: &LayoutConfig, resolution: Vec2) -> Self {
        let margin = &config.margin;
        let pitch = config.row_pitch * config.row_height;
        Self {
            origin: vec2(margin.left, margin.top),
            size: vec2(resolution.x - margin.left - margin.right, config.row_height),
            row_offset: config.row_offset,
            row_pitch: config.row_pitch,
            visible_rows: (resolution.y - margin.top - margin.bottom) / pitch,
        }
    }

    /// `index` may be fractional while the list is scrolled.
    pub fn position(&self, index: f32) -> Vec2 {
        vec2(self.origin.x, self.origin.y + (self.row_offset + index * self.row_pitch) * self.size.y)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn visible_rows(&self) -> f32 {
        self.visible_rows
    }
}

impl MenuOption {
    pub fn host() -> Self {
        Self::new(OptionKind::Host)
    }

    pub fn game(session: SessionId, player_count: u32) -> Self {
        Self::new(OptionKind::Game { session, player_count })
    }

    fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            position: Vec2::zeros(),
            size: Vec2::zeros(),
            hovered: false,
        }
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.position.x && point.x < self.position.x + self.size.x && point.y >= self.position.y && point.y < self.position.y + self.size.y
    }

    pub fn draw(&mut self, index: f32, layout: &OptionLayout, input: &RawInputContext, surface: &mut RawSurfaceContext, theme: &Theme) -> Option<OptionAction> {
        // update geometry
        self.position = layout.position(index);
        self.size = layout.size();

        // update hovered before the click test
        self.hovered = self.contains(input.cursor());
        let action = (self.hovered && input.clicked(MouseButton::Left)).then(|| self.click());

        // show option
        let paint = if self.hovered {
            Paint::fill(theme.option_hovered).with_stroke(theme.option_stroke)
        } else {
            Paint::fill(theme.option)
        };
        surface.rect(self.position, self.size, paint);
        match &self.kind {
            OptionKind::Host => self.draw_plus(surface, theme),
            OptionKind::Game { session, player_count } => self.draw_summary(session, *player_count, surface, theme),
        }

        action
    }

    fn click(&self) -> OptionAction {
        match &self.kind {
            OptionKind::Host => OptionAction::Host,
            OptionKind::Game { session, .. } => OptionAction::Join(session.clone()),
        }
    }

    fn draw_plus(&self, surface: &mut RawSurfaceContext, theme: &Theme) {
        let center = self.position + self.size * 0.5;
        let paint = Paint::fill(theme.foreground);
        surface.rect(center - vec2(PLUS_WIDTH, PLUS_LENGTH) * 0.5, vec2(PLUS_WIDTH, PLUS_LENGTH), paint);
        surface.rect(center - vec2(PLUS_LENGTH, PLUS_WIDTH) * 0.5, vec2(PLUS_LENGTH, PLUS_WIDTH), paint);
    }

    fn draw_summary(&self, session: &SessionId, player_count: u32, surface: &mut RawSurfaceContext, theme: &Theme) {
        let text_size = self.size.y * theme.option_text_scale;
        let baseline = self.position.y + self.size.y * LABEL_BASELINE;
        surface.text(
            format!("Server ID: {}", session),
            vec2(self.position.x + theme.option_text_inset, baseline),
            text_size,
            Align::Left,
            theme.foreground,
        );
        surface.text(
            format!("{} Players", player_count),
            vec2(self.position.x + self.size.x - theme.option_text_inset, baseline),
            text_size,
            Align::Right,
            theme.foreground,
        );
    }
}

//////////////////////////////////////////////////
// Tests
