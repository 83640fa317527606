//////////////////////////////////////////////////
// Using

use nalgebra_glm::*;

use crate::config::ScrollConfig;
use crate::context::surface::Paint;
use crate::context::{ApplicationContext, ContextExt};
use crate::events::Events;
use crate::game_state::{GameState, Handshake, StateKind, Transition};
use crate::options::{MenuOption, OptionAction, OptionLayout};
use crate::protocol::{HostResponse, SessionId, SessionSummary, LIST_SESSIONS, REQUEST_HOST};
use crate::subscriptions::Subscriptions;

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Clone, PartialEq)]
pub enum MenuMessage {
    SessionList(Vec<SessionSummary>),
    HostAccepted(Option<SessionId>),
    HostRejected,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ScrollModel {
    position: f32,
    velocity: f32,
}

pub struct MenuState {
    ctx: ApplicationContext,
    options: Vec<MenuOption>,
    scroll: ScrollModel,
    subscriptions: Subscriptions<MenuMessage>,
}

//////////////////////////////////////////////////
// Implementation

impl ScrollModel {
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn max_position(option_count: usize, visible_rows: f32, config: &ScrollConfig) -> f32 {
        (option_count as f32 - visible_rows).max(config.min_extent)
    }

    pub fn update(&mut self, wheel: f32, option_count: usize, visible_rows: f32, config: &ScrollConfig) {
        self.velocity += wheel * config.sensitivity;
        self.position += self.velocity;
        self.velocity *= config.damping;
        self.position = self.position.clamp(0.0, Self::max_position(option_count, visible_rows, config));
    }
}

impl MenuState {
    pub fn new(ctx: ApplicationContext) -> Self {
        let subscriptions = Subscriptions::new(ctx.channel().clone());
        Self {
            ctx,
            options: Vec::new(),
            scroll: ScrollModel::default(),
            subscriptions,
        }
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn scroll(&self) -> &ScrollModel {
        &self.scroll
    }

    pub fn join_game(&self, session: SessionId, handshake: Handshake, state_events: &mut Events<Transition>) {
        log::info!("Joining session {} ({:?})", session, handshake);
        state_events.write(Transition::PushLoading { session, handshake });
    }

    fn handle_message(&mut self, message: MenuMessage, state_events: &mut Events<Transition>) {
        match message {
            MenuMessage::SessionList(sessions) => {
                log::debug!("Received {} open session(s)", sessions.len());
                self.options = std::iter::once(MenuOption::host())
                    .chain(sessions.into_iter().map(|summary| MenuOption::game(summary.id, summary.player_count)))
                    .collect();
            }
            // hosting creates and joins in one step, so there is no join request to send
            MenuMessage::HostAccepted(Some(session)) => self.join_game(session, Handshake::Hosted, state_events),
            MenuMessage::HostAccepted(None) => log::warn!("Host request accepted without a session id"),
            MenuMessage::HostRejected => log::warn!("Host request rejected"),
        }
    }

    fn handle_action(&self, action: OptionAction, state_events: &mut Events<Transition>) {
        match action {
            OptionAction::Host => {
                log::info!("Requesting a new session");
                self.ctx.channel().write(|channel| channel.emit(REQUEST_HOST, ()));
            }
            OptionAction::Join(session) => self.join_game(session, Handshake::Join, state_events),
        }
    }
}

impl GameState for MenuState {
    fn kind(&self) -> StateKind {
        StateKind::Menu
    }

    fn init(&mut self) {
        self.subscriptions.subscribe(REQUEST_HOST, |response: HostResponse| {
            Some(if response.accepted {
                MenuMessage::HostAccepted(response.id)
            } else {
                MenuMessage::HostRejected
            })
        });
        self.subscriptions.subscribe(LIST_SESSIONS, |sessions: Vec<SessionSummary>| Some(MenuMessage::SessionList(sessions)));

        self.options = vec![MenuOption::host()];
        self.ctx.channel().write(|channel| channel.emit(LIST_SESSIONS, ()));
    }

    fn cleanup(&mut self) -> usize {
        self.subscriptions.release()
    }

    fn update(&mut self, _elapsed_time: f32, state_events: &mut Events<Transition>) {
        for message in self.subscriptions.drain() {
            self.handle_message(message, state_events);
        }
    }

    fn draw(&mut self, state_events: &mut Events<Transition>) {
        let config = self.ctx.config();
        let theme = &config.theme;
        let margin = &config.layout.margin;
        let resolution = self.ctx.surface().read(|surface| surface.resolution());
        let layout = OptionLayout::new(&config.layout, resolution);

        // update mouse wheel
        let wheel = self.ctx.input().read(|input| input.wheel());
        self.scroll.update(wheel, self.options.len(), layout.visible_rows(), &config.scroll);

        // draw options and covers
        let scroll = self.scroll.position();
        let options = &mut self.options;
        let actions = self.ctx.input().read(|input| {
            self.ctx.surface().write(|surface| {
                let actions: Vec<OptionAction> = options
                    .iter_mut()
                    .enumerate()
                    .filter_map(|(index, option)| option.draw(index as f32 - scroll, &layout, input, surface, theme))
                    .collect();
                let width = resolution.x - margin.left - margin.right;
                let cover = Paint::fill(theme.background);
                surface.rect(vec2(margin.left, 0.0), vec2(width, margin.top), cover);
                surface.rect(vec2(margin.left, resolution.y - margin.bottom), vec2(width, margin.bottom), cover);
                actions
            })
        });

        for action in actions {
            self.handle_action(action, state_events);
        }
    }
}

//////////////////////////////////////////////////
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::LobbyConfig;
    use crate::context::surface::DrawCommand;
    use crate::context::RawApplicationContext;
    use crate::io::{ButtonState, InputEvent, MouseButton};
    use crate::options::OptionKind;

    fn menu() -> (MenuState, ApplicationContext, Events<Transition>) {
        let ctx = Arc::new(RawApplicationContext::new(LobbyConfig::default()).with_resolution(800, 600));
        let mut menu = MenuState::new(ctx.clone());
        menu.init();
        (menu, ctx, Events::new())
    }

    fn kinds(menu: &MenuState) -> Vec<OptionKind> {
        menu.options().iter().map(|option| option.kind().clone()).collect()
    }

    #[test]
    fn init_shows_host_option_and_requests_sessions() {
        let (menu, ctx, _) = menu();
        assert_eq!(kinds(&menu), vec![OptionKind::Host]);

        let sent = ctx.channel().write(|channel| channel.drain_outgoing());
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event, LIST_SESSIONS);
        assert_eq!(ctx.channel().read(|channel| channel.total_listeners()), 2);
    }

    #[test]
    fn session_list_replaces_options_in_server_order() {
        let (mut menu, ctx, mut events) = menu();
        ctx.channel().read(|channel| channel.dispatch(LIST_SESSIONS, &json!([{ "id": "A", "playerCount": 2 }])));
        menu.update(0.0, &mut events);
        ctx.channel().read(|channel| channel.dispatch(LIST_SESSIONS, &json!([{ "id": "X", "playerCount": 1 }, { "id": "Y", "playerCount": 3 }])));
        menu.update(0.0, &mut events);

        assert_eq!(
            kinds(&menu),
            vec![
                OptionKind::Host,
                OptionKind::Game {
                    session: SessionId::new("X"),
                    player_count: 1
                },
                OptionKind::Game {
                    session: SessionId::new("Y"),
                    player_count: 3
                },
            ]
        );
    }

    #[test]
    fn scroll_stays_within_bounds() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollModel::default();
        for (step, wheel) in [300.0, 300.0, 0.0, -1000.0, 5000.0, 5000.0, 0.0, -20.0, 0.0, 1e6].into_iter().enumerate() {
            let count = 1 + step % 12;
            scroll.update(wheel, count, 5.2, &config);
            let max = (count as f32 - 5.2).max(0.2);
            assert!(scroll.position() >= 0.0 && scroll.position() <= max, "step {}: {} not in [0, {}]", step, scroll.position(), max);
        }
    }

    #[test]
    fn scroll_is_damped() {
        let config = ScrollConfig::default();
        let mut scroll = ScrollModel::default();
        scroll.update(10.0, 50, 5.0, &config);
        let first = scroll.position();
        scroll.update(0.0, 50, 5.0, &config);
        let second = scroll.position() - first;

        assert!((first - 0.3).abs() < 1e-5);
        assert!((second - 0.27).abs() < 1e-5);
    }

    #[test]
    fn draw_covers_margins_after_options() {
        let (mut menu, ctx, mut events) = menu();
        menu.draw(&mut events);

        let commands = ctx.surface().read(|surface| surface.commands().to_vec());
        let theme = LobbyConfig::default().theme;
        assert_eq!(
            commands[commands.len() - 2..].to_vec(),
            vec![
                DrawCommand::Rect {
                    position: vec2(50.0, 0.0),
                    size: vec2(700.0, 50.0),
                    paint: Paint::fill(theme.background)
                },
                DrawCommand::Rect {
                    position: vec2(50.0, 550.0),
                    size: vec2(700.0, 50.0),
                    paint: Paint::fill(theme.background)
                },
            ]
        );
    }

    #[test]
    fn clicking_host_option_sends_host_request() {
        let (mut menu, ctx, mut events) = menu();
        ctx.channel().write(|channel| channel.drain_outgoing());
        ctx.input().write(|input| input.update(&[InputEvent::cursor(400.0, 100.0), InputEvent::mouse(ButtonState::Pressed, MouseButton::Left)]));
        menu.draw(&mut events);

        let sent = ctx.channel().write(|channel| channel.drain_outgoing());
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event, REQUEST_HOST);
        assert_eq!(sent[0].payload, serde_json::Value::Null);
    }

    #[test]
    fn accepted_host_pushes_hosted_loading() {
        let (mut menu, ctx, mut events) = menu();
        let mut reader = events.register();
        ctx.channel().read(|channel| channel.dispatch(REQUEST_HOST, &json!({ "accepted": true, "id": "Z" })));
        ctx.channel().read(|channel| channel.dispatch(REQUEST_HOST, &json!({ "accepted": false })));
        menu.update(0.0, &mut events);

        assert_eq!(
            events.drain(&mut reader),
            vec![Transition::PushLoading {
                session: SessionId::new("Z"),
                handshake: Handshake::Hosted
            }]
        );
    }

    #[test]
    fn cleanup_releases_both_listeners() {
        let (mut menu, ctx, _) = menu();
        assert_eq!(menu.cleanup(), 2);
        assert_eq!(menu.cleanup(), 0);
        assert_eq!(ctx.channel().read(|channel| channel.total_listeners()), 0);
    }
}
