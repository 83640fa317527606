//////////////////////////////////////////////////
// Using

use crate::context::{ApplicationContext, ContextExt};
use crate::events::Events;
use crate::game_state::{GameState, StateKind, Transition};
use crate::io::Key;
use crate::protocol::{LeaveRequest, SessionId, REQUEST_LEAVE};

//////////////////////////////////////////////////
// Definition

pub struct InMatchState {
    ctx: ApplicationContext,
    session: SessionId,
    left: bool,
}

//////////////////////////////////////////////////
// Implementation

impl InMatchState {
    pub fn new(ctx: ApplicationContext, session: SessionId) -> Self {
        Self { ctx, session, left: false }
    }

    pub fn leave(&mut self, state_events: &mut Events<Transition>) {
        if self.left {
            return;
        }
        log::info!("Leaving session {}", self.session);
        self.left = true;
        let request = LeaveRequest { id: self.session.clone() };
        self.ctx.channel().write(|channel| channel.emit(REQUEST_LEAVE, request));
        state_events.write(Transition::Pop);
    }
}

impl GameState for InMatchState {
    fn kind(&self) -> StateKind {
        StateKind::InMatch(self.session.clone())
    }

    fn init(&mut self) {
        log::info!("Entered session {}", self.session);
    }

    // nothing subscribed
    fn cleanup(&mut self) -> usize {
        0
    }

    fn update(&mut self, _elapsed_time: f32, _state_events: &mut Events<Transition>) {}

    fn draw(&mut self, state_events: &mut Events<Transition>) {
        if self.ctx.input().read(|input| input.key_clicked(Key::Escape)) {
            self.leave(state_events);
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
    use crate::context::RawApplicationContext;
    use crate::io::{ButtonState, InputEvent};

    #[test]
    fn escape_leaves_exactly_once() {
        let ctx = Arc::new(RawApplicationContext::new(LobbyConfig::default()));
        let mut state = InMatchState::new(ctx.clone(), SessionId::new("Y"));
        let mut events = Events::new();
        let mut reader = events.register();
        state.init();

        state.draw(&mut events);
        assert!(events.drain(&mut reader).is_empty());

        ctx.input().write(|input| input.update(&[InputEvent::key(ButtonState::Pressed, Key::Escape)]));
        state.draw(&mut events);
        state.draw(&mut events);

        assert_eq!(events.drain(&mut reader), vec![Transition::Pop]);
        let sent = ctx.channel().write(|channel| channel.drain_outgoing());
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event, REQUEST_LEAVE);
        assert_eq!(sent[0].payload, json!({ "id": "Y" }));
    }
}
