//////////////////////////////////////////////////
// Using

use crate::config::RejectionPolicy;
use crate::context::surface::Align;
use crate::context::{ApplicationContext, ContextExt};
use crate::events::Events;
use crate::game_state::{GameState, Handshake, StateKind, Transition};
use crate::protocol::{JoinRequest, JoinResponse, SessionId, REQUEST_JOIN};
use crate::subscriptions::Subscriptions;

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingMessage {
    Joined(SessionId),
    Rejected,
}

pub struct LoadingState {
    ctx: ApplicationContext,
    session: SessionId,
    handshake: Handshake,
    finished: bool,
    subscriptions: Subscriptions<LoadingMessage>,
}

//////////////////////////////////////////////////
// Implementation

impl LoadingState {
    pub fn new(ctx: ApplicationContext, session: SessionId, handshake: Handshake) -> Self {
        let subscriptions = Subscriptions::new(ctx.channel().clone());
        Self {
            ctx,
            session,
            handshake,
            finished: false,
            subscriptions,
        }
    }

    fn enter_match(&mut self, session: SessionId, state_events: &mut Events<Transition>) {
        log::info!("Session {} confirmed, starting match", session);
        self.finished = true;
        state_events.write(Transition::Pop);
        state_events.write(Transition::PushMatch(session));
    }
}

impl GameState for LoadingState {
    fn kind(&self) -> StateKind {
        StateKind::Loading(self.session.clone())
    }

    fn init(&mut self) {
        if self.handshake == Handshake::Hosted {
            return;
        }

        let pending = self.session.clone();
        self.subscriptions.subscribe(REQUEST_JOIN, move |response: JoinResponse| {
            match response.id {
                Some(id) if id != pending => {
                    log::warn!("Join response for {} while waiting on {}", id, pending);
                    None
                }
                _ if !response.accepted => Some(LoadingMessage::Rejected),
                id => Some(LoadingMessage::Joined(id.unwrap_or_else(|| pending.clone()))),
            }
        });

        let request = JoinRequest { id: self.session.clone() };
        self.ctx.channel().write(|channel| channel.emit(REQUEST_JOIN, request));
    }

    fn cleanup(&mut self) -> usize {
        self.subscriptions.release()
    }

    fn update(&mut self, _elapsed_time: f32, state_events: &mut Events<Transition>) {
        if self.finished {
            return;
        }

        if self.handshake == Handshake::Hosted {
            let session = self.session.clone();
            self.enter_match(session, state_events);
            return;
        }

        for message in self.subscriptions.drain() {
            match message {
                LoadingMessage::Joined(session) => {
                    self.enter_match(session, state_events);
                    return;
                }
                LoadingMessage::Rejected => match self.ctx.config().rejection {
                    RejectionPolicy::Ignore => log::warn!("Join of {} rejected, still waiting", self.session),
                    RejectionPolicy::ReturnToMenu => {
                        log::warn!("Join of {} rejected, returning to menu", self.session);
                        self.finished = true;
                        state_events.write(Transition::Pop);
                        return;
                    }
                },
            }
        }
    }

    fn draw(&mut self, _state_events: &mut Events<Transition>) {
        let theme = &self.ctx.config().theme;
        self.ctx.surface().write(|surface| {
            let center = surface.resolution() * 0.5;
            surface.text("Loading...", center, theme.loading_text_size, Align::Center, theme.foreground);
        });
    }
}

//////////////////////////////////////////////////
// Tests
