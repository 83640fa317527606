//////////////////////////////////////////////////
// Using

use crate::events::Events;
use crate::protocol::SessionId;

//////////////////////////////////////////////////
// Transitions

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Handshake {
    Join,
    // the server joined us when it created the session
    Hosted,
}

// applied in write order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    PushLoading { session: SessionId, handshake: Handshake },
    PushMatch(SessionId),
    Pop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKind {
    Menu,
    Loading(SessionId),
    InMatch(SessionId),
}

//////////////////////////////////////////////////
// GameState

pub trait GameState {
    fn kind(&self) -> StateKind;

    fn init(&mut self);

    /// Releases every listener installed by `init`, returns how many were removed.
    fn cleanup(&mut self) -> usize;

    fn update(&mut self, elapsed_time: f32, state_events: &mut Events<Transition>);

    // only the active state draws
    fn draw(&mut self, _state_events: &mut Events<Transition>) {}
}
