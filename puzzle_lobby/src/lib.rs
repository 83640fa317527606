//////////////////////////////////////////////////
// Module

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod game_app;
pub mod game_loop;
pub mod game_state;
pub mod io;
pub mod options;
pub mod protocol;
pub mod states;
pub mod subscriptions;


//////////////////////////////////////////////////
// Prelude

pub mod prelude {
    pub use crate::config::LobbyConfig;
    pub use crate::context::channel::ChannelMessage;
    pub use crate::context::surface::DrawCommand;
    pub use crate::context::{ApplicationContext, ContextExt, RawApplicationContext};
    pub use crate::error::LobbyError;
    pub use crate::game_app::LobbyApplication;
    pub use crate::game_loop::{init_logging, FramePump, GameLoop};
    pub use crate::game_state::{GameState, StateKind, Transition};
    pub use crate::io::{ButtonState, Files, InputEvent, Key, MouseButton};
    pub use crate::protocol::SessionId;
}
