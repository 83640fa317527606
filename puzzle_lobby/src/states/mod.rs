//////////////////////////////////////////////////
// Modules

mod in_match;
mod loading;
mod menu;

//////////////////////////////////////////////////
// Exports

pub use in_match::InMatchState;
pub use loading::{LoadingMessage, LoadingState};
pub use menu::{MenuMessage, MenuState, ScrollModel};
