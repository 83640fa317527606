//////////////////////////////////////////////////
// Using

use thiserror::Error;

//////////////////////////////////////////////////
// Definition

#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("cannot pop the last remaining state")]
    StackUnderflow,

    #[error("malformed payload for '{event}': {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid lobby config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LobbyError>;
