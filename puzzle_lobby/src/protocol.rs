//////////////////////////////////////////////////
// Using

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LobbyError, Result};

//////////////////////////////////////////////////
// Event names
//
// The matchmaking server answers on the same event name it was asked on.

pub const LIST_SESSIONS: &str = "getGameList";
pub const REQUEST_HOST: &str = "requestHost";
pub const REQUEST_JOIN: &str = "requestJoin";
pub const REQUEST_LEAVE: &str = "requestLeave";

//////////////////////////////////////////////////
// Payloads

// ids go back to the server in the form they arrived in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(WireId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    #[serde(default)]
    pub player_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResponse {
    pub accepted: bool,
    #[serde(default)]
    pub id: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: SessionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub accepted: bool,
    #[serde(default)]
    pub id: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: SessionId,
}

//////////////////////////////////////////////////
// Implementation

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(WireId::Text(id.into()))
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        SessionId(WireId::Number(id.into()))
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::new(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            WireId::Text(text) => f.write_str(text),
            WireId::Number(number) => write!(f, "{}", number),
        }
    }
}

pub fn decode<P: DeserializeOwned>(event: &str, payload: &Value) -> Result<P> {
    P::deserialize(payload).map_err(|source| LobbyError::Payload {
        event: event.to_owned(),
        source,
    })
}

//////////////////////////////////////////////////
// Tests
