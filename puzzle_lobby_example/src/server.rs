//////////////////////////////////////////////////
// Using

use puzzle_lobby::prelude::*;
use puzzle_lobby::protocol::{JoinRequest, LeaveRequest, SessionSummary, LIST_SESSIONS, REQUEST_HOST, REQUEST_JOIN, REQUEST_LEAVE};
use serde_json::{json, Value};

//////////////////////////////////////////////////
// Definition

/// In-process stand-in for the matchmaking server. Answers every request on
/// the event name it was sent on.
pub struct LocalServer {
    sessions: Vec<SessionSummary>,
    next_id: u64,
}

//////////////////////////////////////////////////
// Implementation

impl LocalServer {
    pub fn new() -> Self {
        Self {
            sessions: vec![
                SessionSummary {
                    id: SessionId::new("1"),
                    player_count: 1,
                },
                SessionSummary {
                    id: SessionId::new("2"),
                    player_count: 3,
                },
            ],
            next_id: 3,
        }
    }

    pub fn pump(&mut self, ctx: &ApplicationContext) {
        let requests = ctx.channel().write(|channel| channel.drain_outgoing());
        for request in requests {
            if let Some((event, response)) = self.answer(&request) {
                ctx.channel().read(|channel| channel.dispatch(event, &response));
            }
        }
    }

    fn answer(&mut self, request: &ChannelMessage) -> Option<(&'static str, Value)> {
        match request.event.as_str() {
            LIST_SESSIONS => Some((LIST_SESSIONS, self.list())),
            REQUEST_HOST => {
                let id = SessionId::from(self.next_id);
                self.next_id += 1;
                self.sessions.push(SessionSummary {
                    id: id.clone(),
                    player_count: 1,
                });
                log::info!("[server] hosting session {}", id);
                Some((REQUEST_HOST, json!({ "accepted": true, "id": id })))
            }
            REQUEST_JOIN => {
                let JoinRequest { id } = serde_json::from_value(request.payload.clone()).ok()?;
                let session = self.sessions.iter_mut().find(|session| session.id == id);
                let accepted = session.is_some();
                if let Some(session) = session {
                    session.player_count += 1;
                }
                log::info!("[server] join {} accepted: {}", id, accepted);
                Some((REQUEST_JOIN, json!({ "accepted": accepted, "id": id })))
            }
            REQUEST_LEAVE => {
                let LeaveRequest { id } = serde_json::from_value(request.payload.clone()).ok()?;
                if let Some(session) = self.sessions.iter_mut().find(|session| session.id == id) {
                    session.player_count = session.player_count.saturating_sub(1);
                }
                log::info!("[server] left session {}", id);
                // leaving is not acknowledged, push a fresh list instead
                Some((LIST_SESSIONS, self.list()))
            }
            other => {
                log::warn!("[server] unknown event '{}'", other);
                None
            }
        }
    }

    fn list(&self) -> Value {
        serde_json::to_value(&self.sessions).unwrap_or(Value::Null)
    }
}

impl Default for LocalServer {
    fn default() -> Self {
        Self::new()
    }
}
