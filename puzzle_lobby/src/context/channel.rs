//////////////////////////////////////////////////
// Using

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

//////////////////////////////////////////////////
// Definition

/// Receives an inbound payload, returns whether it was accepted.
pub type Handler = Box<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub event: String,
    pub payload: Value,
}

struct Listener {
    id: ListenerId,
    handler: Handler,
}

// outbound messages wait for the transport to drain them
#[derive(Default)]
pub struct RawChannelContext {
    listeners: HashMap<String, Vec<Listener>>,
    outgoing: Vec<ChannelMessage>,
    next_id: u64,
}

//////////////////////////////////////////////////
// Implementation

impl RawChannelContext {
    //////////////////////////////////////////////////
    // Listener functions

    pub fn on(&mut self, event: &str, handler: Handler) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.entry(event.to_owned()).or_default().push(Listener { id, handler });
        log::debug!("Listening on '{}' ({:?})", event, id);
        id
    }

    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(listeners) = self.listeners.get_mut(event) else {
            log::warn!("No listeners on '{}', cannot remove {:?}", event, id);
            return false;
        };
        let count = listeners.len();
        listeners.retain(|listener| listener.id != id);
        let removed = listeners.len() < count;
        if listeners.is_empty() {
            self.listeners.remove(event);
        }
        if removed {
            log::debug!("Stopped listening on '{}' ({:?})", event, id);
        } else {
            log::warn!("Listener {:?} is not registered on '{}'", id, event);
        }
        removed
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map(Vec::len).unwrap_or(0)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    //////////////////////////////////////////////////
    // Message functions

    pub fn emit(&mut self, event: &str, payload: impl Serialize) {
        match serde_json::to_value(payload) {
            Ok(payload) => {
                log::debug!("-> '{}' {}", event, payload);
                self.outgoing.push(ChannelMessage {
                    event: event.to_owned(),
                    payload,
                });
            }
            Err(err) => log::error!("Failed to encode '{}': {}", event, err),
        }
    }

    pub fn outgoing(&self) -> &[ChannelMessage] {
        &self.outgoing
    }

    pub fn drain_outgoing(&mut self) -> Vec<ChannelMessage> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn dispatch(&self, event: &str, payload: &Value) -> usize {
        let accepted = self
            .listeners
            .get(event)
            .map(|listeners| listeners.iter().filter(|listener| (listener.handler)(payload)).count())
            .unwrap_or(0);
        if accepted == 0 {
            log::debug!("<- '{}' was not accepted by any listener", event);
        } else {
            log::debug!("<- '{}' accepted by {} listener(s)", event, accepted);
        }
        accepted
    }
}

impl fmt::Debug for RawChannelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: HashMap<&str, usize> = self.listeners.iter().map(|(event, listeners)| (event.as_str(), listeners.len())).collect();
        f.debug_struct("RawChannelContext")
            .field("listeners", &listeners)
            .field("outgoing", &self.outgoing)
            .finish()
    }
}

//////////////////////////////////////////////////
// Tests
