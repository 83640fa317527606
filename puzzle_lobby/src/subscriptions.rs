//////////////////////////////////////////////////
// Using

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use shrev::{Event, ReaderId};

use crate::context::channel::{Handler, ListenerId};
use crate::context::{ChannelContext, ContextExt};
use crate::events::Events;
use crate::protocol;

//////////////////////////////////////////////////
// Definition

pub type Mailbox<M> = Arc<RwLock<Events<M>>>;

// handlers holding a revoked token refuse every payload
#[derive(Debug, Clone)]
pub struct LifetimeToken(Arc<AtomicBool>);

/// Every channel listener a state installed, released together on teardown.
pub struct Subscriptions<M: Event> {
    channel: ChannelContext,
    records: Vec<(String, ListenerId)>,
    mailbox: Mailbox<M>,
    reader: ReaderId<M>,
    token: LifetimeToken,
}

//////////////////////////////////////////////////
// Implementation

impl LifetimeToken {
    fn new() -> Self {
        LifetimeToken(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<M: Event> Subscriptions<M> {
    pub fn new(channel: ChannelContext) -> Self {
        let mut events = Events::new();
        let reader = events.register();
        Self {
            channel,
            records: Vec::new(),
            mailbox: Arc::new(RwLock::new(events)),
            reader,
            token: LifetimeToken::new(),
        }
    }

    /// `map` turns a decoded payload into a state message, `None` refuses it.
    pub fn subscribe<P, F>(&mut self, event: &str, map: F)
    where
        P: DeserializeOwned,
        F: Fn(P) -> Option<M> + Send + Sync + 'static,
    {
        let mailbox = self.mailbox.clone();
        let token = self.token.clone();
        let name = event.to_owned();
        let handler: Handler = Box::new(move |payload: &Value| {
            if !token.is_alive() {
                log::debug!("Dropping '{}' for a torn down state", name);
                return false;
            }
            match protocol::decode::<P>(&name, payload) {
                Ok(payload) => match map(payload) {
                    Some(message) => {
                        mailbox.write(|events| events.write(message));
                        true
                    }
                    None => false,
                },
                Err(err) => {
                    log::warn!("{}", err);
                    false
                }
            }
        });
        let id = self.channel.write(|channel| channel.on(event, handler));
        self.records.push((event.to_owned(), id));
    }

    pub fn release(&mut self) -> usize {
        self.token.revoke();
        let records = std::mem::take(&mut self.records);
        if records.is_empty() {
            return 0;
        }
        self.channel.write(|channel| records.iter().filter(|(event, id)| channel.off(event, *id)).count())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn token(&self) -> &LifetimeToken {
        &self.token
    }
}

impl<M: Event + Clone> Subscriptions<M> {
    pub fn drain(&mut self) -> Vec<M> {
        let reader = &mut self.reader;
        self.mailbox.read(|events| events.drain(reader))
    }
}

impl<M: Event> Drop for Subscriptions<M> {
    fn drop(&mut self) {
        let released = self.release();
        if released > 0 {
            log::debug!("Released {} listener(s) on drop", released);
        }
    }
}

//////////////////////////////////////////////////
// Tests

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::protocol::{JoinResponse, SessionId, REQUEST_JOIN};

    #[derive(Debug, Clone, PartialEq)]
    enum Message {
        Joined(SessionId),
    }

    fn joined(response: JoinResponse) -> Option<Message> {
        response.accepted.then_some(response.id?).map(Message::Joined)
    }

    #[test]
    fn handlers_queue_messages_until_drained() {
        let channel = ChannelContext::default();
        let mut subscriptions = Subscriptions::new(channel.clone());
        subscriptions.subscribe(REQUEST_JOIN, joined);

        let accepted = channel.read(|channel| channel.dispatch(REQUEST_JOIN, &json!({ "accepted": true, "id": "Y" })));
        assert_eq!(accepted, 1);
        assert_eq!(subscriptions.drain(), vec![Message::Joined(SessionId::new("Y"))]);
        assert!(subscriptions.drain().is_empty());
    }

    #[test]
    fn refused_and_malformed_payloads_are_not_accepted() {
        let channel = ChannelContext::default();
        let mut subscriptions = Subscriptions::new(channel.clone());
        subscriptions.subscribe(REQUEST_JOIN, joined);

        channel.read(|channel| {
            assert_eq!(channel.dispatch(REQUEST_JOIN, &json!({ "accepted": false, "id": "Y" })), 0);
            assert_eq!(channel.dispatch(REQUEST_JOIN, &json!("garbage")), 0);
        });
        assert!(subscriptions.drain().is_empty());
    }

    #[test]
    fn release_removes_exactly_what_was_installed() {
        let channel = ChannelContext::default();
        let mut subscriptions = Subscriptions::new(channel.clone());
        subscriptions.subscribe(REQUEST_JOIN, joined);
        subscriptions.subscribe("getGameList", |_: Value| Some(Message::Joined(SessionId::new("list"))));
        assert_eq!(channel.read(|channel| channel.total_listeners()), 2);

        assert_eq!(subscriptions.release(), 2);
        assert_eq!(subscriptions.release(), 0);
        assert!(subscriptions.is_empty());
        assert!(!subscriptions.token().is_alive());
        assert_eq!(channel.read(|channel| channel.total_listeners()), 0);
    }

    #[test]
    fn dropping_the_guard_releases_its_listeners() {
        let channel = ChannelContext::default();
        {
            let mut subscriptions = Subscriptions::new(channel.clone());
            subscriptions.subscribe(REQUEST_JOIN, joined);
            assert_eq!(channel.read(|channel| channel.listener_count(REQUEST_JOIN)), 1);
        }
        assert_eq!(channel.read(|channel| channel.listener_count(REQUEST_JOIN)), 0);
    }

    #[test]
    fn revoked_token_turns_late_callbacks_into_no_ops() {
        let channel = ChannelContext::default();
        let mut subscriptions = Subscriptions::<Message>::new(channel.clone());
        subscriptions.subscribe(REQUEST_JOIN, joined);

        // a transport holding on to the handler past teardown
        subscriptions.token.revoke();
        let accepted = channel.read(|channel| channel.dispatch(REQUEST_JOIN, &json!({ "accepted": true, "id": "Y" })));
        assert_eq!(accepted, 0);
        assert!(subscriptions.drain().is_empty());
    }
}
