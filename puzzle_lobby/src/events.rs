//////////////////////////////////////////////////
// Using

use shrev::{Event, EventChannel, ReaderId};

//////////////////////////////////////////////////
// Definition

#[derive(Debug)]
pub struct Events<T: Event> {
    channel: EventChannel<T>,
}

//////////////////////////////////////////////////
// Implementation

impl<T: Event> Events<T> {
    pub fn new() -> Events<T> {
        Events { channel: EventChannel::new() }
    }

    pub fn register(&mut self) -> ReaderId<T> {
        self.channel.register_reader()
    }

    pub fn write(&mut self, event: T) {
        self.channel.single_write(event);
    }

    pub fn read(&self, reader: &mut ReaderId<T>) -> Vec<&T> {
        self.channel.read(reader).collect()
    }
}

impl<T: Event + Clone> Events<T> {
    // owned copies, so the caller may mutate while handling them
    pub fn drain(&self, reader: &mut ReaderId<T>) -> Vec<T> {
        self.channel.read(reader).cloned().collect()
    }
}

impl<T: Event> Default for Events<T> {
    fn default() -> Self {
        Self::new()
    }
}

//////////////////////////////////////////////////
// Tests
