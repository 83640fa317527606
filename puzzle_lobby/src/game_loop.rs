//////////////////////////////////////////////////
// Using

use std::time::Instant;

use log::LevelFilter;

use crate::io::InputEvent;

//////////////////////////////////////////////////
// GameLoop

pub trait GameLoop {
    fn title(&self) -> &str;

    fn log_level(&self) -> LevelFilter {
        LevelFilter::Info
    }

    fn cleanup(&mut self);

    fn input(&mut self, input_events: &[InputEvent]);

    fn update(&mut self, elapsed_time: f32);

    fn render(&mut self);

    fn resize_device(&mut self, width: u32, height: u32);
}

// the host owns the window and event loop and forwards input here
pub struct FramePump<L: GameLoop> {
    interface: L,
    game_time: Instant,
    input_events: Vec<InputEvent>,
}

//////////////////////////////////////////////////
// Logging

// RUST_LOG overrides filter_level
pub fn init_logging(filter_level: LevelFilter) {
    if env_logger::builder().filter_level(filter_level).parse_default_env().try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

//////////////////////////////////////////////////
// Implementation

impl<L: GameLoop> FramePump<L> {
    pub fn new(interface: L) -> Self {
        Self {
            interface,
            game_time: Instant::now(),
            input_events: Vec::with_capacity(10),
        }
    }

    pub fn with_logging(self) -> Self {
        init_logging(self.interface.log_level());
        log::info!("Initializing {}...", self.interface.title());
        self
    }

    pub fn interface(&self) -> &L {
        &self.interface
    }

    pub fn push_input(&mut self, input_event: InputEvent) {
        self.input_events.push(input_event);
    }

    // minimized windows report a zero size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != 0 && height != 0 {
            self.interface.resize_device(width, height);
        }
    }

    // returns the elapsed time in seconds
    pub fn frame(&mut self) -> f32 {
        // update time
        let new_time = Instant::now();
        let elapsed_time = new_time.duration_since(self.game_time).as_millis() as f32 / 1000.0;
        self.game_time = new_time;

        // call input callback
        self.interface.input(&self.input_events);
        self.input_events.clear();

        // call update callback
        self.interface.update(elapsed_time);

        // call render callback
        self.interface.render();

        elapsed_time
    }

    pub fn exit(mut self) -> L {
        log::info!("Exiting application...");
        self.interface.cleanup();
        self.interface
    }
}

//////////////////////////////////////////////////
// Tests
