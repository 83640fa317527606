//////////////////////////////////////////////////
// Using

mod server;

use std::sync::Arc;

use puzzle_lobby::prelude::*;

use crate::server::LocalServer;

//////////////////////////////////////////////////
// Script

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn press(x: f32, y: f32) -> Vec<InputEvent> {
    vec![InputEvent::cursor(x, y), InputEvent::mouse(ButtonState::Pressed, MouseButton::Left)]
}

fn release() -> Vec<InputEvent> {
    vec![InputEvent::mouse(ButtonState::Released, MouseButton::Left)]
}

fn escape(state: ButtonState) -> Vec<InputEvent> {
    vec![InputEvent::key(state, Key::Escape)]
}

// one entry per frame: join the first listed session, leave it, host a new one and leave again
fn script() -> Vec<Vec<InputEvent>> {
    vec![
        vec![],
        vec![InputEvent::wheel(120.0)],
        press(400.0, 200.0),
        release(),
        vec![],
        escape(ButtonState::Pressed),
        escape(ButtonState::Released),
        press(400.0, 100.0),
        release(),
        vec![],
        vec![],
        escape(ButtonState::Pressed),
        escape(ButtonState::Released),
    ]
}

//////////////////////////////////////////////////
// Entry point

pub fn main() {
    let loaded = LobbyConfig::load(&Files::new());
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let ctx: ApplicationContext = Arc::new(RawApplicationContext::new(config));
    let mut server = LocalServer::new();
    let mut pump = FramePump::new(LobbyApplication::new(ctx.clone())).with_logging();
    pump.resize(WIDTH, HEIGHT);
    if let Err(err) = loaded {
        log::warn!("{}, falling back to defaults", err);
    }

    for (frame, input_events) in script().into_iter().enumerate() {
        input_events.into_iter().for_each(|input_event| pump.push_input(input_event));
        pump.frame();
        server.pump(&ctx);

        let commands = ctx.surface().read(|surface| surface.commands().len());
        log::info!("frame {:>2}: {:?} ({} draw calls)", frame, pump.interface().stack().kinds(), commands);
        ctx.surface().read(|surface| surface.commands().iter().for_each(|command| log::trace!("  {:?}", command)));
    }

    pump.exit();
}
