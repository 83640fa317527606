//////////////////////////////////////////////////
// Using

use shrev::ReaderId;

use crate::context::{ApplicationContext, ContextExt};
use crate::error::{LobbyError, Result};
use crate::events::Events;
use crate::game_loop::GameLoop;
use crate::game_state::{GameState, StateKind, Transition};
use crate::io::InputEvent;
use crate::states::{InMatchState, LoadingState, MenuState};

//////////////////////////////////////////////////
// StateStack

/// Ordered states, the last one is active. Never empty.
pub struct StateStack {
    states: Vec<Box<dyn GameState>>,
}

impl StateStack {
    pub fn new(mut root: Box<dyn GameState>) -> Self {
        log::info!("Starting with {:?}", root.kind());
        root.init();
        Self { states: vec![root] }
    }

    pub fn push(&mut self, mut state: Box<dyn GameState>) {
        log::info!("Push {:?}", state.kind());
        state.init();
        self.states.push(state);
    }

    // the root is never removed
    pub fn pop(&mut self) -> Result<StateKind> {
        if self.states.len() <= 1 {
            return Err(LobbyError::StackUnderflow);
        }
        let mut state = self.states.pop().ok_or(LobbyError::StackUnderflow)?;
        let released = state.cleanup();
        log::info!("Pop {:?}, released {} listener(s)", state.kind(), released);
        Ok(state.kind())
    }

    pub fn top(&self) -> Option<&dyn GameState> {
        self.states.last().map(|state| state.as_ref())
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn GameState + 'static)> {
        self.states.last_mut().map(|state| state.as_mut())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn kinds(&self) -> Vec<StateKind> {
        self.states.iter().map(|state| state.kind()).collect()
    }

    // only the active state may change the stack
    pub fn update(&mut self, elapsed_time: f32, state_events: &mut Events<Transition>) {
        let Some((top, covered)) = self.states.split_last_mut() else {
            return;
        };

        let mut discarded = Events::new();
        let mut reader = discarded.register();
        for state in covered.iter_mut() {
            state.update(elapsed_time, &mut discarded);
            for transition in discarded.read(&mut reader) {
                log::warn!("Ignoring {:?} from covered {:?}", transition, state.kind());
            }
        }

        top.update(elapsed_time, state_events);
    }

    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        while let Some(mut state) = self.states.pop() {
            released += state.cleanup();
        }
        released
    }
}

//////////////////////////////////////////////////
// LobbyApplication

pub struct LobbyApplication {
    ctx: ApplicationContext,
    stack: StateStack,
    events: Events<Transition>,
    reader: ReaderId<Transition>,
}

impl LobbyApplication {
    pub fn new(ctx: ApplicationContext) -> Self {
        let stack = StateStack::new(Box::new(MenuState::new(ctx.clone())));
        let mut events = Events::new();
        let reader = events.register();
        Self { ctx, stack, events, reader }
    }

    pub fn context(&self) -> &ApplicationContext {
        &self.ctx
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn active(&self) -> Option<StateKind> {
        self.stack.top().map(|state| state.kind())
    }

    fn apply_transitions(&mut self) {
        for transition in self.events.drain(&mut self.reader) {
            if let Err(err) = self.apply(transition) {
                log::error!("{}", err);
            }
        }
    }

    fn apply(&mut self, transition: Transition) -> Result<()> {
        match transition {
            Transition::PushLoading { session, handshake } => {
                self.stack.push(Box::new(LoadingState::new(self.ctx.clone(), session, handshake)));
            }
            Transition::PushMatch(session) => {
                self.stack.push(Box::new(InMatchState::new(self.ctx.clone(), session)));
            }
            Transition::Pop => {
                self.stack.pop()?;
            }
        }
        Ok(())
    }
}

impl GameLoop for LobbyApplication {
    fn title(&self) -> &str {
        "Puzzle Lobby"
    }

    fn log_level(&self) -> log::LevelFilter {
        self.ctx.config().log_level
    }

    fn cleanup(&mut self) {
        let released = self.stack.clear();
        log::info!("Released {} listener(s) on shutdown", released);
    }

    fn input(&mut self, input_events: &[InputEvent]) {
        // update input context
        self.ctx.input().write(|ctx| ctx.update(input_events));
    }

    fn update(&mut self, elapsed_time: f32) {
        self.stack.update(elapsed_time, &mut self.events);
        self.apply_transitions();
    }

    fn render(&mut self) {
        // clear frame
        let background = self.ctx.config().theme.background;
        self.ctx.surface().write(|ctx| {
            ctx.begin_frame();
            ctx.background(background);
        });

        if let Some(state) = self.stack.top_mut() {
            state.draw(&mut self.events);
        }
        self.apply_transitions();
    }

    fn resize_device(&mut self, width: u32, height: u32) {
        self.ctx.surface().write(|ctx| ctx.resize(width, height));
    }
}

//////////////////////////////////////////////////
// Tests

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::protocol::SessionId;

    struct Scripted {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        request: Option<Transition>,
    }

    impl Scripted {
        fn boxed(name: &'static str, log: &Arc<Mutex<Vec<String>>>, request: Option<Transition>) -> Box<dyn GameState> {
            Box::new(Scripted {
                name,
                log: log.clone(),
                request,
            })
        }

        fn record(&self, call: &str) {
            self.log.lock().unwrap().push(format!("{} {}", call, self.name));
        }
    }

    impl GameState for Scripted {
        fn kind(&self) -> StateKind {
            StateKind::InMatch(SessionId::new(self.name))
        }

        fn init(&mut self) {
            self.record("init");
        }

        fn cleanup(&mut self) -> usize {
            self.record("cleanup");
            1
        }

        fn update(&mut self, _elapsed_time: f32, state_events: &mut Events<Transition>) {
            self.record("update");
            if let Some(request) = self.request.clone() {
                state_events.write(request);
            }
        }
    }

    #[test]
    fn pop_tears_down_before_removing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stack = StateStack::new(Scripted::boxed("root", &log, None));
        stack.push(Scripted::boxed("child", &log, None));

        assert_eq!(stack.pop().unwrap(), StateKind::InMatch(SessionId::new("child")));
        assert_eq!(stack.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["init root", "init child", "cleanup child"]);
    }

    #[test]
    fn root_cannot_be_popped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stack = StateStack::new(Scripted::boxed("root", &log, None));

        assert!(matches!(stack.pop(), Err(LobbyError::StackUnderflow)));
        assert_eq!(stack.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["init root"]);
    }

    #[test]
    fn only_the_active_state_changes_the_stack() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stack = StateStack::new(Scripted::boxed("root", &log, Some(Transition::Pop)));
        stack.push(Scripted::boxed("child", &log, None));

        let mut events = Events::new();
        let mut reader = events.register();
        stack.update(0.0, &mut events);

        assert!(events.drain(&mut reader).is_empty());
        assert_eq!(*log.lock().unwrap(), vec!["init root", "init child", "update root", "update child"]);
    }

    #[test]
    fn default_draw_requests_nothing() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut state = Scripted::boxed("root", &log, Some(Transition::Pop));
        let mut events = Events::new();
        let mut reader = events.register();
        state.draw(&mut events);

        assert!(events.drain(&mut reader).is_empty());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_tears_down_top_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stack = StateStack::new(Scripted::boxed("root", &log, None));
        stack.push(Scripted::boxed("child", &log, None));

        assert_eq!(stack.clear(), 2);
        assert!(stack.is_empty());
        assert_eq!(*log.lock().unwrap(), vec!["init root", "init child", "cleanup child", "cleanup root"]);
    }
}
