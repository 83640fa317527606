//////////////////////////////////////////////////
// Modules

pub mod channel;

pub mod input;

pub mod surface;

//////////////////////////////////////////////////
// Using

use std::sync::{Arc, PoisonError, RwLock};

use channel::RawChannelContext;
use input::RawInputContext;
use surface::RawSurfaceContext;

use crate::config::LobbyConfig;

//////////////////////////////////////////////////
// Context Traits

pub trait ContextExt<T> {
    fn read<R>(&self, exec: impl FnOnce(&T) -> R) -> R;

    fn write<R>(&self, exec: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> ContextExt<T> for Arc<RwLock<T>> {
    fn read<R>(&self, exec: impl FnOnce(&T) -> R) -> R {
        let t = self.as_ref().read().unwrap_or_else(PoisonError::into_inner);
        exec(&t)
    }

    fn write<R>(&self, exec: impl FnOnce(&mut T) -> R) -> R {
        let mut t = self.as_ref().write().unwrap_or_else(PoisonError::into_inner);
        exec(&mut t)
    }
}

//////////////////////////////////////////////////
// ApplicationContext

pub type ChannelContext = Arc<RwLock<RawChannelContext>>;
pub type InputContext = Arc<RwLock<RawInputContext>>;
pub type SurfaceContext = Arc<RwLock<RawSurfaceContext>>;

#[derive(Debug, Default)]
pub struct RawApplicationContext {
    config: LobbyConfig,
    channel: ChannelContext,
    input: InputContext,
    surface: SurfaceContext,
}

pub type ApplicationContext = Arc<RawApplicationContext>;

//////////////////////////////////////////////////
// Implementation

impl RawApplicationContext {
    pub fn new(config: LobbyConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_channel(mut self, channel: ChannelContext) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_resolution(self, width: u32, height: u32) -> Self {
        self.surface.write(|ctx| ctx.resize(width, height));
        self
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn channel(&self) -> &ChannelContext {
        &self.channel
    }

    pub fn input(&self) -> &InputContext {
        &self.input
    }

    pub fn surface(&self) -> &SurfaceContext {
        &self.surface
    }
}
