//! Window/context lifecycle and event dispatch for OpenGL applications.
//!
//! This crate knows nothing about any particular windowing library or GL loader. A backend
//! implements [`Platform`] (window + context creation) and [`Window`] (present, poll, error
//! queue), and an application implements [`Application`]. [`Lifecycle::run`] ties them together:
//! it creates the window, calls the init and startup hooks, drives the render loop until the
//! window is closed or Escape is released, and tears everything down in order.

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;

pub mod app;
pub mod clock;
pub mod config;
pub mod debug;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod slot;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use app::Application;
pub use clock::FrameClock;
pub use config::{ApplicationConfig, ContextFlags};
pub use debug::{DebugKind, DebugMessage, DebugReceiver, DebugSender, DebugSeverity, DebugSource};
pub use dispatch::EventDispatcher;
pub use error::{ContextError, GlError, InitError, PresentError, RunError};
pub use event::{Action, Key, Modifiers, MouseButton, WindowEvent};
pub use lifecycle::{Lifecycle, RunSummary, RunningState};
pub use slot::{ActiveSlot, SlotClaim};
pub use surface::{Platform, Surface, Window};
