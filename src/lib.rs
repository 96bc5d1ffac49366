//! An application shell for OpenGL programs.
//!
//! Implement [`Application`] for your program and hand it to [`run`]. The shell opens a window
//! with an OpenGL core-profile context through glutin, calls your hooks in order and keeps
//! rendering until the window is closed or Escape is released:
//!
//! ```no_run
//! use glshell::{Application, Surface};
//!
//! struct Clear;
//!
//! impl Application for Clear {
//!     fn render(&mut self, _surface: &mut dyn Surface, current_time: f64) {
//!         let color = [current_time.sin() as f32 * 0.5 + 0.5, 0.0, 0.0, 1.0];
//!         unsafe { gl::ClearBufferfv(gl::COLOR, 0, color.as_ptr()) };
//!     }
//! }
//!
//! std::process::exit(glshell::run(Clear));
//! ```

#[macro_use] extern crate log;

use std::cell::RefCell;
use std::rc::Rc;

pub mod graphics;
pub mod platform;

pub use lifecycle::{
    Action, ActiveSlot, Application, ApplicationConfig, ContextError, ContextFlags, DebugKind, DebugMessage,
    DebugSeverity, DebugSource, EventDispatcher, GlError, InitError, Key, Lifecycle, Modifiers, MouseButton,
    Platform, RunError, RunSummary, RunningState, Surface, Window, WindowEvent,
};

use crate::platform::GlutinPlatform;

/// Runs `app` in a glutin window and returns the process exit code: 0 after a normal exit,
/// otherwise [`RunError::exit_code`].
pub fn run<A: Application + 'static>(app: A) -> i32 {
    let app = Rc::new(RefCell::new(app));
    let mut lifecycle = Lifecycle::new(GlutinPlatform::new());

    match lifecycle.run(&app) {
        Ok(summary) => {
            debug!("Rendered {} frames", summary.frames);
            0
        }
        Err(e) => e.exit_code(),
    }
}
