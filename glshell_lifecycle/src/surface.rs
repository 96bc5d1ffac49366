//! The seam between the lifecycle and a concrete windowing backend.

use std::ffi::c_void;

use crate::config::ApplicationConfig;
use crate::debug::DebugMessage;
use crate::error::{ContextError, GlError, PresentError};
use crate::event::WindowEvent;

/// Window operations available to application hooks.
pub trait Surface {
    /// The configuration the window was created with.
    fn config(&self) -> &ApplicationConfig;

    fn title(&self) -> &str;

    fn set_title(&mut self, title: &str);

    /// Current client-area size in logical units.
    fn size(&self) -> (u32, u32);

    /// Last known cursor position relative to the client area, rounded down.
    fn cursor_position(&self) -> (i32, i32);

    fn is_extension_supported(&self, name: &str) -> bool;

    /// Address of a GL entry point, or null if the runtime does not provide it.
    fn proc_address(&self, name: &str) -> *const c_void;
}

/// A live window and its current GL context, as driven by the render loop.
///
/// Dropping the window releases the context.
pub trait Window: Surface {
    /// Seconds since the platform was initialized.
    fn elapsed(&self) -> f64;

    fn present(&mut self) -> Result<(), PresentError>;

    /// Processes pending window-system events and appends them to `events`.
    fn poll_events(&mut self, events: &mut Vec<WindowEvent>);

    /// Pops the next code from the GL error queue.
    fn next_error(&mut self) -> Option<GlError>;

    /// Pops the next queued driver diagnostic, if a debug context is active.
    fn next_debug_message(&mut self) -> Option<DebugMessage> {
        None
    }

    /// Number of diagnostics discarded since the last call.
    fn dropped_debug_messages(&mut self) -> usize {
        0
    }

    /// True once the window system asked for the window to go away outside the normal event
    /// stream (for instance the window was destroyed).
    fn should_close(&self) -> bool {
        false
    }
}

/// Creates windows with GL contexts.
pub trait Platform {
    type Window: Window;

    fn create_window(&mut self, config: &ApplicationConfig) -> Result<Self::Window, ContextError>;

    /// Whether windows from this platform route events through process-global state, in which
    /// case only one lifecycle may run on it at a time.
    fn is_exclusive(&self) -> bool {
        true
    }
}
