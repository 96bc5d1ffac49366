//! Routes polled events to the running application's hooks.

use std::cell::RefCell;
use std::rc::Weak;

use crate::app::Application;
use crate::debug::DebugMessage;
use crate::event::WindowEvent;

/// Holds a non-owning handle to the one application that is currently running.
///
/// With no active application every dispatch is a no-op.
#[derive(Default)]
pub struct EventDispatcher {
    active: Option<Weak<RefCell<dyn Application>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn activate(&mut self, app: Weak<RefCell<dyn Application>>) {
        self.active = Some(app);
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Calls the hook matching `event`. Returns false if nothing received it.
    pub fn dispatch(&self, event: &WindowEvent) -> bool {
        self.with_active(|app| route(app, event))
    }

    pub fn dispatch_debug(&self, message: &DebugMessage) -> bool {
        self.with_active(|app| app.on_debug_message(message))
    }

    fn with_active<F: FnOnce(&mut dyn Application)>(&self, f: F) -> bool {
        let app = match self.active.as_ref().and_then(Weak::upgrade) {
            Some(app) => app,
            None => return false,
        };

        // A hook that triggers another dispatch would alias the application.
        let mut app = match app.try_borrow_mut() {
            Ok(app) => app,
            Err(_) => {
                warn!("Dropping event: application is busy in another hook");
                return false;
            }
        };

        f(&mut *app);
        true
    }
}

fn route(app: &mut dyn Application, event: &WindowEvent) {
    match *event {
        WindowEvent::Resized { width, height } => app.on_window_resized(width, height),
        WindowEvent::Focused(focused) => app.on_window_focused(focused),
        WindowEvent::CloseRequested => app.on_window_closed(),
        WindowEvent::Key { key, scancode, action, mods } => app.on_key(key, scancode, action, mods),
        WindowEvent::MouseButton { button, action, mods } => app.on_mouse_button(button, action, mods),
        WindowEvent::CursorMoved { x, y } => app.on_cursor_moved(x, y),
        WindowEvent::Scroll { x, y } => app.on_scroll(x, y),
    }
}
