use crate::config::ApplicationConfig;
use crate::debug::DebugMessage;
use crate::error::GlError;
use crate::event::{Action, Key, Modifiers, MouseButton};
use crate::surface::Surface;

/// An OpenGL program driven by [`Lifecycle`](crate::Lifecycle).
///
/// Only [`render`](Application::render) is required. Every other hook has a default that does
/// nothing beyond logging, so applications override just what they need.
///
/// The lifecycle hooks run in this order: `configure`, `on_init`, `on_startup`, `render` once per
/// frame, `on_shutdown`. Input hooks are called while events are polled, after the frame has been
/// presented.
pub trait Application {
    /// Adjust the window and context request before the window is created.
    fn configure(&mut self, _config: &mut ApplicationConfig) {}

    /// Called once the window and context exist. An error ends the run before startup.
    fn on_init(&mut self, _surface: &mut dyn Surface) -> anyhow::Result<()> {
        Ok(())
    }

    /// Allocate GPU resources (shaders, buffers, textures). An error ends the run before the
    /// render loop starts, and `on_shutdown` is not called.
    fn on_startup(&mut self, _surface: &mut dyn Surface) -> anyhow::Result<()> {
        Ok(())
    }

    /// Draws one frame. `current_time` is in seconds and never decreases.
    fn render(&mut self, surface: &mut dyn Surface, current_time: f64);

    /// Release GPU resources. The context is still current.
    fn on_shutdown(&mut self, _surface: &mut dyn Surface) {}

    fn on_gl_error(&mut self, error: GlError) {
        error!("OpenGL error: {}", error);
    }

    /// Receives driver diagnostics when the context was created with the debug flag.
    fn on_debug_message(&mut self, message: &DebugMessage) {
        log!(
            message.severity.log_level(),
            "GL debug [{:?}/{:?}] #{}: {}",
            message.source,
            message.kind,
            message.id,
            message.text
        );
    }

    fn on_window_resized(&mut self, _width: u32, _height: u32) {}

    fn on_window_focused(&mut self, _focused: bool) {}

    fn on_window_closed(&mut self) {}

    fn on_key(&mut self, _key: Key, _scancode: u32, _action: Action, _mods: Modifiers) {}

    fn on_mouse_button(&mut self, _button: MouseButton, _action: Action, _mods: Modifiers) {}

    fn on_cursor_moved(&mut self, _x: f64, _y: f64) {}

    fn on_scroll(&mut self, _x_offset: f64, _y_offset: f64) {}
}
