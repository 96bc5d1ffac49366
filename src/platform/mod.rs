//! The glutin backend: window and context creation, event polling and the GL debug bridge.

mod debug_output;
pub mod input;
mod windowed;

pub use self::debug_output::{kind_from_gl, severity_from_gl, source_from_gl};
pub use self::input::InputState;
pub use self::windowed::{GlutinPlatform, GlutinWindow};
