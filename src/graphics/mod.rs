//! Thin safe wrappers around the handful of GL calls the shell itself needs: reading shader
//! sources, compiling and linking them, and querying the current context.
//!
//! Everything here except [`loader`] requires a current GL context with its function table
//! loaded, which is the case inside every [`Application`](lifecycle::Application) hook.

use thiserror::Error;

pub mod info;
pub mod loader;
pub mod opengl;
mod utils;

pub use self::info::ContextInfo;
pub use self::loader::{read_shader, try_read_shader, LoadError};
pub use self::opengl::{Program, Shader, ShaderKind};

/// Problems reported by the driver while building shaders and programs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphicsError {
    #[error("failed to compile {kind} shader: {log}")]
    ShaderCompile { kind: &'static str, log: String },

    #[error("failed to link program: {0}")]
    ProgramLink(String),

    #[error("invalid shader source: {0}")]
    InvalidSource(String),
}
