//! Error types for window creation and the application lifecycle.
//!
//! Every error is logged where it is detected. The values returned from
//! [`Lifecycle::run`](crate::Lifecycle::run) only tell the caller which stage failed.

use std::fmt;

use thiserror::Error;

/// Failure to produce a usable window and GL context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The windowing system itself could not be brought up.
    #[error("failed to initialize the windowing system: {0}")]
    Platform(String),

    /// The window or its context could not be created.
    #[error("failed to create window: {0}")]
    ContextCreation(String),

    /// The runtime cannot provide the requested OpenGL version.
    #[error("OpenGL {major}.{minor} not supported")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// A required GL entry point could not be loaded.
    #[error("failed to load OpenGL function `{0}`")]
    FunctionLoad(String),

    #[error("invalid application config: {0}")]
    InvalidConfig(String),
}

/// Why the init stage failed.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The application's own `on_init` hook reported failure.
    #[error("{0:#}")]
    Hook(anyhow::Error),
}

/// Outcome of a [`Lifecycle::run`](crate::Lifecycle::run) that did not reach the render loop.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("application is already running")]
    AlreadyRunning,

    #[error("application initialization failed: {0}")]
    Init(InitError),

    #[error("application startup failed: {0:#}")]
    Startup(anyhow::Error),
}

impl RunError {
    /// Process exit code for this failure. Normal termination exits with 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::AlreadyRunning => 2,
            RunError::Init(_) => 3,
            RunError::Startup(_) => 4,
        }
    }
}

/// Buffer swap failed. Not fatal to the render loop.
#[derive(Debug, Error)]
#[error("failed to present frame: {0}")]
pub struct PresentError(pub String);

/// A code taken from the GL error queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlError(pub u32);

impl GlError {
    pub const INVALID_ENUM: GlError = GlError(0x0500);
    pub const INVALID_VALUE: GlError = GlError(0x0501);
    pub const INVALID_OPERATION: GlError = GlError(0x0502);
    pub const STACK_OVERFLOW: GlError = GlError(0x0503);
    pub const STACK_UNDERFLOW: GlError = GlError(0x0504);
    pub const OUT_OF_MEMORY: GlError = GlError(0x0505);
    pub const INVALID_FRAMEBUFFER_OPERATION: GlError = GlError(0x0506);
    pub const CONTEXT_LOST: GlError = GlError(0x0507);

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            GlError::INVALID_ENUM => Some("GL_INVALID_ENUM"),
            GlError::INVALID_VALUE => Some("GL_INVALID_VALUE"),
            GlError::INVALID_OPERATION => Some("GL_INVALID_OPERATION"),
            GlError::STACK_OVERFLOW => Some("GL_STACK_OVERFLOW"),
            GlError::STACK_UNDERFLOW => Some("GL_STACK_UNDERFLOW"),
            GlError::OUT_OF_MEMORY => Some("GL_OUT_OF_MEMORY"),
            GlError::INVALID_FRAMEBUFFER_OPERATION => Some("GL_INVALID_FRAMEBUFFER_OPERATION"),
            GlError::CONTEXT_LOST => Some("GL_CONTEXT_LOST"),
            _ => None,
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:04X})", name, self.0),
            None => write!(f, "unknown OpenGL error 0x{:04X}", self.0),
        }
    }
}
