use std::cell::RefCell;
use std::any::Any;
use std::ffi::c_void;
use std::panic::{self, UnwindSafe};
use std::rc::Rc;
use std::time::Instant;

use glutin::dpi::LogicalSize;
use glutin::event::{Event, WindowEvent as GlutinEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;
use glutin::window::{Fullscreen, WindowBuilder};
use glutin::{Api, ContextBuilder, CreationError, GlProfile, GlRequest, PossiblyCurrent, Robustness, WindowedContext};
use lifecycle::debug::{self, DebugReceiver};
use lifecycle::{
    ApplicationConfig, ContextError, DebugMessage, GlError, Platform, PresentError, Surface, Window, WindowEvent,
};

use super::debug_output::DebugHook;
use super::input::{logical_size, InputState};
use crate::graphics::ContextInfo;

type SharedLoop = Rc<RefCell<Option<EventLoop<()>>>>;

/// Entry points the shell and the shader helpers call. If any of these is missing the function
/// table is unusable.
const REQUIRED_FUNCTIONS: &[(&str, fn() -> bool)] = &[
    ("glGetError", gl::GetError::is_loaded),
    ("glGetIntegerv", gl::GetIntegerv::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
    ("glGetStringi", gl::GetStringi::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
    ("glClearBufferfv", gl::ClearBufferfv::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
];

/// Creates glutin windows with OpenGL core-profile contexts.
///
/// The event loop is created with the first window and handed back when that window is dropped,
/// so later runs reuse it.
pub struct GlutinPlatform {
    event_loop: SharedLoop,
    started: Instant,
}

impl GlutinPlatform {
    pub fn new() -> Self {
        Self {
            event_loop: Rc::new(RefCell::new(None)),
            started: Instant::now(),
        }
    }
}

impl Default for GlutinPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for GlutinPlatform {
    type Window = GlutinWindow;

    fn create_window(&mut self, config: &ApplicationConfig) -> Result<GlutinWindow, ContextError> {
        config.validate()?;

        let reused = self.event_loop.borrow_mut().take();
        let event_loop = match reused {
            Some(event_loop) => event_loop,
            None => catch_platform(EventLoop::new)?,
        };

        let (context, info) = match build_context(config, &event_loop).and_then(|c| load_functions(c, config)) {
            Ok(parts) => parts,
            Err(e) => {
                *self.event_loop.borrow_mut() = Some(event_loop);
                return Err(e);
            }
        };

        if config.flags.debug {
            info.log();
        }

        let debug = if config.flags.debug && gl::DebugMessageCallback::is_loaded() {
            let (sender, receiver) = debug::channel(debug::DEFAULT_CAPACITY);
            Some((unsafe { DebugHook::install(sender) }, receiver))
        } else {
            if config.flags.debug {
                warn!("Debug context requested but glDebugMessageCallback is unavailable");
            }
            None
        };

        let window = context.window();
        let size = logical_size(window.inner_size(), window.scale_factor());

        Ok(GlutinWindow {
            debug,
            context,
            event_loop: Some(event_loop),
            home: Rc::clone(&self.event_loop),
            config: config.clone(),
            info,
            title: config.title.clone(),
            size,
            cursor: (0.0, 0.0),
            input: InputState::new(),
            started: self.started,
            destroyed: false,
        })
    }
}

/// winit panics when no display backend can be opened. Turns that panic into an error.
fn catch_platform<T, F: FnOnce() -> T + UnwindSafe>(f: F) -> Result<T, ContextError> {
    panic::catch_unwind(f).map_err(|payload| ContextError::Platform(panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        String::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown windowing system failure")
    }
}

fn creation_error(error: CreationError, config: &ApplicationConfig) -> ContextError {
    match error {
        CreationError::OpenGlVersionNotSupported => ContextError::UnsupportedVersion {
            major: config.major_version,
            minor: config.minor_version,
        },
        other => ContextError::ContextCreation(other.to_string()),
    }
}

fn build_context(
    config: &ApplicationConfig,
    event_loop: &EventLoop<()>,
) -> Result<WindowedContext<PossiblyCurrent>, ContextError> {
    let mut window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(f64::from(config.width), f64::from(config.height)));

    if config.flags.fullscreen {
        window = window.with_fullscreen(Some(Fullscreen::Borderless(event_loop.primary_monitor())));
    }

    let mut builder = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, config.version()))
        .with_gl_profile(GlProfile::Core)
        .with_gl_debug_flag(config.flags.debug)
        .with_double_buffer(Some(true))
        .with_multisampling(config.samples)
        .with_vsync(config.flags.vsync);

    if config.flags.robust {
        builder = builder.with_gl_robustness(Robustness::RobustLoseContextOnReset);
    }

    if config.flags.stereo {
        builder = builder.with_stereoscopy();
    }

    let context = builder
        .build_windowed(window, event_loop)
        .map_err(|e| creation_error(e, config))?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, e)| ContextError::ContextCreation(e.to_string()))?;

    if !config.flags.cursor {
        context.window().set_cursor_visible(false);
    }

    Ok(context)
}

fn load_functions(
    context: WindowedContext<PossiblyCurrent>,
    config: &ApplicationConfig,
) -> Result<(WindowedContext<PossiblyCurrent>, ContextInfo), ContextError> {
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

    if let Some((name, _)) = REQUIRED_FUNCTIONS.iter().find(|(_, loaded)| !loaded()) {
        return Err(ContextError::FunctionLoad(String::from(*name)));
    }

    let info = ContextInfo::query();
    if !info.supports(config.version()) {
        error!(
            "OpenGL {}.{} not supported (context reports {}.{})",
            config.major_version, config.minor_version, info.major, info.minor
        );
        return Err(ContextError::UnsupportedVersion {
            major: config.major_version,
            minor: config.minor_version,
        });
    }

    Ok((context, info))
}

/// A glutin window with a current OpenGL context.
pub struct GlutinWindow {
    // Declared before `context` so the callback is detached while the context still exists.
    debug: Option<(DebugHook, DebugReceiver)>,
    context: WindowedContext<PossiblyCurrent>,
    event_loop: Option<EventLoop<()>>,
    home: SharedLoop,
    config: ApplicationConfig,
    info: ContextInfo,
    title: String,
    size: (u32, u32),
    cursor: (f64, f64),
    input: InputState,
    started: Instant,
    destroyed: bool,
}

impl GlutinWindow {
    pub fn info(&self) -> &ContextInfo {
        &self.info
    }
}

impl Surface for GlutinWindow {
    fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.context.window().set_title(title);
        self.title = title.to_owned();
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn cursor_position(&self) -> (i32, i32) {
        (self.cursor.0.floor() as i32, self.cursor.1.floor() as i32)
    }

    fn is_extension_supported(&self, name: &str) -> bool {
        self.info.has_extension(name)
    }

    fn proc_address(&self, name: &str) -> *const c_void {
        self.context.get_proc_address(name) as *const c_void
    }
}

impl Window for GlutinWindow {
    fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn present(&mut self) -> Result<(), PresentError> {
        self.context
            .swap_buffers()
            .map_err(|e| PresentError(e.to_string()))
    }

    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) {
        let GlutinWindow { event_loop, context, input, size, cursor, destroyed, .. } = self;

        let event_loop = match event_loop.as_mut() {
            Some(event_loop) => event_loop,
            None => return,
        };
        let mut scale_factor = context.window().scale_factor();

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => {
                    match &event {
                        GlutinEvent::Resized(physical) => context.resize(*physical),
                        GlutinEvent::ScaleFactorChanged { scale_factor: factor, .. } => scale_factor = *factor,
                        GlutinEvent::Destroyed => *destroyed = true,
                        _ => {}
                    }

                    if let Some(translated) = input.translate(&event, scale_factor) {
                        match translated {
                            WindowEvent::Resized { width, height } => *size = (width, height),
                            WindowEvent::CursorMoved { x, y } => *cursor = (x, y),
                            _ => {}
                        }
                        events.push(translated);
                    }
                }
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });
    }

    fn next_error(&mut self) -> Option<GlError> {
        match unsafe { gl::GetError() } {
            gl::NO_ERROR => None,
            code => Some(GlError(code)),
        }
    }

    fn next_debug_message(&mut self) -> Option<DebugMessage> {
        self.debug.as_ref().and_then(|(_, receiver)| receiver.try_next())
    }

    fn dropped_debug_messages(&mut self) -> usize {
        self.debug.as_ref().map_or(0, |(_, receiver)| receiver.take_dropped())
    }

    fn should_close(&self) -> bool {
        self.destroyed
    }
}

impl Drop for GlutinWindow {
    fn drop(&mut self) {
        if let Some(event_loop) = self.event_loop.take() {
            *self.home.borrow_mut() = Some(event_loop);
        }
        debug!("Destroying window \"{}\"", self.title);
    }
}
