//! Scripted platform and recording application for headless lifecycle tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use crate::app::Application;
use crate::config::ApplicationConfig;
use crate::debug::DebugMessage;
use crate::error::{ContextError, GlError, PresentError};
use crate::event::{Action, Key, Modifiers, MouseButton, WindowEvent};
use crate::surface::{Platform, Surface, Window};

/// What the mock window does on one poll.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub events: Vec<WindowEvent>,
    pub errors: Vec<GlError>,
    pub debug: Vec<DebugMessage>,
    pub should_close: bool,
    pub elapsed: Option<f64>,
}

impl Frame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<WindowEvent>) -> Self {
        Self { events, ..Self::default() }
    }

    pub fn close() -> Self {
        Self::with_events(vec![WindowEvent::CloseRequested])
    }
}

/// Shared log of what happened to the platform's windows.
#[derive(Debug, Default)]
pub struct Journal {
    pub created: usize,
    pub destroyed: usize,
    pub steps: Vec<&'static str>,
    pub titles: Vec<String>,
}

pub enum CreateFailure {
    Creation,
    Version,
}

pub struct MockPlatform {
    pub journal: Rc<RefCell<Journal>>,
    frames: Vec<Frame>,
    fail: Option<CreateFailure>,
    exclusive: bool,
}

impl MockPlatform {
    /// Each poll consumes one frame. Once the script runs out the window reports that it should
    /// close so a broken test cannot spin forever.
    pub fn scripted(frames: Vec<Frame>) -> Self {
        Self {
            journal: Rc::new(RefCell::new(Journal::default())),
            frames,
            fail: None,
            exclusive: false,
        }
    }

    pub fn failing(failure: CreateFailure) -> Self {
        Self { fail: Some(failure), ..Self::scripted(Vec::new()) }
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;

    fn create_window(&mut self, config: &ApplicationConfig) -> Result<MockWindow, ContextError> {
        config.validate()?;

        match self.fail {
            Some(CreateFailure::Creation) => {
                return Err(ContextError::ContextCreation(String::from("no display")));
            }
            Some(CreateFailure::Version) => {
                return Err(ContextError::UnsupportedVersion {
                    major: config.major_version,
                    minor: config.minor_version,
                });
            }
            None => {}
        }

        self.journal.borrow_mut().created += 1;

        Ok(MockWindow {
            journal: Rc::clone(&self.journal),
            config: config.clone(),
            title: config.title.clone(),
            frames: self.frames.drain(..).collect(),
            errors: VecDeque::new(),
            debug: VecDeque::new(),
            elapsed: 0.0,
            closed: false,
        })
    }

    fn is_exclusive(&self) -> bool {
        self.exclusive
    }
}

pub struct MockWindow {
    journal: Rc<RefCell<Journal>>,
    config: ApplicationConfig,
    title: String,
    frames: VecDeque<Frame>,
    errors: VecDeque<GlError>,
    debug: VecDeque<DebugMessage>,
    elapsed: f64,
    closed: bool,
}

impl Surface for MockWindow {
    fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
        self.journal.borrow_mut().titles.push(title.to_owned());
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn cursor_position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn is_extension_supported(&self, name: &str) -> bool {
        name == "GL_KHR_debug"
    }

    fn proc_address(&self, _name: &str) -> *const c_void {
        ptr::null()
    }
}

impl Window for MockWindow {
    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn present(&mut self) -> Result<(), PresentError> {
        self.journal.borrow_mut().steps.push("present");
        Ok(())
    }

    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) {
        self.journal.borrow_mut().steps.push("poll");

        match self.frames.pop_front() {
            Some(frame) => {
                events.extend(frame.events);
                self.errors.extend(frame.errors);
                self.debug.extend(frame.debug);
                self.closed |= frame.should_close;
                if let Some(elapsed) = frame.elapsed {
                    self.elapsed = elapsed;
                }
            }
            None => self.closed = true,
        }
    }

    fn next_error(&mut self) -> Option<GlError> {
        self.errors.pop_front()
    }

    fn next_debug_message(&mut self) -> Option<DebugMessage> {
        self.debug.pop_front()
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        let mut journal = self.journal.borrow_mut();
        journal.destroyed += 1;
        journal.steps.push("destroy");
    }
}

/// Application that records every hook call as a string.
#[derive(Default)]
pub struct RecordingApp {
    pub calls: Vec<String>,
    pub renders: usize,
    pub times: Vec<f64>,
    pub errors: Vec<GlError>,
    pub debug: Vec<DebugMessage>,
    pub fail_init: bool,
    pub fail_startup: bool,
    pub startup_title: Option<String>,
}

impl RecordingApp {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }
}

impl Application for RecordingApp {
    fn configure(&mut self, config: &mut ApplicationConfig) {
        self.calls.push(String::from("configure"));
        config.title = String::from("recording");
    }

    fn on_init(&mut self, _surface: &mut dyn Surface) -> anyhow::Result<()> {
        self.calls.push(String::from("init"));
        if self.fail_init {
            anyhow::bail!("init refused");
        }
        Ok(())
    }

    fn on_startup(&mut self, surface: &mut dyn Surface) -> anyhow::Result<()> {
        self.calls.push(String::from("startup"));
        if self.fail_startup {
            anyhow::bail!("startup refused");
        }
        if let Some(title) = &self.startup_title {
            surface.set_title(title);
        }
        Ok(())
    }

    fn render(&mut self, _surface: &mut dyn Surface, current_time: f64) {
        self.calls.push(String::from("render"));
        self.renders += 1;
        self.times.push(current_time);
    }

    fn on_shutdown(&mut self, _surface: &mut dyn Surface) {
        self.calls.push(String::from("shutdown"));
    }

    fn on_gl_error(&mut self, error: GlError) {
        self.errors.push(error);
    }

    fn on_debug_message(&mut self, message: &DebugMessage) {
        self.debug.push(message.clone());
    }

    fn on_window_resized(&mut self, width: u32, height: u32) {
        self.calls.push(format!("resized {}x{}", width, height));
    }

    fn on_window_focused(&mut self, focused: bool) {
        self.calls.push(format!("focused {}", focused));
    }

    fn on_window_closed(&mut self) {
        self.calls.push(String::from("closed"));
    }

    fn on_key(&mut self, key: Key, scancode: u32, action: Action, mods: Modifiers) {
        self.calls.push(format!("key {:?} {} {:?} {}", key, scancode, action, mods.bits()));
    }

    fn on_mouse_button(&mut self, button: MouseButton, action: Action, mods: Modifiers) {
        self.calls.push(format!("mouse {:?} {:?} {}", button, action, mods.bits()));
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.calls.push(format!("cursor {} {}", x, y));
    }

    fn on_scroll(&mut self, x_offset: f64, y_offset: f64) {
        self.calls.push(format!("scroll {} {}", x_offset, y_offset));
    }
}
