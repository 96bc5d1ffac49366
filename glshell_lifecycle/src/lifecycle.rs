//! The run state machine: init → startup → render loop → shutdown.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::app::Application;
use crate::clock::FrameClock;
use crate::config::ApplicationConfig;
use crate::dispatch::EventDispatcher;
use crate::error::{InitError, RunError};
use crate::event::WindowEvent;
use crate::slot::{ActiveSlot, SlotClaim};
use crate::surface::{Platform, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunningState {
    NotStarted,
    Running,
    ShuttingDown,
}

/// Returned by a run that reached the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
}

/// Exit triggers observed during one loop iteration.
#[derive(Debug, Default)]
struct ExitCondition {
    escape_released: bool,
    close_requested: bool,
}

impl ExitCondition {
    fn observe(&mut self, event: &WindowEvent) {
        self.escape_released |= event.is_escape_release();
        self.close_requested |= event.is_close_request();
    }

    /// Both triggers are always evaluated.
    fn keep_running(&self, window_should_close: bool) -> bool {
        !self.escape_released & !(self.close_requested | window_should_close)
    }
}

/// Drives one application at a time on a [`Platform`].
pub struct Lifecycle<P: Platform> {
    platform: P,
    slot: Arc<ActiveSlot>,
    state: RunningState,
    dispatcher: EventDispatcher,
}

impl<P: Platform> Lifecycle<P> {
    /// Uses the process-wide slot, so a second lifecycle on an exclusive platform is refused
    /// while this one runs.
    pub fn new(platform: P) -> Self {
        Self::with_slot(platform, ActiveSlot::process())
    }

    pub fn with_slot(platform: P, slot: Arc<ActiveSlot>) -> Self {
        Self {
            platform,
            slot,
            state: RunningState::NotStarted,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn state(&self) -> RunningState {
        self.state
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Routes an event to the running application. Outside a run this does nothing and returns
    /// false.
    pub fn dispatch(&self, event: &WindowEvent) -> bool {
        self.dispatcher.dispatch(event)
    }

    /// Runs `app` until its window is closed or Escape is released.
    ///
    /// Failures before the render loop are logged and returned; the window, if one was created,
    /// is released before returning. `on_shutdown` is only called when both `on_init` and
    /// `on_startup` succeeded.
    pub fn run<A: Application + 'static>(&mut self, app: &Rc<RefCell<A>>) -> Result<RunSummary, RunError> {
        if self.state != RunningState::NotStarted {
            error!("Application is already running.");
            return Err(RunError::AlreadyRunning);
        }

        let claim = if self.platform.is_exclusive() {
            match ActiveSlot::try_claim(&self.slot) {
                Some(claim) => Some(claim),
                None => {
                    error!("Application is already running.");
                    return Err(RunError::AlreadyRunning);
                }
            }
        } else {
            None
        };

        let handle: Weak<RefCell<A>> = Rc::downgrade(app);
        let handle: Weak<RefCell<dyn Application>> = handle;
        self.state = RunningState::Running;
        self.dispatcher.activate(handle);

        let result = self.drive(app);

        self.finish(claim);
        result
    }

    fn drive<A: Application + 'static>(&mut self, app: &Rc<RefCell<A>>) -> Result<RunSummary, RunError> {
        let mut config = ApplicationConfig::default();
        app.borrow_mut().configure(&mut config);

        let mut window = match self.platform.create_window(&config) {
            Ok(window) => window,
            Err(e) => {
                error!("Application initialization failed: {}", e);
                return Err(RunError::Init(InitError::Context(e)));
            }
        };
        debug!("Created window \"{}\" ({}x{})", config.title, config.width, config.height);

        if let Err(e) = app.borrow_mut().on_init(&mut window) {
            error!("Application initialization failed: {:#}", e);
            return Err(RunError::Init(InitError::Hook(e)));
        }

        if let Err(e) = app.borrow_mut().on_startup(&mut window) {
            error!("Application startup failed: {:#}", e);
            return Err(RunError::Startup(e));
        }

        let frames = self.render_loop(app, &mut window);

        self.state = RunningState::ShuttingDown;
        self.dispatcher.clear();

        app.borrow_mut().on_shutdown(&mut window);
        drop(window);

        info!("Application exited after {} frames", frames);
        Ok(RunSummary { frames })
    }

    fn render_loop<A: Application + 'static>(&mut self, app: &Rc<RefCell<A>>, window: &mut P::Window) -> u64 {
        let mut clock = FrameClock::new();
        let mut events = Vec::new();
        let mut frames = 0u64;

        loop {
            let now = clock.read(window.elapsed());
            app.borrow_mut().render(window, now);
            frames += 1;

            if let Err(e) = window.present() {
                warn!("{}", e);
            }

            let mut exit = ExitCondition::default();
            events.clear();
            window.poll_events(&mut events);
            for event in &events {
                exit.observe(event);
                self.dispatcher.dispatch(event);
            }

            while let Some(message) = window.next_debug_message() {
                self.dispatcher.dispatch_debug(&message);
            }
            let dropped = window.dropped_debug_messages();
            if dropped > 0 {
                warn!("Discarded {} GL debug messages: queue full", dropped);
            }

            while let Some(error) = window.next_error() {
                app.borrow_mut().on_gl_error(error);
            }

            if !exit.keep_running(window.should_close()) {
                trace!("Exit requested after frame {}", frames);
                return frames;
            }
        }
    }

    fn finish(&mut self, claim: Option<SlotClaim>) {
        self.dispatcher.clear();
        self.state = RunningState::NotStarted;
        drop(claim);
    }
}
