//! Developer test harness: clears the window to red until it is closed.

#[macro_use] extern crate log;

use env_logger::Env;
use gl::types::GLfloat;
use glshell::{Application, GlError, Surface};

struct Harness;

impl Application for Harness {
    fn on_startup(&mut self, surface: &mut dyn Surface) -> anyhow::Result<()> {
        surface.set_title("GLShell Developer Test Harness");
        Ok(())
    }

    fn render(&mut self, _surface: &mut dyn Surface, _current_time: f64) {
        const RED: [GLfloat; 4] = [1.0, 0.0, 0.0, 1.0];

        unsafe {
            gl::ClearBufferfv(gl::COLOR, 0, RED.as_ptr());
        }
    }

    fn on_gl_error(&mut self, error: GlError) {
        error!("OpenGL Error Code: {}", error);
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    std::process::exit(glshell::run(Harness));
}
