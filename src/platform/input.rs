//! Translation of glutin window events into lifecycle events.

use std::collections::HashSet;

use glutin::dpi::{PhysicalPosition, PhysicalSize};
use glutin::event::{
    ElementState, ModifiersState, MouseButton as GlutinButton, MouseScrollDelta, VirtualKeyCode,
    WindowEvent as GlutinEvent,
};
use lifecycle::{Action, Key, Modifiers, MouseButton, WindowEvent};

pub fn key_from(code: Option<VirtualKeyCode>) -> Key {
    match code {
        Some(VirtualKeyCode::Escape) => Key::Escape,
        Some(code) => Key::Code(code as u32),
        None => Key::Unknown,
    }
}

pub fn modifiers_from(state: ModifiersState) -> Modifiers {
    let mut mods = Modifiers::NONE;
    mods.set(Modifiers::SHIFT, state.shift());
    mods.set(Modifiers::CONTROL, state.ctrl());
    mods.set(Modifiers::ALT, state.alt());
    mods.set(Modifiers::SUPER, state.logo());
    mods
}

pub fn button_from(button: GlutinButton) -> MouseButton {
    match button {
        GlutinButton::Left => MouseButton::Left,
        GlutinButton::Right => MouseButton::Right,
        GlutinButton::Middle => MouseButton::Middle,
        GlutinButton::Other(n) => MouseButton::Other(n),
    }
}

pub fn action_from(state: ElementState) -> Action {
    match state {
        ElementState::Pressed => Action::Press,
        ElementState::Released => Action::Release,
    }
}

/// Converts a physical size to whole screen-coordinate units.
pub fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let size = size.to_logical::<f64>(scale_factor);
    (size.width.round() as u32, size.height.round() as u32)
}

fn logical_position(position: PhysicalPosition<f64>, scale_factor: f64) -> (f64, f64) {
    let position = position.to_logical::<f64>(scale_factor);
    (position.x, position.y)
}

/// Keyboard state carried between polls: current modifiers and which keys are held.
#[derive(Debug, Default)]
pub struct InputState {
    modifiers: Modifiers,
    held: HashSet<u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// A press of a key that is already down is reported as a repeat.
    pub fn key_action(&mut self, scancode: u32, state: ElementState) -> Action {
        match state {
            ElementState::Pressed if !self.held.insert(scancode) => Action::Repeat,
            ElementState::Pressed => Action::Press,
            ElementState::Released => {
                self.held.remove(&scancode);
                Action::Release
            }
        }
    }

    /// Returns `None` for events the lifecycle has no hook for. Those still update the
    /// translation state where relevant.
    pub fn translate(&mut self, event: &GlutinEvent<'_>, scale_factor: f64) -> Option<WindowEvent> {
        match event {
            GlutinEvent::Resized(size) => {
                let (width, height) = logical_size(*size, scale_factor);
                Some(WindowEvent::Resized { width, height })
            }
            GlutinEvent::Focused(focused) => {
                if !focused {
                    self.held.clear();
                }
                Some(WindowEvent::Focused(*focused))
            }
            GlutinEvent::CloseRequested => Some(WindowEvent::CloseRequested),
            GlutinEvent::ModifiersChanged(state) => {
                self.modifiers = modifiers_from(*state);
                None
            }
            GlutinEvent::KeyboardInput { input, .. } => Some(WindowEvent::Key {
                key: key_from(input.virtual_keycode),
                scancode: input.scancode,
                action: self.key_action(input.scancode, input.state),
                mods: self.modifiers,
            }),
            GlutinEvent::MouseInput { state, button, .. } => Some(WindowEvent::MouseButton {
                button: button_from(*button),
                action: action_from(*state),
                mods: self.modifiers,
            }),
            GlutinEvent::CursorMoved { position, .. } => {
                let (x, y) = logical_position(*position, scale_factor);
                Some(WindowEvent::CursorMoved { x, y })
            }
            GlutinEvent::MouseWheel { delta, .. } => {
                let (x, y) = match *delta {
                    MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
                    MouseScrollDelta::PixelDelta(position) => logical_position(position, scale_factor),
                };
                Some(WindowEvent::Scroll { x, y })
            }
            _ => None,
        }
    }
}
