//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it owns the
//! window, the frame clock, and the raw input state, and drives
//! [`SimState`](crate::sim::SimState) from `RedrawRequested`.

use std::sync::Arc;

use tracing::info;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};
use wyvern_config::Config;
use wyvern_input::{CursorMode, KeyState, PointerState};

use crate::game_loop::FrameClock;
use crate::sim::SimState;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    attrs
}

/// Application state that manages the window and feeds the simulation.
pub struct AppState {
    /// The window handle, created on `resumed`.
    pub window: Option<Arc<Window>>,
    /// Fixed-timestep frame clock.
    pub clock: FrameClock,
    /// Loaded configuration.
    pub config: Config,
    /// Frame-coherent key state.
    pub keys: KeyState,
    /// Frame-coherent pointer state.
    pub pointer: PointerState,
    /// The simulation itself.
    pub sim: SimState,
}

impl AppState {
    /// Creates a new `AppState` from a [`Config`].
    pub fn with_config(config: Config) -> Self {
        let sim = SimState::from_config(&config);
        Self {
            window: None,
            clock: FrameClock::new(),
            config,
            keys: KeyState::new(),
            pointer: PointerState::new(),
            sim,
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = window_attributes_from_config(&self.config);
            let window = event_loop
                .create_window(attrs)
                .expect("Failed to create window");
            let window = Arc::new(window);

            // The session starts in mouse-look mode.
            self.pointer.set_mode(&window, CursorMode::Captured);
            info!(
                "Window created: {}x{}, pointer captured",
                self.config.window.width, self.config.window.height
            );

            window.request_redraw();
            self.window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keys.on_key_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::RedrawRequested => {
                let sim = &mut self.sim;
                let keys = &self.keys;
                let pointer = &mut self.pointer;
                let mut release_pointer = false;
                let mut quit = false;

                self.clock.tick(
                    |dt, _sim_time| {
                        let outcome = sim.tick(keys, pointer, dt as f32);
                        release_pointer |= outcome.release_pointer;
                        quit |= outcome.quit;
                    },
                    |_alpha| {},
                );

                if release_pointer
                    && let Some(window) = &self.window
                {
                    info!("Pointer released");
                    self.pointer.set_mode(window, CursorMode::Free);
                }
                if quit {
                    info!("Quit requested");
                    event_loop.exit();
                    return;
                }

                self.keys.clear_transients();
                self.pointer.clear_transients();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.pointer.on_raw_motion(dx, dy);
        }
    }
}

/// Build the event loop and run the application until it exits.
pub fn run(config: Config) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = AppState::with_config(config);
    event_loop.run_app(&mut app)
}
