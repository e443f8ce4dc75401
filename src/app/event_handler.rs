//! Event handler module.
//!
//! Contains the App struct and its event handling logic.

use std::sync::Arc;

use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::app::app_state::AppState;
use crate::config::Config;
use crate::error::SetupError;
use crate::game::keys::{LogicalButton, winit_key_to_button};
use crate::renderer::wgpu_lib::WgpuRenderer;

/// Main application struct that manages the window lifecycle and event handling.
///
/// This struct implements the [`ApplicationHandler`] trait to handle all window events.
/// It manages the WGPU instance, application state, and window lifecycle.
///
/// # Lifecycle
/// 1. Created with `App::new()` - initializes WGPU instance
/// 2. `resumed` creates the window, the surface and the application state
/// 3. Events are handled via `ApplicationHandler` trait methods
/// 4. Application runs until the window is closed or quit is pressed
///
/// A setup failure exits the event loop; retrieve it with [`App::take_error`].
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// Command line options.
    pub config: Config,
    /// The current application state, None until initialized.
    pub state: Option<AppState>,
    /// The application window, None until created.
    pub window: Option<Arc<Window>>,
    error: Option<SetupError>,
}

impl App {
    /// Creates a new [`App`] instance with default WGPU configuration.
    pub fn new(config: Config) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            config,
            state: None,
            window: None,
            error: None,
        }
    }

    /// The setup error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<SetupError> {
        self.error.take()
    }

    /// Asynchronously sets up the surface and initializes all application state.
    ///
    /// # Initialization Steps
    /// 1. Creates WGPU surface from the window
    /// 2. Initializes the renderer at the window's inner size
    /// 3. Builds [`AppState`] with the scene and game state
    pub async fn set_window(&mut self, window: Window) -> Result<(), SetupError> {
        let window = Arc::new(window);
        let size = window.inner_size();

        let surface = self.instance.create_surface(window.clone())?;
        let renderer =
            WgpuRenderer::new(&self.instance, surface, size.width, size.height).await?;
        let state = AppState::new(renderer, &self.config, size.width, size.height)?;

        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    /// Handles window resize events and updates all rendering systems.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        let Some(state) = self.state.as_mut() else {
            debug!(width, height, "resize before initialisation");
            return;
        };
        state.resize(width, height);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(button) = winit_key_to_button(&event.logical_key) else {
            return;
        };

        match event.state {
            ElementState::Pressed if button == LogicalButton::Quit => {
                info!("quit requested");
                event_loop.exit();
            }
            ElementState::Pressed => state.key_state.press(button),
            ElementState::Released => state.key_state.release(button),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SetupError) {
        error!(error = %err, "setup failed");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    /// Creates the window and application state on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("mazewalk")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err.into()),
        };

        if let Err(err) = pollster::block_on(self.set_window(window)) {
            return self.fail(event_loop, err);
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Handles window events including input, resize, and close requests.
    ///
    /// # Event Types Handled
    /// - **CloseRequested**: Initiates application shutdown
    /// - **Resized**: Calls `handle_resized()` to update rendering
    /// - **KeyboardInput**: Updates the held buttons, or quits
    /// - **Focused(false)**: Releases every button
    /// - **RedrawRequested**: Runs a tick and renders it
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.handle_resized(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Focused(false) => {
                if let Some(state) = self.state.as_mut() {
                    state.key_state.clear();
                }
            }
            WindowEvent::RedrawRequested => self.handle_redraw(),
            _ => {}
        }
    }
}
