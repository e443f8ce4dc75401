//! Redraw handling.
//!
//! The event loop runs in `ControlFlow::Poll`; each redraw renders one tick
//! and immediately asks for the next.

use tracing::error;

use crate::app::App;

impl App {
    /// Renders one frame and requests the next.
    ///
    /// Frame errors are logged and the loop keeps going; a lost surface has
    /// already been reconfigured by the renderer.
    pub fn handle_redraw(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if let Err(err) = state.redraw() {
            error!(error = %err, "failed to render frame");
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
