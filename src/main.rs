//! mazewalk binary.
//!
//! Parses the command line, installs the tracing subscriber and runs the winit event loop
//! until the window closes. Setup failures are returned from `main`.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use mazewalk::app::App;
use mazewalk::config::Config;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)),
        )
        .init();

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("running event loop")?;

    if let Some(err) = app.take_error() {
        return Err(err).context("initialisation failed");
    }
    Ok(())
}
