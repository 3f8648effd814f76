//! # WireGrid
//!
//! A grid-based diagram editor core: typed nodes with directional pins,
//! connected by orthogonal wires that route themselves around obstacles.
//!
//! ## Architecture
//!
//! WireGrid is organized as a workspace with multiple crates:
//!
//! 1. **wiregrid-core** - Geometry, ids, pointer events, error types
//! 2. **wiregrid-settings** - Grid, routing, node design and logging configuration
//! 3. **wiregrid-designer** - Occupancy index, router, wires, scene, tools, rendering
//! 4. **wiregrid** - Logging setup and a headless demo binary
//!
//! ## Features
//!
//! - **Automatic Routing**: turn-penalised search that avoids nodes and discourages crossings
//! - **Interactive Editing**: rubber-band selection, group drag, click-to-wire with waypoints
//! - **Headless Output**: serialisable render list and SVG export

pub use wiregrid_designer as designer;
pub use wiregrid_settings as settings;

pub use wiregrid_core::{
    Bounds, ConnectError, Direction, Error, GridCell, Hit, MouseButton, NodeId, Point,
    PointerEvent, PointerEventKind, PointerTracker, Result, SceneError, WireId,
};

pub use wiregrid_designer::{
    render_svg, DrawCommand, DrawList, Editor, NodeConfig, NodeKind, PinRole, PinSide, Scene,
    ToolKind, ToolSignal, Wire, WireRouter, WireState,
};

pub use wiregrid_settings::{Config, LoggingSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("WIREGRID_BUILD_DATE");

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to `settings.level`
/// - Console output with pretty formatting, or JSON lines when `settings.json` is set
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
