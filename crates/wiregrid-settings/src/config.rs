//! Configuration management for WireGrid
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (cell size)
//! - Routing cost model (cell costs, penalties, search budget)
//! - Node design metrics (pin geometry, hit tolerances)
//! - Logging preferences

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use wiregrid_core::constants;

/// Directory name under the platform config dir.
const APP_DIR: &str = "wiregrid";
/// File name of the default config.
const CONFIG_FILE: &str = "config.toml";

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Side length of one cell in world units
    pub cell_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: constants::DEFAULT_CELL_SIZE,
        }
    }
}

/// Routing cost model and search limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Cost of entering any walkable cell
    pub base_cost: u32,
    /// Added once when any orthogonal neighbour is blocked
    pub adjacency_penalty: u32,
    /// Added when the cell is shared with another wire
    pub crossing_penalty: u32,
    /// Added on every change of direction
    pub turn_penalty: u32,
    /// Expansion budget per search
    pub max_iterations: usize,
    /// Manhattan heuristic inflation
    pub heuristic_weight: f64,
    /// Reject input-to-input and output-to-output connections
    pub enforce_pin_roles: bool,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            base_cost: constants::BASE_CELL_COST,
            adjacency_penalty: constants::ADJACENCY_PENALTY,
            crossing_penalty: constants::CROSSING_PENALTY,
            turn_penalty: constants::TURN_PENALTY,
            max_iterations: constants::MAX_ROUTE_ITERATIONS,
            heuristic_weight: constants::HEURISTIC_WEIGHT,
            enforce_pin_roles: false,
        }
    }
}

/// Node drawing and hit-test metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDesign {
    /// Pin extent along the node edge
    pub pin_width: f64,
    /// Pin extent perpendicular to the node edge
    pub pin_length: f64,
    /// Gap between the body and its selection bounds
    pub margin: f64,
    pub corner_radius: f64,
    pub label_offset: f64,
    /// Band inside the body edge that is tested for pins instead of the body
    pub hit_tolerance: f64,
    /// Rendered wire stroke width
    pub wire_hit_width: f64,
}

impl NodeDesign {
    /// Metrics scaled to a cell size.
    pub fn for_cell_size(cell_size: f64) -> Self {
        Self {
            pin_width: cell_size / 2.0,
            margin: cell_size / 4.0,
            ..Self::fixed()
        }
    }

    fn fixed() -> Self {
        Self {
            pin_width: constants::DEFAULT_CELL_SIZE / 2.0,
            pin_length: 10.0,
            margin: constants::DEFAULT_CELL_SIZE / 4.0,
            corner_radius: 8.0,
            label_offset: 22.0,
            hit_tolerance: 20.0,
            wire_hit_width: constants::WIRE_STROKE_WIDTH,
        }
    }
}

impl Default for NodeDesign {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
    /// Emit JSON lines instead of pretty output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
    pub routing: RoutingSettings,
    pub node_design: NodeDesign,
    pub logging: LoggingSettings,
}

/// Supported on-disk formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Config whose node design is scaled to `cell_size`.
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self {
            grid: GridSettings { cell_size },
            node_design: NodeDesign::for_cell_size(cell_size),
            ..Self::default()
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.grid.cell_size.is_finite() && self.grid.cell_size > 0.0) {
            return Err(SettingsError::invalid("grid.cell_size", "must be > 0"));
        }

        if self.routing.base_cost == 0 {
            return Err(SettingsError::invalid("routing.base_cost", "must be > 0"));
        }

        if self.routing.max_iterations == 0 {
            return Err(SettingsError::invalid(
                "routing.max_iterations",
                "must be > 0",
            ));
        }

        if !(self.routing.heuristic_weight.is_finite() && self.routing.heuristic_weight >= 1.0) {
            return Err(SettingsError::invalid(
                "routing.heuristic_weight",
                "must be >= 1.0",
            ));
        }

        let design = &self.node_design;
        if design.pin_width <= 0.0 || design.pin_length <= 0.0 {
            return Err(SettingsError::invalid(
                "node_design.pin_width",
                "pin dimensions must be > 0",
            ));
        }

        if design.margin < 0.0 || design.hit_tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "node_design.margin",
                "margin and hit tolerance must be >= 0",
            ));
        }

        if design.wire_hit_width <= 0.0 {
            return Err(SettingsError::invalid(
                "node_design.wire_hit_width",
                "must be > 0",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }

    /// Platform config path, e.g. `~/.config/wiregrid/config.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config at `path`, or the platform default path when `None`.
    ///
    /// A missing file yields the defaults. A file that exists but fails to
    /// parse or validate is reported and the defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(e) => {
                    warn!("{}", e);
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
