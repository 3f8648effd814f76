//! WireGrid Settings Crate
//!
//! Handles editor configuration: grid metrics, routing cost model, node
//! design metrics and logging preferences.

pub mod config;
pub mod error;

pub use config::{Config, GridSettings, LoggingSettings, NodeDesign, RoutingSettings};
pub use error::{SettingsError, SettingsResult};
