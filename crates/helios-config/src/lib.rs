//! Configuration for the Helios orrery.
//!
//! Settings are read from an optional RON file, then overridden from the
//! command line. Every section tolerates missing or unknown fields so old
//! files keep loading as the configuration grows.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AssetConfig, Config, DebugConfig, SceneConfig, WindowConfig};
pub use error::ConfigError;
