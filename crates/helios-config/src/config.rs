//! Configuration structs with sensible defaults and RON loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside a config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window / frame pacing settings.
    pub window: WindowConfig,
    /// Initial scene parameters and build-time scene settings.
    pub scene: SceneConfig,
    /// Asset lookup settings.
    pub assets: AssetConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Display refresh rate the host loop paces itself to.
    pub target_fps: u32,
}

/// Initial values for every live parameter, plus settings that only matter
/// while the scene is being built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Background color as `#rrggbb`.
    pub background: String,
    pub show_orbits: bool,
    pub show_stars: bool,
    pub show_axes: bool,
    pub show_saturn_rings: bool,
    pub show_planet_labels: bool,
    pub show_atmosphere: bool,
    /// Build-time only: when false no moon entity is ever allocated.
    pub show_moon: bool,
    pub show_sun_effects: bool,
    /// Planet radius multiplier, `[0.1, 3]`.
    pub planet_scale: f32,
    /// Sun radius multiplier, `[0.5, 3]`.
    pub sun_scale: f32,
    /// Glow/corona opacity multiplier, `[0, 1]`.
    pub sun_glow_intensity: f32,
    /// Global time-scale multiplier, `[0, 3]`.
    pub animation_speed: f32,
    pub camera_auto_rotate: bool,
    pub camera_auto_rotate_speed: f32,
    pub cinematic_mode: bool,
    /// Start with orbital motion paused.
    pub paused: bool,
    /// Number of background stars.
    pub star_count: u32,
    /// Edge length of the cube the stars are scattered in.
    pub star_spread: f32,
    /// Seed for initial orbital angles and star placement. `None` draws from entropy.
    pub seed: Option<u64>,
}

/// Asset lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that `/name.jpg` style paths are resolved against.
    pub root: PathBuf,
    /// Loader threads. `Some(0)` resolves on the requesting thread, `None`
    /// sizes the pool from the CPU count.
    pub worker_count: Option<usize>,
    /// Primary typeface path for labels and the title text.
    pub font_path: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a frame summary every N frames (0 disables).
    pub stats_interval: u32,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Helios Solar System".to_string(),
            target_fps: 60,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: "#000011".to_string(),
            show_orbits: true,
            show_stars: true,
            show_axes: false,
            show_saturn_rings: true,
            show_planet_labels: true,
            show_atmosphere: true,
            show_moon: true,
            show_sun_effects: true,
            planet_scale: 1.0,
            sun_scale: 1.0,
            sun_glow_intensity: 1.0,
            animation_speed: 0.3,
            camera_auto_rotate: false,
            camera_auto_rotate_speed: 2.0,
            cinematic_mode: false,
            paused: false,
            star_count: 1000,
            star_spread: 200.0,
            seed: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            worker_count: None,
            font_path: "/fonts/helvetiker_regular.typeface.json".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            stats_interval: 300,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load `config.ron` from the given directory, falling back to defaults
    /// when the file does not exist. Nothing is written.
    pub fn load_or_default(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            log::info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(Config::default())
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::info!("Wrote config to {}", config_path.display());
        Ok(())
    }
}
