//! Game configuration.
//!
//! Manages window and loop settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 600
//! height = 600
//! scale = 1.0
//! title = Game
//! target_fps = 0
//! vsync = false
//! filter = nearest
//!
//! [engine]
//! fixed_update_interval = 10
//! debug = false
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::rendertarget::RenderFilter;
use crate::resources::worldtime::DEFAULT_FIXED_UPDATE_INTERVAL_MS;

/// Default safe values for startup
const DEFAULT_WIDTH: u32 = 600;
const DEFAULT_HEIGHT: u32 = 600;
const DEFAULT_SCALE: f32 = 1.0;
const DEFAULT_TITLE: &str = "Game";
const DEFAULT_TARGET_FPS: u32 = 0;
const DEFAULT_VSYNC: bool = false;
const DEFAULT_DEBUG: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration.
///
/// `width`/`height` are the canvas size in game pixels; the window is
/// `scale` times bigger.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Window pixels per canvas pixel.
    pub scale: f32,
    pub title: String,
    /// Frame cap; 0 leaves the loop uncapped.
    pub target_fps: u32,
    pub vsync: bool,
    /// Filtering used when the canvas is stretched over the window.
    pub filter: RenderFilter,
    /// Milliseconds between fixed updates.
    pub fixed_update_interval: f64,
    /// Start with the debug overlay on.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            title: DEFAULT_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            filter: RenderFilter::default(),
            fixed_update_interval: DEFAULT_FIXED_UPDATE_INTERVAL_MS,
            debug: DEFAULT_DEBUG,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} canvas at scale {}, fps={}, vsync={}, fixed step {}ms",
            self.width,
            self.height,
            self.scale,
            self.target_fps,
            self.vsync,
            self.fixed_update_interval
        );

        Ok(())
    }

    /// Load configuration from INI text, as [`GameConfig::load_from_file`] does.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.height = height as u32;
        }
        if let Some(scale) = config.getfloat("window", "scale").ok().flatten() {
            if scale > 0.0 {
                self.scale = scale as f32;
            }
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(filter) = config.get("window", "filter") {
            match filter.parse() {
                Ok(filter) => self.filter = filter,
                Err(e) => log::warn!("{}; keeping {}", e, self.filter),
            }
        }

        // [engine] section
        if let Some(interval) = config
            .getfloat("engine", "fixed_update_interval")
            .ok()
            .flatten()
        {
            if interval > 0.0 {
                self.fixed_update_interval = interval;
            }
        }
        if let Some(debug) = config.getbool("engine", "debug").ok().flatten() {
            self.debug = debug;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.width.to_string()));
        config.set("window", "height", Some(self.height.to_string()));
        config.set("window", "scale", Some(self.scale.to_string()));
        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "filter", Some(self.filter.to_string()));

        // [engine] section
        config.set(
            "engine",
            "fixed_update_interval",
            Some(self.fixed_update_interval.to_string()),
        );
        config.set("engine", "debug", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Window size in pixels.
    pub fn window_size(&self) -> (i32, i32) {
        (
            (self.width as f32 * self.scale) as i32,
            (self.height as f32 * self.scale) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_init() {
        let config = GameConfig::new();
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.title, "Game");
        assert_eq!(config.fixed_update_interval, 10.0);
        assert!(!config.debug);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = 320\nscale = 3\ntitle = Lemon Test\n")
            .unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.scale, 3.0);
        assert_eq!(config.title, "Lemon Test");
        assert_eq!(config.window_size(), (960, 1800));
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nscale = 0\n[engine]\nfixed_update_interval = -5\n")
            .unwrap();
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.fixed_update_interval, 10.0);
    }

    #[test]
    fn test_canvas_filter_key() {
        let mut config = GameConfig::new();
        assert_eq!(config.filter, RenderFilter::Nearest);
        config.load_from_str("[window]\nfilter = bilinear\n").unwrap();
        assert_eq!(config.filter, RenderFilter::Bilinear);
        config.load_from_str("[window]\nfilter = blurry\n").unwrap();
        assert_eq!(config.filter, RenderFilter::Bilinear);
    }

    #[test]
    fn test_engine_section() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[engine]\nfixed_update_interval = 16.5\ndebug = true\n")
            .unwrap();
        assert_eq!(config.fixed_update_interval, 16.5);
        assert!(config.debug);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("./definitely/not/here/config.ini"));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "lemonengine_config_{}.ini",
            std::process::id()
        ));
        let mut config = GameConfig::with_path(&path);
        config.width = 256;
        config.title = "Saved".to_string();
        config.debug = true;
        config.filter = RenderFilter::Bilinear;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.width, 256);
        assert_eq!(loaded.title, "Saved");
        assert!(loaded.debug);
        assert_eq!(loaded.filter, RenderFilter::Bilinear);

        std::fs::remove_file(&path).ok();
    }
}
