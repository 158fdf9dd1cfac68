use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Hide player controls after this many milliseconds without activity
    #[serde(default = "default_controls_hide_ms")]
    pub controls_hide_ms: u64,

    /// Switch to a same-quality sibling automatically when a source fails
    #[serde(default)]
    pub auto_promote_siblings: bool,

    /// Start playing as soon as a source is ready
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Surface height in pixels; caps adaptive variant selection
    #[serde(default)]
    pub surface_height: Option<u32>,

    /// Whether the surface plays HLS without the adaptive loader
    #[serde(default)]
    pub native_hls: bool,
}

fn default_controls_hide_ms() -> u64 {
    3000
}

fn default_autoplay() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            controls_hide_ms: default_controls_hide_ms(),
            auto_promote_siblings: false,
            autoplay: default_autoplay(),
            surface_height: None,
            native_hls: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreferencesConfig {
    /// JSON file holding persisted preferences; `~` is expanded
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("~/.config/marquee/preferences.json")
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}
