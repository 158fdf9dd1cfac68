pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./marquee.toml", "~/.config/marquee/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Preference store path with `~` expanded
pub fn preferences_path(config: &Config) -> PathBuf {
    let raw = config.preferences.path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.player.controls_hide_ms == 0 {
        anyhow::bail!("player.controls_hide_ms must be greater than 0");
    }

    if config.player.surface_height == Some(0) {
        anyhow::bail!("player.surface_height cannot be 0");
    }

    let base_url = &config.catalog.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!("catalog.base_url must be an http(s) URL, got '{}'", base_url);
    }

    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be greater than 0");
    }

    if config.preferences.path.as_os_str().is_empty() {
        tracing::warn!("preferences.path is empty; quality preference will not persist");
    }

    Ok(())
}
