//! Configuration persistence using toml_edit to preserve formatting and comments.

use super::Config;
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{DocumentMut, Item};

/// Save the config to a TOML file.
///
/// If the file already exists, keys are written into the existing sections so
/// comments and unknown sections survive.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let new_content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    let new_doc: DocumentMut = new_content
        .parse()
        .with_context(|| "Failed to parse serialized config")?;

    let doc = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut doc: DocumentMut = content
            .parse()
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        for (section, item) in new_doc.iter() {
            let merged = match (
                doc.get_mut(section).and_then(Item::as_table_mut),
                item.as_table(),
            ) {
                (Some(existing), Some(table)) => {
                    for (key, value) in table.iter() {
                        existing[key] = value.clone();
                    }
                    true
                }
                _ => false,
            };
            if !merged {
                doc[section] = item.clone();
            }
        }
        doc
    } else {
        new_doc
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}
