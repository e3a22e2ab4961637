use std::path::{Path, PathBuf};

use anyhow::Context;
use paint_core::EstimateSettings;
use serde::Deserialize;

/// Config file looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "paint.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub estimate: EstimateSettings,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[estimate]
default_bar_length_m = 6.0

[estimate.paint_system]
name = "Esmalte sintético"
coats = 1
yield_m2_per_liter = 10.0
loss_percent = 10.0
"#;

/// Load configuration.
///
/// Search order:
/// 1. Path given with `--config`
/// 2. `paint.toml` next to the executable
/// 3. Embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Some(path) = config_next_to_exe() {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return read_config(&path);
        }
        tracing::debug!("{} not found at: {}", CONFIG_FILE_NAME, path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn config_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(exe_path.parent()?.join(CONFIG_FILE_NAME))
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.estimate.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.estimate, EstimateSettings::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config(
            r#"
[estimate.paint_system]
name = "Epóxi"
coats = 2
yield_m2_per_liter = 8.0
"#,
        )
        .unwrap();
        assert_eq!(config.estimate.paint_system.coats, 2);
        assert_eq!(config.estimate.default_bar_length_m, 6.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = parse_config(
            r#"
[estimate]
default_bar_length_m = -1.0
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.estimate, EstimateSettings::default());
    }
}
