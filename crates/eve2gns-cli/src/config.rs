//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use eve2gns::{Eve2GnsError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for Eve2GnsError {
    fn from(err: ConfigError) -> Self {
        Eve2GnsError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load the converter configuration.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `eve2gns/config.toml` under the working directory
/// 3. `config.toml` in the platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds unusable values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, Eve2GnsError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    for (origin, path) in discovered_paths() {
        if path.exists() {
            info!(origin, path = path.display().to_string(); "Loading configuration");
            return load_config_file(&path);
        }
        debug!(origin, path = path.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Implicit configuration locations, in search order.
fn discovered_paths() -> Vec<(&'static str, PathBuf)> {
    let mut paths = vec![("local", PathBuf::from("eve2gns").join("config.toml"))];

    match ProjectDirs::from("com", "eve2gns", "eve2gns") {
        Some(dirs) => paths.push(("system", dirs.config_dir().join("config.toml"))),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, Eve2GnsError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let canvas = config.canvas();
    if canvas.scale().is_nan() || canvas.scale() <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "canvas scale must be positive, got {}",
            canvas.scale()
        )));
    }
    if canvas.margin() < 0.0 {
        return Err(ConfigError::Validation(format!(
            "canvas margin must not be negative, got {}",
            canvas.margin()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_load_partial_config() {
        let file = config_file(
            r#"
            [canvas]
            grid = 250.0

            [console]
            start_port = 32768
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.canvas().grid(), 250.0);
        assert_eq!(config.canvas().margin(), 200.0);
        assert_eq!(config.console().start_port(), 32768);
        assert_eq!(config.style().label_font_family(), "TypeWriter");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = load_config(Some("/nonexistent/eve2gns.toml")).unwrap_err();
        assert!(
            err.to_string()
                .contains("Missing configuration file: /nonexistent/eve2gns.toml")
        );
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = config_file("[canvas\nscale = ");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_load_rejects_zero_scale() {
        let file = config_file("[canvas]\nscale = 0.0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("canvas scale must be positive"));
    }
}
