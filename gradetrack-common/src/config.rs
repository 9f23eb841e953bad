//! Server configuration
//!
//! Bootstrap settings resolved once before the HTTP server starts. Sources
//! merge in priority order:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables (GRADETRACK_*, wired through clap in the binary)
//! 3. TOML config file
//! 4. Built-in defaults (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_PATH: &str = "grades.db";

/// Origins the browser frontend is served from during development.
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://127.0.0.1:5500".to_string(),
        "http://localhost:5500".to_string(),
    ]
}

/// Resolved configuration the server runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind the HTTP listener to.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Path to the SQLite database file (relative or absolute).
    pub database_path: PathBuf,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

/// Values parsed from the TOML config file. Every key is optional;
/// anything absent falls through to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    database_path: Option<PathBuf>,
    allowed_origins: Option<Vec<String>>,
}

/// Overrides supplied on the command line or via environment variables.
/// `None` fields fall through to the config file and then to defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    /// Load configuration, merging overrides over the config file over
    /// built-in defaults.
    ///
    /// With an explicit `config_file` the file must be readable and loading
    /// fails otherwise. Without one the default locations are probed and a
    /// missing file simply means defaults apply.
    pub fn load(config_file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let file = match config_file {
            Some(path) => read_config_file(path)?,
            None => match locate_config_file() {
                Some(path) => read_config_file(&path)?,
                None => {
                    debug!("No config file found, using built-in defaults");
                    FileConfig::default()
                }
            },
        };

        Ok(Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            allowed_origins: overrides
                .allowed_origins
                .or(file.allowed_origins)
                .unwrap_or_else(default_allowed_origins),
        })
    }
}

/// Probe the default config file locations:
/// `./gradetrack.toml` first, then the platform config directory
/// (`~/.config/gradetrack/gradetrack.toml` on Linux).
fn locate_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("gradetrack.toml");
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?
        .join("gradetrack")
        .join("gradetrack.toml");
    if user.exists() {
        return Some(user);
    }

    None
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;
    let config = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;
    info!("Loaded configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_fill_everything() {
        let config = AppConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("grades.db"));
        assert_eq!(
            config.allowed_origins,
            vec![
                "http://127.0.0.1:5500".to_string(),
                "http://localhost:5500".to_string()
            ]
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_temp_config(
            r#"
host = "0.0.0.0"
port = 9000
database_path = "/tmp/grades-test.db"
allowed_origins = ["http://example.com"]
"#,
        );

        let config = AppConfig::load(Some(file.path()), ConfigOverrides::default()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/grades-test.db"));
        assert_eq!(config.allowed_origins, vec!["http://example.com".to_string()]);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let file = write_temp_config("port = 9000\n");

        let config = AppConfig::load(Some(file.path()), ConfigOverrides::default()).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn overrides_beat_file_values() {
        let file = write_temp_config("port = 9000\nhost = \"0.0.0.0\"\n");
        let overrides = ConfigOverrides {
            port: Some(3000),
            ..Default::default()
        };

        let config = AppConfig::load(Some(file.path()), overrides).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(
            Some(Path::new("/nonexistent/gradetrack.toml")),
            ConfigOverrides::default(),
        );

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_temp_config("port = \"not a number\"\n");

        let result = AppConfig::load(Some(file.path()), ConfigOverrides::default());

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
