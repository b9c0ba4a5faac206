//! Configuration file loading

use super::schema::EngineConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "RIDESHARE_CONFIG";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub engine: EngineConfig,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path (argument first, then `RIDESHARE_CONFIG`) must exist.
    /// Without one, the standard locations are searched and defaults are used
    /// when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let config_path = match explicit {
            Some(p) if !p.exists() => return Err(Error::config_not_found(&p)),
            Some(p) => Some(p),
            None => find_config_file(),
        };

        let engine = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            EngineConfig::default()
        };

        engine.validate()?;

        Ok(Self {
            engine,
            path: config_path,
        })
    }

    /// Defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            engine: EngineConfig::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".rideshare.toml", "rideshare.toml", ".config/rideshare.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Reading config file {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .map_err(Error::from)
        .context(format!("Parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.engine.matching.tolerance_meters, 3000.0);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\ntolerance_meters = 750.0\n[fare]\ngst_rate = 0.05").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.engine.matching.tolerance_meters, 750.0);
        assert_eq!(config.engine.fare.gst_rate, 0.05);
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\ntolerance_meters = \"far\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_config_validation_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\ntolerance_meters = -5.0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }
}
