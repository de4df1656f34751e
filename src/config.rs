use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "RTD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "/etc/rtd.yml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Number N of the `/dev/i2c-N` device the boards are attached to.
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: u8,
    /// Used unless `RUST_LOG` is set.
    #[serde(
        default = "default_log_level",
        deserialize_with = "deserialize_log_level"
    )]
    log_level: LevelFilter,
}

fn default_i2c_bus() -> u8 {
    1
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Warn
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    level.parse().map_err(|_| {
        serde::de::Error::custom(format!(
            "unknown log level {level:?}, expected off, error, warn, info, debug or trace"
        ))
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i2c_bus: default_i2c_bus(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

pub(crate) fn get_config() -> Result<Config> {
    let path = get_config_file_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    load_config(&path)
}

fn get_config_file_path(from_env: Option<PathBuf>) -> PathBuf {
    from_env.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Reads `path`; a file that does not exist yields the defaults.
fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let config_file =
        File::open(path).with_context(|| format!("Cannot open config file {path:?}"))?;
    let config: Config = serde_yaml::from_reader(&config_file)
        .with_context(|| format!("Cannot parse config file {path:?}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/rtd.yml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.i2c_bus, 1);
        assert_eq!(config.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("i2c_bus: 3\n").unwrap();
        assert_eq!(config.i2c_bus, 3);
        assert_eq!(config.log_level(), LevelFilter::Warn);

        let config: Config = serde_yaml::from_str("log_level: debug\n").unwrap();
        assert_eq!(config.i2c_bus, 1);
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(serde_yaml::from_str::<Config>("i2c_bus: [1, 2]\n").is_err());
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        assert!(serde_yaml::from_str::<Config>("log_level: verbose\n").is_err());
        let config: Config = serde_yaml::from_str("log_level: TRACE\n").unwrap();
        assert_eq!(config.log_level(), LevelFilter::Trace);

        let path = std::env::temp_dir().join(format!("rtd-config-{}.yml", std::process::id()));
        std::fs::write(&path, "log_level: verbose\n").unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        let error = result.unwrap_err();
        assert!(format!("{error:#}").contains("unknown log level \"verbose\""), "{error:#}");
    }

    #[test]
    fn env_path_takes_precedence() {
        assert_eq!(
            get_config_file_path(Some(PathBuf::from("/tmp/other.yml"))),
            PathBuf::from("/tmp/other.yml")
        );
        assert_eq!(get_config_file_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
