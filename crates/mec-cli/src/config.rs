use std::{fs, io, path::PathBuf};

use eyre::Context;
use mec::fuzzy::SearchSettings;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_PATH: &str = "mec.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchSettings,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session file loaded on startup.
    pub load: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(text: &str) -> eyre::Result<Self> {
        toml::from_str(text).context("cannot deserialize config file")
    }

    /// Reads the file named by `MEC_CONFIG`, or `mec.toml` in the working directory.
    ///
    /// A missing `mec.toml` is not an error, but a missing `MEC_CONFIG` file is.
    pub fn load() -> eyre::Result<Self> {
        let explicit = std::env::var_os("MEC_CONFIG").map(PathBuf::from);
        let path = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));

        match fs::read_to_string(&path) {
            Ok(text) => {
                info!(path = %path.display(), "loading config");
                Self::from_toml(&text)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                Ok(Self::default())
            }
            Err(error) => Err(error)
                .with_context(|| format!("cannot read config file '{}'", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mec::fuzzy::DEFAULT_MIN_SCORE;

    use super::Config;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.search.min_score, DEFAULT_MIN_SCORE);
        assert!(config.session.load.is_none());
    }

    #[test]
    fn full_config() {
        let config = Config::from_toml(
            r#"
                [search]
                min_score = 90

                [session]
                load = "parts/bracket.mec"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.min_score, 90);
        assert_eq!(
            config.session.load.as_deref(),
            Some(Path::new("parts/bracket.mec"))
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(Config::from_toml("[search]\nmin_score = \"high\"").is_err());
    }
}
