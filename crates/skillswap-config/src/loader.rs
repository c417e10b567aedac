use std::path::{Path, PathBuf};
use tracing::{info, warn};

use skillswap_core::{Result, SwapError};

use crate::schema::SwapConfig;

/// Loads the SkillSwap configuration from disk and the environment.
pub struct ConfigLoader {
    config: SwapConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLSWAP_CONFIG env > ~/.skillswap/skillswap.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLSWAP_CONFIG") {
            return PathBuf::from(p);
        }
        Self::default_path()
    }

    /// `~/.skillswap/skillswap.toml`, or `./.skillswap/skillswap.toml` without a home dir.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillswap")
            .join("skillswap.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), but reads overrides through `env` instead of the process environment.
    pub fn load_with(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            Self::parse(&raw, &config_path)?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            SwapConfig::default()
        };

        let config = Self::apply_env_overrides(config, env);

        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(SwapError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> SwapConfig {
        self.config.clone()
    }

    /// Path the config was resolved from (may not exist).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn parse(raw: &str, path: &Path) -> Result<SwapConfig> {
        toml::from_str::<SwapConfig>(raw).map_err(|e| {
            SwapError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply env var overrides (SKILLSWAP_DB_PATH, SKILLSWAP_LOG_LEVEL, etc.)
    pub fn apply_env_overrides(
        mut config: SwapConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> SwapConfig {
        if let Some(v) = env("SKILLSWAP_DB_PATH") {
            config.store.db_path = PathBuf::from(v);
        }
        if let Some(v) = env("SKILLSWAP_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Some(v) = env("SKILLSWAP_MAX_MATCHES") {
            match v.parse::<usize>() {
                Ok(n) => config.recommend.max_matches = n,
                Err(_) => warn!(value = %v, "ignoring non-numeric SKILLSWAP_MAX_MATCHES"),
            }
        }
        if let Some(v) = env("SKILLSWAP_MAX_SUGGESTIONS") {
            match v.parse::<usize>() {
                Ok(n) => config.recommend.max_suggestions = n,
                Err(_) => warn!(value = %v, "ignoring non-numeric SKILLSWAP_MAX_SUGGESTIONS"),
            }
        }
        config
    }
}
