use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use skillswap_core::RECOMMENDATION_LIMIT;

/// Root configuration — maps to `skillswap.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    pub store: StoreConfig,
    pub recommend: RecommendConfig,
    pub logging: LoggingConfig,
}

// ── Store ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database holding user records.
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("skillswap.db"),
        }
    }
}

// ── Recommend ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Number of similar users written to `recommendedMatches`.
    pub max_matches: usize,
    /// Number of skills written to `suggestedSkills`. Also the point at which
    /// the neighbour walk stops collecting candidates.
    pub max_suggestions: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_matches: RECOMMENDATION_LIMIT,
            max_suggestions: RECOMMENDATION_LIMIT,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl SwapConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Store ───
        if self.store.db_path.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                field: "store.db_path".into(),
                message: "database path is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'skillswap.db'".into()),
            });
        }

        // ── Limits ───
        if self.recommend.max_matches == 0 {
            warnings.push(ConfigWarning {
                field: "recommend.max_matches".into(),
                message: "max_matches is 0 — no matches would be written".into(),
                severity: WarningSeverity::Error,
                hint: Some("The platform default is 5".into()),
            });
        }
        if self.recommend.max_suggestions == 0 {
            warnings.push(ConfigWarning {
                field: "recommend.max_suggestions".into(),
                message: "max_suggestions is 0 — no skills would be suggested".into(),
                severity: WarningSeverity::Error,
                hint: Some("The platform default is 5".into()),
            });
        }
        for (field, value) in [
            ("recommend.max_matches", self.recommend.max_matches),
            ("recommend.max_suggestions", self.recommend.max_suggestions),
        ] {
            if value > RECOMMENDATION_LIMIT {
                warnings.push(ConfigWarning {
                    field: field.into(),
                    message: format!("{value} exceeds the per-user limit of {RECOMMENDATION_LIMIT}"),
                    severity: WarningSeverity::Error,
                    hint: Some(format!("Use a value between 1 and {RECOMMENDATION_LIMIT}")),
                });
            }
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
