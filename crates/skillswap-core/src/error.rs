use thiserror::Error;

/// Unified error type for the SkillSwap workspace.
#[derive(Error, Debug)]
pub enum SwapError {
    // ── Batch boundary errors ──────────────────────────────────
    #[error("failed to fetch users: {0}")]
    Source(String),

    #[error("failed to persist recommendations for user {user}: {reason}")]
    Sink { user: String, reason: String },

    // ── Store errors ───────────────────────────────────────────
    #[error("store error: {0}")]
    Store(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("seed error: {0}")]
    Seed(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SwapError {
    /// Build a sink failure for the given user.
    pub fn sink(user: impl Into<String>, reason: impl ToString) -> Self {
        SwapError::Sink {
            user: user.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;
