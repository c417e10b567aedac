//! # skillswap-config
//!
//! Configuration for the SkillSwap recommender. Reads from `skillswap.toml`,
//! environment variables, and CLI overrides — in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::SwapConfig;
pub use schema::{ConfigWarning, LoggingConfig, RecommendConfig, StoreConfig, WarningSeverity};
