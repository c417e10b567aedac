//! # skillswap-store
//!
//! User record storage for SkillSwap. Both stores implement the
//! [`UserSource`](skillswap_core::UserSource) and [`UserSink`](skillswap_core::UserSink)
//! traits the batch pipeline reads from and writes back to.
//!
//! - [`UserStore`]: SQLite, persistent.
//! - [`MemoryUserStore`]: in-memory, for tests and dry runs.

pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::MemoryUserStore;
pub use sqlite::{StoredUser, UserStore};
