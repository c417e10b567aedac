//! # skillswap-core
//!
//! Core types, traits, and primitives for the SkillSwap recommender.
//! This crate defines the shared vocabulary used by every other crate in the workspace:
//! the `User` record, the `Recommendation` written back to it, and the
//! source/sink traits a user store implements.

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, SwapError};
pub use store::{UserSink, UserSource};
pub use types::*;
