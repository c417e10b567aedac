//! # skillswap-cli
//!
//! Command-line interface for the SkillSwap recommender.
//!
//! ## Commands
//!
//! - `skillswap run` — Compute and store recommendations for every user
//! - `skillswap seed` — Import users from a JSON file or the demo set
//! - `skillswap users` — List users and their skills
//! - `skillswap show` — Show one user's stored matches and suggested skills
//! - `skillswap config` — Show the effective configuration
//! - `skillswap init` — Write a starter skillswap.toml

pub mod commands;

pub use commands::Cli;
