//! Bulk user import.
//!
//! Seed files are JSON arrays of user records in the platform format:
//!
//! ```json
//! [{ "id": "u1", "username": "Alice", "skillsToTeach": ["html"], "skillsToLearn": ["sql"] }]
//! ```
//!
//! `id` is optional; a random UUID is assigned when it is missing.

use std::path::Path;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use skillswap_core::{Result, SwapError, User};

/// Id prefix shared by the built-in demo users.
pub const DEMO_ID_PREFIX: &str = "mock-";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    skills_to_teach: Vec<String>,
    #[serde(default)]
    skills_to_learn: Vec<String>,
}

impl From<SeedUser> for User {
    fn from(seed: SeedUser) -> Self {
        User {
            id: seed
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            username: seed.username,
            skills_to_teach: seed.skills_to_teach,
            skills_to_learn: seed.skills_to_learn,
        }
    }
}

/// Parse a JSON array of seed users.
pub fn parse_users(json: &str) -> Result<Vec<User>> {
    let seeds: Vec<SeedUser> =
        serde_json::from_str(json).map_err(|e| SwapError::Seed(format!("invalid seed file: {e}")))?;
    let users: Vec<User> = seeds.into_iter().map(User::from).collect();

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = users.iter().find(|u| !seen.insert(u.id.as_str())) {
        return Err(SwapError::Seed(format!("duplicate user id '{}'", dup.id)));
    }
    Ok(users)
}

/// Read and parse a seed file.
pub fn load_users(path: &Path) -> Result<Vec<User>> {
    info!(?path, "reading seed file");
    let raw = std::fs::read_to_string(path)?;
    parse_users(&raw)
}

/// The platform's demo population.
pub fn demo_users() -> Vec<User> {
    let demo = |name: &str, teach: &[&str], learn: &[&str]| {
        User::new(
            format!("{DEMO_ID_PREFIX}{}", name.to_lowercase()),
            teach.iter().map(|s| s.to_string()).collect(),
            learn.iter().map(|s| s.to_string()).collect(),
        )
        .with_username(name)
    };
    vec![
        demo("Alice", &["javascript", "html"], &["python", "sql"]),
        demo("Bob", &["python", "sql"], &["javascript"]),
        demo("Charlie", &["java", "c++"], &["html", "css"]),
        demo("Diana", &["html", "css"], &["java", "c++"]),
        demo("Eve", &["machine learning", "ai"], &["javascript", "react"]),
        demo("Frank", &["nodejs", "express"], &["machine learning", "ai"]),
        demo("Grace", &["html", "css", "javascript"], &["nodejs", "express"]),
        demo("Heidi", &["sql", "mongodb"], &["react", "nodejs"]),
        demo("Ivan", &["react", "redux"], &["sql", "mongodb"]),
        demo("Judy", &["python", "data analysis"], &["javascript", "html"]),
    ]
}
