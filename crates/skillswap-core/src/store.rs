use async_trait::async_trait;

use crate::types::{Recommendation, User, UserId};

/// Anything that can hand the batch a snapshot of every user.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch all users, in a stable enumeration order.
    ///
    /// The returned vector is treated as an atomic snapshot for the whole run.
    async fn fetch_all(&self) -> crate::Result<Vec<User>>;
}

/// Anything that can store a user's recommendation fields.
#[async_trait]
pub trait UserSink: Send + Sync {
    /// Overwrite `recommendedMatches` and `suggestedSkills` for one user.
    async fn update_recommendations(
        &self,
        id: &UserId,
        recommendation: &Recommendation,
    ) -> crate::Result<()>;

    /// Whether a failed write leaves the other records writable.
    ///
    /// When `false`, the first failed write aborts the whole run.
    fn per_record_writes(&self) -> bool {
        true
    }
}
