use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use skillswap_core::{Recommendation, Result, SwapError, User, UserId, UserSink, UserSource};

/// Vec-backed user store. Writes can be made to fail for chosen ids.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
    recommendations: RwLock<HashMap<UserId, Recommendation>>,
    failing: HashSet<UserId>,
    all_or_nothing: bool,
}

impl MemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            ..Self::default()
        }
    }

    /// Reject recommendation writes for `id`.
    pub fn fail_writes_for(mut self, id: impl Into<UserId>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Report that one failed write invalidates the whole batch.
    pub fn all_or_nothing(mut self) -> Self {
        self.all_or_nothing = true;
        self
    }

    pub fn insert(&self, user: User) {
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
    }

    pub fn recommendation(&self, id: &str) -> Option<Recommendation> {
        self.recommendations.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserSource for MemoryUserStore {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().clone())
    }
}

#[async_trait]
impl UserSink for MemoryUserStore {
    async fn update_recommendations(
        &self,
        id: &UserId,
        recommendation: &Recommendation,
    ) -> Result<()> {
        if self.failing.contains(id) {
            return Err(SwapError::sink(id.clone(), "write rejected"));
        }
        if !self.users.read().iter().any(|u| &u.id == id) {
            return Err(SwapError::UserNotFound(id.clone()));
        }
        self.recommendations
            .write()
            .insert(id.clone(), recommendation.clone());
        Ok(())
    }

    fn per_record_writes(&self) -> bool {
        !self.all_or_nothing
    }
}
