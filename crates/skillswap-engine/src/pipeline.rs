use serde::Serialize;
use tracing::{info, warn};

use skillswap_core::{Recommendation, Result, SwapError, UserId, UserSink, UserSource};

use crate::recommend::{Recommender, UserRecommendation};

/// A write-back that failed without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkFailure {
    pub user_id: UserId,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Users in the snapshot.
    pub users: usize,
    /// Recommendations successfully written back.
    pub persisted: usize,
    pub failures: Vec<SinkFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress notifications emitted while a run writes results back.
#[derive(Debug)]
pub enum Progress<'a> {
    /// Recommendations computed for every user; `total` writes follow.
    Computed { total: usize },
    Persisted {
        user_id: &'a str,
        recommendation: &'a Recommendation,
    },
    Failed { user_id: &'a str, reason: &'a str },
}

/// Fetch → recommend → write back, once.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    recommender: Recommender,
}

impl Pipeline {
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }

    /// Compute recommendations without writing anything.
    pub async fn preview(&self, source: &dyn UserSource) -> Result<Vec<UserRecommendation>> {
        let users = fetch_snapshot(source).await?;
        Ok(self.recommender.recommend_all(&users))
    }

    pub async fn run(&self, source: &dyn UserSource, sink: &dyn UserSink) -> Result<RunReport> {
        self.run_with_progress(source, sink, |_| {}).await
    }

    /// Run the batch, reporting each write through `on_progress`.
    ///
    /// A failed write is recorded and skipped when the sink supports per-record
    /// writes; otherwise it aborts the run with [`SwapError::Sink`].
    pub async fn run_with_progress<F>(
        &self,
        source: &dyn UserSource,
        sink: &dyn UserSink,
        mut on_progress: F,
    ) -> Result<RunReport>
    where
        F: FnMut(Progress<'_>) + Send,
    {
        let users = fetch_snapshot(source).await?;
        let mut report = RunReport {
            users: users.len(),
            ..RunReport::default()
        };
        if users.is_empty() {
            info!("no users in store, nothing to recommend");
            return Ok(report);
        }

        let recommendations = self.recommender.recommend_all(&users);
        on_progress(Progress::Computed {
            total: recommendations.len(),
        });

        for UserRecommendation {
            user_id,
            recommendation,
        } in &recommendations
        {
            match sink.update_recommendations(user_id, recommendation).await {
                Ok(()) => {
                    report.persisted += 1;
                    info!(
                        user = %user_id,
                        matches = recommendation.recommended_matches.len(),
                        skills = recommendation.suggested_skills.len(),
                        "updated user"
                    );
                    on_progress(Progress::Persisted {
                        user_id,
                        recommendation,
                    });
                }
                Err(e) => {
                    let reason = match e {
                        SwapError::Sink { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    if !sink.per_record_writes() {
                        return Err(SwapError::sink(user_id.clone(), reason));
                    }
                    warn!(user = %user_id, error = %reason, "failed to persist recommendations");
                    on_progress(Progress::Failed {
                        user_id,
                        reason: &reason,
                    });
                    report.failures.push(SinkFailure {
                        user_id: user_id.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            users = report.users,
            persisted = report.persisted,
            failed = report.failures.len(),
            "recommendation run finished"
        );
        Ok(report)
    }
}

async fn fetch_snapshot(source: &dyn UserSource) -> Result<Vec<skillswap_core::User>> {
    let users = source.fetch_all().await.map_err(|e| match e {
        e @ SwapError::Source(_) => e,
        other => SwapError::Source(other.to_string()),
    })?;
    info!(count = users.len(), "fetched user snapshot");
    Ok(users)
}
