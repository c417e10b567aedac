use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use skillswap_core::{RECOMMENDATION_LIMIT, Recommendation, User, UserId};

use crate::document::{SkillProfile, SkillSet};
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::{CorpusModel, SparseVector};

/// Output limits for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    pub max_matches: usize,
    pub max_suggestions: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            max_matches: RECOMMENDATION_LIMIT,
            max_suggestions: RECOMMENDATION_LIMIT,
        }
    }
}

impl RecommendOptions {
    /// Both limits cut to [`RECOMMENDATION_LIMIT`].
    pub fn capped(self) -> Self {
        Self {
            max_matches: self.max_matches.min(RECOMMENDATION_LIMIT),
            max_suggestions: self.max_suggestions.min(RECOMMENDATION_LIMIT),
        }
    }
}

/// A recommendation tagged with the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecommendation {
    pub user_id: UserId,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

/// Everything derived from a user snapshot before recommendations are drawn.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub profiles: Vec<SkillProfile>,
    pub model: CorpusModel,
    pub vectors: Vec<SparseVector>,
    pub similarity: SimilarityMatrix,
}

impl Analysis {
    /// Build documents, fit the corpus model and compute the similarity matrix.
    pub fn of(users: &[User]) -> Self {
        let profiles: Vec<SkillProfile> = users.iter().map(SkillProfile::from_user).collect();
        let documents: Vec<&str> = profiles.iter().map(|p| p.document.as_str()).collect();
        let (model, vectors) = CorpusModel::fit_transform(&documents);
        debug!(
            users = users.len(),
            vocabulary = model.vocabulary_size(),
            "fitted corpus model"
        );
        let similarity = SimilarityMatrix::compute(&vectors);
        Self {
            profiles,
            model,
            vectors,
            similarity,
        }
    }
}

/// Derives peer matches and skill suggestions from a user snapshot.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    options: RecommendOptions,
}

impl Recommender {
    /// Limits above [`RECOMMENDATION_LIMIT`] are capped.
    pub fn new(options: RecommendOptions) -> Self {
        Self {
            options: options.capped(),
        }
    }

    /// One recommendation per user, in snapshot order.
    pub fn recommend_all(&self, users: &[User]) -> Vec<UserRecommendation> {
        if users.is_empty() {
            return Vec::new();
        }
        let analysis = Analysis::of(users);
        users
            .iter()
            .enumerate()
            .map(|(i, user)| UserRecommendation {
                user_id: user.id.clone(),
                recommendation: self.recommend_one(users, &analysis, i),
            })
            .collect()
    }

    /// Recommendation for the user at `index` given a prepared analysis.
    pub fn recommend_one(&self, users: &[User], analysis: &Analysis, index: usize) -> Recommendation {
        let ranked = rank_neighbors(&analysis.similarity, index);

        let recommended_matches = ranked
            .iter()
            .take(self.options.max_matches)
            .map(|&j| users[j].id.clone())
            .collect();

        let suggested_skills = suggest_skills(
            &analysis.profiles[index].skills,
            ranked.iter().map(|&j| &analysis.profiles[j].skills),
            self.options.max_suggestions,
        );

        Recommendation {
            recommended_matches,
            suggested_skills,
        }
    }
}

/// Every other user, most similar first. Equal scores keep snapshot order.
pub fn rank_neighbors(similarity: &SimilarityMatrix, index: usize) -> Vec<usize> {
    let row = similarity.row(index);
    let mut ranked: Vec<usize> = (0..similarity.len()).filter(|&j| j != index).collect();
    ranked.sort_by(|&a, &b| {
        row[b]
            .partial_cmp(&row[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    ranked
}

/// Walk neighbours in rank order, collecting skills `own` lacks.
///
/// Stops once at least `limit` skills are collected; the neighbour that crosses
/// the limit contributes all of its skills before the result is cut to `limit`.
/// A user with no declared skills gets nothing.
pub fn suggest_skills<'a>(
    own: &SkillSet,
    neighbors: impl IntoIterator<Item = &'a SkillSet>,
    limit: usize,
) -> Vec<String> {
    let mut suggested: Vec<String> = Vec::new();
    if own.is_empty() || limit == 0 {
        return suggested;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for neighbor in neighbors {
        for skill in neighbor.difference(own) {
            if seen.insert(skill) {
                suggested.push(skill.to_string());
            }
        }
        if suggested.len() >= limit {
            break;
        }
    }

    suggested.truncate(limit);
    suggested
}
