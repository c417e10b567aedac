//! # skillswap-engine
//!
//! Batch recommendation engine for SkillSwap:
//!
//! - **Document builder**: turns a user's skill lists into a lowercased text document and a skill set.
//! - **Vectorizer**: fits a TF-IDF [`CorpusModel`] over every document in the batch.
//! - **Similarity**: dense pairwise cosine similarity over the unit vectors.
//! - **Recommender**: ranked peer matches plus skills borrowed from the closest peers.
//!
//! [`Pipeline`] wires the engine between a [`UserSource`](skillswap_core::UserSource)
//! and a [`UserSink`](skillswap_core::UserSink).

pub mod document;
pub mod pipeline;
pub mod recommend;
pub mod similarity;
pub mod vectorizer;

pub use document::{SkillProfile, SkillSet};
pub use pipeline::{Pipeline, Progress, RunReport, SinkFailure};
pub use recommend::{Analysis, RecommendOptions, Recommender, UserRecommendation};
pub use similarity::SimilarityMatrix;
pub use vectorizer::{CorpusModel, SparseVector};
