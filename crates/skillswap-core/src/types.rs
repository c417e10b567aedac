use serde::{Deserialize, Serialize};

/// Opaque, stable identifier for a user.
pub type UserId = String;

/// A platform user as seen by the recommender.
///
/// Field names follow the platform's record format (`skillsToTeach`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name. Never used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub skills_to_teach: Vec<String>,
    #[serde(default)]
    pub skills_to_learn: Vec<String>,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        skills_to_teach: Vec<String>,
        skills_to_learn: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: None,
            skills_to_teach,
            skills_to_learn,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Teach skills followed by learn skills, in declaration order.
    pub fn declared_skills(&self) -> impl Iterator<Item = &str> {
        self.skills_to_teach
            .iter()
            .chain(self.skills_to_learn.iter())
            .map(String::as_str)
    }

    /// Display label: username when present, otherwise the id.
    pub fn label(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.id)
    }
}

/// Upper bound on `recommendedMatches` and `suggestedSkills` per user.
pub const RECOMMENDATION_LIMIT: usize = 5;

/// The recommendation fields written back into a user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Most similar users first. Never contains the user itself.
    pub recommended_matches: Vec<UserId>,
    /// Skills offered by similar users that this user has not declared.
    pub suggested_skills: Vec<String>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.recommended_matches.is_empty() && self.suggested_skills.is_empty()
    }
}
