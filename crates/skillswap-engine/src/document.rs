use std::collections::HashSet;

use skillswap_core::User;

/// What the engine derives from one user before vectorization.
#[derive(Debug, Clone)]
pub struct SkillProfile {
    /// Lowercased, space-joined teach + learn skills. Tokenized on whitespace,
    /// so a multi-word skill like "Machine Learning" contributes two terms.
    pub document: String,
    /// Declared skills, exact strings, for suggestion diffing.
    pub skills: SkillSet,
}

impl SkillProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            document: build_document(user),
            skills: SkillSet::from_user(user),
        }
    }
}

/// Join teach skills then learn skills with single spaces and lowercase the result.
pub fn build_document(user: &User) -> String {
    user.declared_skills()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Split a document into vocabulary terms.
pub fn tokenize(document: &str) -> impl Iterator<Item = &str> {
    document.split_whitespace()
}

/// Set of declared skill names, compared case-sensitively after trimming.
///
/// Iteration follows first declaration order (teach skills, then learn skills).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl SkillSet {
    pub fn from_user(user: &User) -> Self {
        Self::from_skills(user.declared_skills())
    }

    pub fn from_skills<'a>(skills: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::default();
        for skill in skills {
            set.insert(skill);
        }
        set
    }

    /// Insert a skill. Blank names are ignored. Returns true if it was new.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.members.contains(skill) {
            return false;
        }
        self.members.insert(skill.to_string());
        self.ordered.push(skill.to_string());
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.members.contains(skill.trim())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Skills in `self` that `other` does not have, in `self`'s order.
    pub fn difference<'a>(&'a self, other: &'a SkillSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |s| !other.members.contains(*s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(teach: &[&str], learn: &[&str]) -> User {
        User::new(
            "u",
            teach.iter().map(|s| s.to_string()).collect(),
            learn.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn document_joins_teach_then_learn_lowercased() {
        let u = user(&["Python", "SQL"], &["Graphic Design"]);
        assert_eq!(build_document(&u), "python sql graphic design");
    }

    #[test]
    fn document_empty_for_no_skills() {
        assert_eq!(build_document(&user(&[], &[])), "");
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn multi_word_skill_splits_into_terms() {
        let u = user(&["Machine Learning"], &[]);
        let doc = build_document(&u);
        let terms: Vec<&str> = tokenize(&doc).collect();
        assert_eq!(terms, vec!["machine", "learning"]);
    }

    #[test]
    fn skill_set_keeps_case_and_trims() {
        let set = SkillSet::from_skills(["Python", " python ", "Python  ", ""]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Python"));
        assert!(set.contains("python"));
        assert!(!set.contains("PYTHON"));
    }

    #[test]
    fn skill_set_union_of_teach_and_learn() {
        let set = SkillSet::from_user(&user(&["rust", "go"], &["go", "sql"]));
        let skills: Vec<&str> = set.iter().collect();
        assert_eq!(skills, vec!["rust", "go", "sql"]);
    }

    #[test]
    fn difference_preserves_order() {
        let a = SkillSet::from_skills(["sql", "python", "css"]);
        let b = SkillSet::from_skills(["python"]);
        let diff: Vec<&str> = a.difference(&b).collect();
        assert_eq!(diff, vec!["sql", "css"]);
    }

    #[test]
    fn whitespace_only_skills_are_degenerate() {
        let profile = SkillProfile::from_user(&user(&["  "], &[]));
        assert!(profile.skills.is_empty());
        assert_eq!(tokenize(&profile.document).count(), 0);
    }
}
