use std::collections::BTreeSet;

use serde::Serialize;

use crate::matching::normalizer::{KeywordNormalizer, SkillKeyword};

/// Deduplicated set of normalized keywords.
///
/// Backed by an ordered set, so iteration is lexical by normalized bytes.
/// Serializes as a JSON array of keyword strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<SkillKeyword>);

impl SkillSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalizes every raw string, drops empty keywords, deduplicates.
    pub fn from_raw<I, S>(normalizer: &KeywordNormalizer, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|s| normalizer.normalize(s.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillKeyword> {
        self.0.iter()
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Number of keywords shared with `other`, without allocating.
    pub fn overlap_count(&self, other: &SkillSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

impl FromIterator<SkillKeyword> for SkillSet {
    fn from_iter<T: IntoIterator<Item = SkillKeyword>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a SkillKeyword;
    type IntoIter = std::collections::btree_set::Iter<'a, SkillKeyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
