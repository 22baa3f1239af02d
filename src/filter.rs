//! Predicates and paging options understood by the collection actor.

use regex::{Regex, RegexBuilder};

use crate::actor_framework::Document;

/// Case-insensitive pattern used for fuzzy field matching.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles `pattern` as a case-insensitive regular expression.
    ///
    /// Plain text behaves as a substring search.
    pub fn case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A predicate over the fields of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<F> {
    /// Matches every document.
    All,
    Eq(F, String),
    /// Also matches documents where the field is unset.
    Ne(F, String),
    Matches(F, Pattern),
    /// Empty conjunction matches everything.
    And(Vec<Filter<F>>),
    /// Empty disjunction matches nothing.
    Or(Vec<Filter<F>>),
}

impl<F: Copy> Filter<F> {
    pub fn matches<D: Document<Field = F>>(&self, doc: &D) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => doc.field(*field) == Some(value.as_str()),
            Filter::Ne(field, value) => doc.field(*field) != Some(value.as_str()),
            Filter::Matches(field, pattern) => {
                doc.field(*field).is_some_and(|v| pattern.is_match(v))
            }
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Paging applied to a `find` after filtering. Skip runs before limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn apply<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let skipped = items.skip(self.skip.unwrap_or(0));
        match self.limit {
            Some(limit) => skipped.take(limit).collect(),
            None => skipped.collect(),
        }
    }
}
