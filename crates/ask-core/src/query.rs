//! Normalized search parameters.
//!
//! Raw inputs arrive as a single comma-separated tag parameter and an optional
//! status token. Normalization is lenient: malformed pieces degrade to
//! "no filter" instead of failing the request.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Question;
use crate::enums::ResolutionFilter;

/// Trim tag names, drop blanks, and remove duplicates keeping first occurrence.
///
/// Case is preserved: `os` and `OS` are different tags.
pub fn normalize_tag_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names: Vec<String> = Vec::new();
    for item in raw {
        let name = item.as_ref().trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// A normalized question search.
///
/// A question matches when it carries at least one of `tags` (or `tags` is
/// empty) and its resolution state is admitted by `status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionQuery {
    /// Exact, case-sensitive tag names. Empty means no tag filter.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ResolutionFilter,
}

impl QuestionQuery {
    /// Build a query from already-split tag names and a status filter.
    pub fn new<I, S>(tags: I, status: ResolutionFilter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: normalize_tag_names(tags),
            status,
        }
    }

    /// Build a query from raw request parameters.
    ///
    /// `tag_param` is a comma-separated list (`"os,malloc"`); `status_param` is
    /// `"resolved"`, `"unresolved"`, or anything else for no status filter.
    #[must_use]
    pub fn from_params(tag_param: Option<&str>, status_param: Option<&str>) -> Self {
        let query = Self::new(
            tag_param.into_iter().flat_map(|param| param.split(',')),
            ResolutionFilter::from_token(status_param),
        );
        tracing::debug!(tags = ?query.tags, status = %query.status, "normalized question query");
        query
    }

    /// Everything, newest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_tag_filter(&self) -> bool {
        !self.tags.is_empty()
    }

    /// In-memory evaluation of the predicate the store runs.
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        (!self.has_tag_filter() || question.has_any_tag(&self.tags))
            && self.status.admits(question.is_resolved)
    }
}
