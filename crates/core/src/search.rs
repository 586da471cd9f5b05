//! Search scopes and query descriptors.
//!
//! Each [`SearchScope`] maps to one pure builder returning a [`SearchQuery`]
//! descriptor. Store implementations translate the descriptor into their own
//! query language; nothing here interpolates user input into SQL.

use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::models::AggregatedResult;
use crate::store::{Deadline, SharedStore, StoreResult};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Row cap for answer-body substring search.
pub const ANSWER_SCOPE_LIMIT: i64 = 20;

/// Default number of questions in a feed.
pub const DEFAULT_FEED_LIMIT: i64 = 10;

/// Maximum number of questions in a feed.
pub const MAX_FEED_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Scope & descriptor
// ---------------------------------------------------------------------------

/// Which text a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Question title, body, and topic.
    Questions,
    /// Answer bodies.
    Answers,
    /// Ranked full-text over question and answer text together.
    #[default]
    All,
}

impl SearchScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchScope::Questions => "questions",
            SearchScope::Answers => "answers",
            SearchScope::All => "all",
        }
    }
}

/// Structured description of a question search, produced by the builders
/// below and executed by a store.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Questions whose title, body, or topic contains `needle`
    /// (case-insensitive).
    QuestionText { needle: String },
    /// Questions with at least one answer whose body contains `needle`
    /// (case-insensitive), capped at `limit` rows.
    AnswerText { needle: String, limit: i64 },
    /// Full-text match of all `terms` against title + body + answer body,
    /// one row per question, ordered by descending rank. Restricted to
    /// `topic` when set.
    Ranked {
        terms: Vec<String>,
        topic: Option<String>,
    },
}

impl SearchQuery {
    /// The PostgreSQL `tsquery` text for a ranked query.
    pub fn tsquery(&self) -> Option<String> {
        match self {
            SearchQuery::Ranked { terms, .. } => Some(terms.join(" & ")),
            _ => None,
        }
    }
}

/// Tunables for the ranked scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Exact topic the ranked scope is restricted to. `None` searches every
    /// topic.
    pub ranked_topic: Option<String>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on every character that is not alphanumeric or `_`, so
///   `printf(x)` yields `printf` and `x`.
/// - Lowercases and drops empty terms.
///
/// The output contains only tsquery-safe characters.
pub fn sanitize_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn questions_query(term: &str) -> SearchQuery {
    SearchQuery::QuestionText {
        needle: term.to_string(),
    }
}

pub fn answers_query(term: &str) -> SearchQuery {
    SearchQuery::AnswerText {
        needle: term.to_string(),
        limit: ANSWER_SCOPE_LIMIT,
    }
}

/// Returns `None` when the term has no usable words.
pub fn ranked_query(term: &str, options: &SearchOptions) -> Option<SearchQuery> {
    let terms = sanitize_terms(term);
    if terms.is_empty() {
        return None;
    }
    Some(SearchQuery::Ranked {
        terms,
        topic: options.ranked_topic.clone(),
    })
}

/// Dispatch a scope to its builder.
///
/// Returns `None` if the scope cannot match anything for this term, in which
/// case the search result is empty.
pub fn build_query(term: &str, scope: SearchScope, options: &SearchOptions) -> Option<SearchQuery> {
    match scope {
        SearchScope::Questions => Some(questions_query(term)),
        SearchScope::Answers => Some(answers_query(term)),
        SearchScope::All => ranked_query(term, options),
    }
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Escape `%`, `_` and `\` so a needle matches literally inside `LIKE`.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Runs a scoped search and attaches full answer sets to every hit.
#[derive(Clone)]
pub struct SearchEngine {
    store: SharedStore,
    deadline: Deadline,
    options: SearchOptions,
}

impl SearchEngine {
    pub fn new(store: SharedStore, deadline: Deadline, options: SearchOptions) -> Self {
        Self {
            store,
            deadline,
            options,
        }
    }

    /// Search questions in `scope` for `term`.
    ///
    /// The answer lists in the result are complete, not just the answers
    /// that matched.
    pub async fn search(
        &self,
        term: &str,
        scope: SearchScope,
    ) -> StoreResult<Vec<AggregatedResult>> {
        let Some(query) = build_query(term, scope, &self.options) else {
            tracing::debug!(term, scope = scope.as_str(), "Search term has no usable words");
            return Ok(Vec::new());
        };

        let questions = self
            .deadline
            .run(self.store.search_questions(&query))
            .await?;
        let results = aggregate(self.store.as_ref(), self.deadline, questions).await?;

        tracing::info!(
            term,
            scope = scope.as_str(),
            results = results.len(),
            "Search executed",
        );
        Ok(results)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
