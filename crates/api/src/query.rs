//! Shared query parameter types for API handlers.

use qanda_core::search::SearchScope;
use serde::Deserialize;

/// Feed paging (`?limit=`). Clamped against the configured feed size in the
/// handler.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub limit: Option<i64>,
}

/// Search parameters (`?q=&scope=`). A missing scope searches everything.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub scope: SearchScope,
}
