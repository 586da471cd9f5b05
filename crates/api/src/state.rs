use std::sync::Arc;

use qanda_core::aggregate::Aggregator;
use qanda_core::karma::KarmaLedger;
use qanda_core::search::{SearchEngine, SearchOptions};
use qanda_core::store::{Deadline, SharedStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store sits behind an `Arc` and the engines only
/// hold clones of that handle.
#[derive(Clone)]
pub struct AppState {
    /// Question/answer/karma store (PostgreSQL or in-memory).
    pub store: SharedStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-call deadline for direct store calls made by handlers.
    pub deadline: Deadline,
    /// Feed and question-post aggregation.
    pub aggregator: Aggregator,
    /// Scoped search.
    pub search: SearchEngine,
    /// Karma votes and scores.
    pub karma: KarmaLedger,
}

impl AppState {
    /// Wire every engine to the same store handle and deadline.
    pub fn new(store: SharedStore, config: ServerConfig) -> Self {
        let deadline = Deadline(config.store_timeout);
        let options = SearchOptions {
            ranked_topic: config.search_topic.clone(),
        };

        Self {
            aggregator: Aggregator::new(store.clone(), deadline),
            search: SearchEngine::new(store.clone(), deadline, options),
            karma: KarmaLedger::new(store.clone(), deadline),
            store,
            config: Arc::new(config),
            deadline,
        }
    }
}
