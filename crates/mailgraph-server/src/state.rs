//! Server state management.

use std::sync::Arc;

use mailgraph_core::traits::GraphStore;
use mailgraph_core::SearchService;

/// Shared application state.
///
/// Everything is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: SearchService,
    graph_store: Option<Arc<dyn GraphStore>>,
}

impl AppState {
    /// `graph_store` should be the same store the service's assembler uses;
    /// the insight endpoints query it directly.
    pub fn new(service: SearchService, graph_store: Option<Arc<dyn GraphStore>>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                graph_store,
            }),
        }
    }

    pub fn service(&self) -> &SearchService {
        &self.inner.service
    }

    pub fn graph_store(&self) -> Option<&Arc<dyn GraphStore>> {
        self.inner.graph_store.as_ref()
    }
}
