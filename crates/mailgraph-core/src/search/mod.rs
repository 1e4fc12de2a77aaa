//! Request-level search orchestration.

mod service;

pub use service::{SearchConfig, SearchOutcome, SearchService, MAX_TOP_K};
