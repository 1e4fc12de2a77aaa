//! mailgraph-embeddings - Embedding provider implementations for mailgraph.
//!
//! The email index was built with all-MiniLM-L6-v2 (384 dimensions); query
//! vectors must come from the same model family to be comparable.
//!
//! # Supported Providers
//!
//! - **Ollama** (feature: `ollama`) - `all-minilm` served locally, the default
//! - **OpenAI** (feature: `openai`) - text-embedding-3-small with reduced dimensions
//!
//! # Example
//!
//! ```ignore
//! use mailgraph_embeddings::EmbedderFactory;
//!
//! let embedder = EmbedderFactory::ollama()?;
//! let vector = embedder.embed("gas trading desk").await?;
//! assert_eq!(vector.len(), 384);
//! ```

mod factory;
mod ollama;
mod openai;

pub use factory::EmbedderFactory;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAIEmbedder;

// Re-export core types for convenience
pub use mailgraph_core::traits::{Embedder, EmbedderConfig, EmbedderProvider};

use mailgraph_core::error::{MailgraphError, MailgraphResult};

/// Reject vectors whose length does not match the configured dimension.
pub(crate) fn check_dimension(vector: Vec<f32>, expected: usize) -> MailgraphResult<Vec<f32>> {
    if vector.len() != expected {
        return Err(MailgraphError::embedding(format!(
            "Embedding has {} dimensions, expected {}",
            vector.len(),
            expected
        )));
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert_eq!(check_dimension(vec![0.0; 3], 3).unwrap().len(), 3);
        assert!(matches!(
            check_dimension(vec![0.0; 2], 3),
            Err(MailgraphError::Embedding { .. })
        ));
    }
}
