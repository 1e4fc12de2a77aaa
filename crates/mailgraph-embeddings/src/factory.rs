//! Factory for creating embedding providers.

use std::sync::Arc;

use mailgraph_core::error::MailgraphResult;
use mailgraph_core::traits::{Embedder, EmbedderConfig, EmbedderProvider};
use tracing::info;

use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAIEmbedder;

/// Factory for creating embedding providers.
pub struct EmbedderFactory;

impl EmbedderFactory {
    /// Create an embedder from the given configuration.
    pub fn create(
        provider: EmbedderProvider,
        config: EmbedderConfig,
    ) -> MailgraphResult<Arc<dyn Embedder>> {
        info!(?provider, model = %config.model, dims = config.embedding_dims, "Creating embedder");
        match provider {
            EmbedderProvider::OpenAI => Ok(Arc::new(OpenAIEmbedder::new(config)?)),
            EmbedderProvider::Ollama => Ok(Arc::new(OllamaEmbedder::new(config)?)),
        }
    }
}
