//! OpenAI embedding provider implementation.

use async_trait::async_trait;

use mailgraph_core::error::{MailgraphError, MailgraphResult};
use mailgraph_core::traits::{Embedder, EmbedderConfig};

#[cfg(feature = "openai")]
use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequest, EmbeddingInput},
    Client,
};

/// OpenAI embedding provider.
///
/// Requests `embedding_dims` dimensions explicitly so that
/// `text-embedding-3-*` vectors line up with a 384-dimension index.
pub struct OpenAIEmbedder {
    #[cfg(feature = "openai")]
    client: Client<OpenAIConfig>,
    config: EmbedderConfig,
}

impl OpenAIEmbedder {
    /// Create a new OpenAI embedder. The API key must be present in `config`.
    pub fn new(config: EmbedderConfig) -> MailgraphResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            MailgraphError::Configuration(
                "OpenAI API key not found. Set OPENAI_API_KEY or provide api_key in config."
                    .to_string(),
            )
        })?;

        #[cfg(feature = "openai")]
        let client = {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(ref base_url) = config.base_url {
                openai_config = openai_config.with_api_base(base_url);
            }
            Client::with_config(openai_config)
        };
        #[cfg(not(feature = "openai"))]
        let _ = api_key;

        Ok(Self {
            #[cfg(feature = "openai")]
            client,
            config,
        })
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[cfg(feature = "openai")]
    async fn embed(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        let request = CreateEmbeddingRequest {
            model: self.config.model.clone(),
            input: EmbeddingInput::String(text.to_string()),
            dimensions: u32::try_from(self.config.embedding_dims).ok(),
            ..Default::default()
        };

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| MailgraphError::embedding(format!("OpenAI embedding error: {}", e)))?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| MailgraphError::embedding("No embedding returned"))?;

        crate::check_dimension(embedding.embedding, self.config.embedding_dims)
    }

    #[cfg(not(feature = "openai"))]
    async fn embed(&self, _text: &str) -> MailgraphResult<Vec<f32>> {
        Err(MailgraphError::UnsupportedProvider {
            provider: "openai (enable the 'openai' feature)".to_string(),
        })
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dims
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = OpenAIEmbedder::new(EmbedderConfig::default());
        assert!(matches!(result, Err(MailgraphError::Configuration(_))));
    }

    #[test]
    fn test_reports_configured_model() {
        let embedder = OpenAIEmbedder::new(EmbedderConfig {
            model: "text-embedding-3-small".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(embedder.model_name(), "text-embedding-3-small");
        assert_eq!(embedder.dimension(), 384);
    }
}
