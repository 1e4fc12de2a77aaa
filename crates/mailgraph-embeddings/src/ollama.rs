//! Ollama embedding provider implementation.

use async_trait::async_trait;

use mailgraph_core::error::{MailgraphError, MailgraphResult};
use mailgraph_core::traits::{Embedder, EmbedderConfig};

#[cfg(feature = "ollama")]
use ollama_rs::{generation::embeddings::request::GenerateEmbeddingsRequest, Ollama};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// Ollama embedding provider.
pub struct OllamaEmbedder {
    #[cfg(feature = "ollama")]
    client: Ollama,
    config: EmbedderConfig,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder. `base_url` defaults to the local daemon.
    pub fn new(config: EmbedderConfig) -> MailgraphResult<Self> {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL);
        let (host, port) = split_base_url(base_url)?;

        #[cfg(feature = "ollama")]
        let client = Ollama::new(host, port);
        #[cfg(not(feature = "ollama"))]
        let _ = (host, port);

        Ok(Self {
            #[cfg(feature = "ollama")]
            client,
            config,
        })
    }
}

/// Split `http://host:port` into the scheme-qualified host and the port.
fn split_base_url(base_url: &str) -> MailgraphResult<(String, u16)> {
    let url = url::Url::parse(base_url)
        .map_err(|e| MailgraphError::Configuration(format!("Invalid Ollama URL: {}", e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| MailgraphError::Configuration(format!("Ollama URL has no host: {}", base_url)))?;

    Ok((
        format!("{}://{}", url.scheme(), host),
        url.port().unwrap_or(DEFAULT_OLLAMA_PORT),
    ))
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    #[cfg(feature = "ollama")]
    async fn embed(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(self.config.model.clone(), text.into());

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| MailgraphError::embedding(format!("Ollama embedding error: {}", e)))?;

        let embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MailgraphError::embedding("No embedding returned"))?;

        crate::check_dimension(embedding, self.config.embedding_dims)
    }

    #[cfg(not(feature = "ollama"))]
    async fn embed(&self, _text: &str) -> MailgraphResult<Vec<f32>> {
        Err(MailgraphError::UnsupportedProvider {
            provider: "ollama (enable the 'ollama' feature)".to_string(),
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
    fn test_split_base_url() {
        assert_eq!(
            split_base_url("http://localhost:11434").unwrap(),
            ("http://localhost".to_string(), 11434)
        );
        assert_eq!(
            split_base_url("https://ollama.internal").unwrap(),
            ("https://ollama.internal".to_string(), 11434)
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            split_base_url("not a url"),
            Err(MailgraphError::Configuration(_))
        ));
    }

    #[test]
    fn test_defaults_to_minilm() {
        let embedder = OllamaEmbedder::new(EmbedderConfig::default()).unwrap();
        assert_eq!(embedder.model_name(), "all-minilm");
        assert_eq!(embedder.dimension(), 384);
    }
}
