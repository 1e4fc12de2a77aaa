//! Configuration system for mailgraph.
//!
//! Configuration comes from a file (TOML, JSON or YAML), from environment
//! variables, or both: [`MailgraphConfig::load`] reads the file and then
//! overlays the environment. Credentials are only ever read from the file
//! or the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entity::KeywordTable;
use crate::error::{MailgraphError, MailgraphResult};
use crate::graph::AssemblerConfig;
use crate::search::SearchConfig;
use crate::traits::{
    EmbedderConfig, EmbedderProvider, GraphStoreConfig, GraphStoreProvider, VectorStoreConfig,
};

/// Embedder provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbedderProviderConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: EmbedderProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: EmbedderConfig,
}

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MailgraphConfig {
    /// Embedder configuration.
    pub embedder: EmbedderProviderConfig,
    /// Vector store configuration.
    pub vector_store: VectorStoreConfig,
    /// Graph store configuration (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_store: Option<GraphStoreConfig>,
    /// Retrieval settings.
    pub search: SearchConfig,
    /// Graph assembly settings.
    pub graph: AssemblerConfig,
    /// Known entities and their keyword fragments, in tie-break order.
    pub entities: KeywordTable,
}

impl MailgraphConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> MailgraphResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| MailgraphError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| MailgraphError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| MailgraphError::Configuration(e.to_string())),
            _ => Err(MailgraphError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load `MAILGRAPH_CONFIG` (or `~/.mailgraph/config.toml` if present),
    /// then overlay environment variables.
    pub fn load() -> MailgraphResult<Self> {
        let path = std::env::var("MAILGRAPH_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(|| default_config_path().filter(|p| p.exists()));

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Embedder
        if let Some(provider) = var("MAILGRAPH_EMBEDDER") {
            match provider.to_lowercase().as_str() {
                "openai" => {
                    self.embedder.provider = EmbedderProvider::OpenAI;
                    self.embedder.config.model = "text-embedding-3-small".to_string();
                }
                "ollama" => self.embedder.provider = EmbedderProvider::Ollama,
                other => tracing::warn!(provider = other, "Unknown embedder provider, ignoring"),
            }
        }
        if let Some(model) = var("MAILGRAPH_EMBEDDING_MODEL") {
            self.embedder.config.model = model;
        }
        if let Some(dims) = var("MAILGRAPH_EMBEDDING_DIMS").and_then(|d| d.parse().ok()) {
            self.embedder.config.embedding_dims = dims;
            self.vector_store.dimension = dims;
        }
        if self.embedder.provider == EmbedderProvider::OpenAI {
            if let Some(api_key) = var("OPENAI_API_KEY") {
                self.embedder.config.api_key = Some(api_key);
            }
        }
        if self.embedder.provider == EmbedderProvider::Ollama {
            if let Some(host) = var("OLLAMA_HOST") {
                self.embedder.config.base_url = Some(host);
            }
        }

        // Vector store
        if let Some(api_key) = var("PINECONE_API_KEY") {
            self.vector_store.api_key = Some(api_key);
        }
        if let Some(index) = var("PINECONE_INDEX") {
            self.vector_store.index_name = index;
        }
        if let Some(host) = var("PINECONE_HOST") {
            self.vector_store.host = Some(host);
        }
        if let Some(namespace) = var("PINECONE_NAMESPACE") {
            self.vector_store.namespace = Some(namespace);
        }

        // Graph store
        if let Some(url) = var("NEO4J_URI") {
            let graph_store = self.graph_store.get_or_insert_with(GraphStoreConfig::default);
            graph_store.url = url;
        }
        if let Some(graph_store) = self.graph_store.as_mut() {
            if let Some(user) = var("NEO4J_USER") {
                graph_store.username = Some(user);
            }
            if let Some(password) = var("NEO4J_PASSWORD") {
                graph_store.password = Some(password);
            }
            if let Some(database) = var("NEO4J_DATABASE") {
                graph_store.database = Some(database);
            }
            if var("MAILGRAPH_GRAPH_STORE").as_deref() == Some("memgraph") {
                graph_store.provider = GraphStoreProvider::Memgraph;
            }
        }

        // Search
        if let Some(top_k) = var("MAILGRAPH_TOP_K").and_then(|k| k.parse().ok()) {
            self.search.top_k = top_k;
        }
    }
}

/// `~/.mailgraph/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mailgraph").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MailgraphConfig::default();
        assert_eq!(config.embedder.provider, EmbedderProvider::Ollama);
        assert_eq!(config.embedder.config.embedding_dims, 384);
        assert_eq!(config.vector_store.index_name, "enron-enterprise-kg");
        assert!(config.graph_store.is_none());
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.graph.neighbor_limit, 25);
        assert_eq!(config.graph.max_recipients_per_result, 3);
        assert_eq!(config.entities.len(), 7);
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [
            ("PINECONE_API_KEY", "pc-key"),
            ("NEO4J_URI", "neo4j+s://example.databases.neo4j.io"),
            ("NEO4J_USER", "neo4j"),
            ("NEO4J_PASSWORD", "secret"),
            ("MAILGRAPH_EMBEDDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("MAILGRAPH_TOP_K", "8"),
        ]
        .into_iter()
        .collect();

        let mut config = MailgraphConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.vector_store.api_key.as_deref(), Some("pc-key"));
        let graph_store = config.graph_store.unwrap();
        assert_eq!(graph_store.url, "neo4j+s://example.databases.neo4j.io");
        assert_eq!(graph_store.username.as_deref(), Some("neo4j"));
        assert_eq!(graph_store.password.as_deref(), Some("secret"));
        assert_eq!(config.embedder.provider, EmbedderProvider::OpenAI);
        assert_eq!(config.embedder.config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.search.top_k, 8);
    }

    #[test]
    fn test_neo4j_credentials_ignored_without_uri() {
        let mut config = MailgraphConfig::default();
        config.apply_env(|key| (key == "NEO4J_USER").then(|| "neo4j".to_string()));
        assert!(config.graph_store.is_none());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[search]
top_k = 10

[graph_store]
url = "bolt://graph:7687"
username = "neo4j"

[[entities]]
key = "kenneth.lay@enron.com"
keywords = ["Kenneth", "lay"]

[[entities]]
key = "jeff.skilling@enron.com"
keywords = ["skilling"]
"#
        )
        .unwrap();

        let config = MailgraphConfig::from_file(file.path()).unwrap();
        assert_eq!(config.search.top_k, 10);
        assert_eq!(config.search.body_preview_chars, 500);
        assert_eq!(config.graph_store.unwrap().url, "bolt://graph:7687");
        let keys: Vec<&str> = config.entities.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["kenneth.lay@enron.com", "jeff.skilling@enron.com"]);
        let (_, fragments) = config.entities.iter().next().unwrap();
        assert_eq!(fragments[0], "kenneth");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            MailgraphConfig::from_file(file.path()),
            Err(MailgraphError::Configuration(_))
        ));
    }
}
