//! Neo4j graph store implementation (also used for Memgraph).

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query};
use tracing::{debug, info};

use mailgraph_core::error::{MailgraphError, MailgraphResult};
use mailgraph_core::traits::{
    ActivityBucket, Communicator, Connection, GraphStore, GraphStoreConfig, GraphStoreProvider,
    Neighbor, SentEdge,
};

use crate::cypher;

/// Bolt-backed graph store.
pub struct Neo4jGraphStore {
    graph: Graph,
}

impl Neo4jGraphStore {
    /// Connect to the server at `config.url`.
    pub async fn new(config: GraphStoreConfig) -> MailgraphResult<Self> {
        let default_user = match config.provider {
            GraphStoreProvider::Neo4j => "neo4j",
            GraphStoreProvider::Memgraph => "memgraph",
        };
        let username = config.username.as_deref().unwrap_or(default_user);
        let password = config.password.as_deref().unwrap_or_default();

        let mut builder = ConfigBuilder::default()
            .uri(config.url.as_str())
            .user(username)
            .password(password);
        if let Some(database) = config.database.as_deref() {
            builder = builder.db(database);
        }
        let bolt_config = builder.build().map_err(|e| {
            MailgraphError::Configuration(format!("Invalid graph store configuration: {}", e))
        })?;

        let graph = Graph::connect(bolt_config).await.map_err(|e| {
            MailgraphError::graph_connection(format!(
                "Failed to connect to {:?} at {}: {}",
                config.provider, config.url, e
            ))
        })?;

        // The pool connects lazily.
        graph.run(query("RETURN 1")).await.map_err(|e| {
            MailgraphError::graph_connection(format!("Graph store is not reachable: {}", e))
        })?;

        info!(provider = ?config.provider, url = %config.url, "Connected to graph store");
        Ok(Self { graph })
    }

    /// Run `q` and hand every row to `f`, keeping the `Some` results.
    async fn collect<T, F>(&self, q: Query, what: &str, f: F) -> MailgraphResult<Vec<T>>
    where
        F: Fn(&neo4rs::Row) -> Option<T>,
    {
        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| MailgraphError::graph_store(format!("Failed to query {}: {}", what, e)))?;

        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| MailgraphError::graph_store(format!("Failed to fetch row: {}", e)))?
        {
            if let Some(item) = f(&row) {
                rows.push(item);
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn neighbors(&self, entity: &str, limit: usize) -> MailgraphResult<Vec<Neighbor>> {
        let q = query(cypher::NEIGHBORS)
            .param("email", entity.to_string())
            .param("limit", cypher::limit(limit));

        let neighbors = self
            .collect(q, "neighbors", |row| {
                cypher::neighbor(
                    row.get::<Option<String>>("neighbor").ok().flatten(),
                    row.get::<i64>("weight").unwrap_or_default(),
                )
            })
            .await?;

        debug!(entity, rows = neighbors.len(), "Neighbor query returned");
        Ok(neighbors)
    }

    async fn top_communicators(&self, limit: usize) -> MailgraphResult<Vec<Communicator>> {
        let q = query(cypher::TOP_COMMUNICATORS).param("limit", cypher::limit(limit));

        self.collect(q, "top communicators", |row| {
            cypher::communicator(
                row.get::<Option<String>>("person").ok().flatten(),
                row.get::<i64>("sent").unwrap_or_default(),
            )
        })
        .await
    }

    async fn connections(&self, limit: usize) -> MailgraphResult<Vec<Connection>> {
        let q = query(cypher::CONNECTIONS).param("limit", cypher::limit(limit));

        self.collect(q, "connections", |row| {
            cypher::connection(
                row.get::<Option<String>>("person").ok().flatten(),
                row.get::<i64>("connections").unwrap_or_default(),
            )
        })
        .await
    }

    async fn activity(&self, limit: usize) -> MailgraphResult<Vec<ActivityBucket>> {
        let q = query(cypher::ACTIVITY).param("limit", cypher::limit(limit));

        self.collect(q, "activity", |row| {
            cypher::activity_bucket(
                row.get::<Option<String>>("date").ok().flatten(),
                row.get::<i64>("count").unwrap_or_default(),
            )
        })
        .await
    }

    async fn sent_edges(&self, limit: usize) -> MailgraphResult<Vec<SentEdge>> {
        let q = query(cypher::SENT_EDGES).param("limit", cypher::limit(limit));

        let edges = self
            .collect(q, "sent edges", |row| {
                cypher::sent_edge(
                    row.get::<Option<String>>("source").ok().flatten(),
                    row.get::<Option<String>>("target").ok().flatten(),
                    row.get::<i64>("weight").unwrap_or_default(),
                )
            })
            .await?;

        debug!(rows = edges.len(), "Sent edge sample returned");
        Ok(edges)
    }
}
