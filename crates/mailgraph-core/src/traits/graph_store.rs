//! Graph store trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MailgraphResult;

/// A participant adjacent to a queried entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Neighbor identifier (email address).
    pub neighbor: String,
    /// Number of messages exchanged with the queried entity.
    pub weight: u64,
}

/// A participant ranked by number of messages sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communicator {
    pub person: String,
    pub sent: u64,
}

/// A participant ranked by the number of people they wrote to at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub person: String,
    pub connections: u64,
}

/// Aggregated `SENT` traffic from one participant to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Message count for one date value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityBucket {
    pub date: String,
    pub count: u64,
}

/// Core GraphStore trait - read access to the communication graph.
///
/// The store models `(:Person {email})-[:SENT]->(:Person {email})`.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Entities that exchanged messages with `entity`, aggregated by message
    /// count, at most `limit` rows.
    async fn neighbors(&self, entity: &str, limit: usize) -> MailgraphResult<Vec<Neighbor>>;

    /// Participants with the most sent messages, descending.
    async fn top_communicators(&self, limit: usize) -> MailgraphResult<Vec<Communicator>>;

    /// Participants by number of outgoing `SENT` relationships, descending.
    /// People who never sent anything are included with zero.
    async fn connections(&self, limit: usize) -> MailgraphResult<Vec<Connection>>;

    /// Message counts per date, ascending by date.
    async fn activity(&self, limit: usize) -> MailgraphResult<Vec<ActivityBucket>>;

    /// A sample of sender to recipient pairs with their message counts.
    async fn sent_edges(&self, limit: usize) -> MailgraphResult<Vec<SentEdge>>;
}

/// Graph store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStoreConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: GraphStoreProvider,
    /// Connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Username for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Database name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

fn default_url() -> String {
    "bolt://localhost:7687".to_string()
}

impl Default for GraphStoreConfig {
    fn default() -> Self {
        Self {
            provider: GraphStoreProvider::Neo4j,
            url: default_url(),
            username: None,
            password: None,
            database: None,
        }
    }
}

/// Graph store provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphStoreProvider {
    #[default]
    Neo4j,
    Memgraph,
}
