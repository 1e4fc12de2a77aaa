//! Cypher statements over `(:Person {email})-[:SENT {subject, date, thread_id}]->(:Person {email})`.

use mailgraph_core::traits::{ActivityBucket, Communicator, Connection, Neighbor, SentEdge};

/// Participants adjacent to `$email` in either direction, with the number of
/// SENT edges between them.
pub const NEIGHBORS: &str = r#"
MATCH (p:Person {email: $email})-[r:SENT]-(connected)
RETURN connected.email AS neighbor, count(r) AS weight
LIMIT $limit
"#;

/// Senders ranked by outgoing message count.
pub const TOP_COMMUNICATORS: &str = r#"
MATCH (p:Person)-[r:SENT]->()
RETURN p.email AS person, count(r) AS sent
ORDER BY sent DESC
LIMIT $limit
"#;

/// Everyone, ranked by how many outgoing SENT relationships they have.
pub const CONNECTIONS: &str = r#"
MATCH (p:Person)
OPTIONAL MATCH (p)-[:SENT]->(other)
RETURN p.email AS person, count(other) AS connections
ORDER BY connections DESC
LIMIT $limit
"#;

/// Sender to recipient pairs with their message counts.
pub const SENT_EDGES: &str = r#"
MATCH (p1:Person)-[:SENT]->(p2:Person)
RETURN p1.email AS source, p2.email AS target, count(*) AS weight
LIMIT $limit
"#;

/// Message counts per date value, oldest first.
pub const ACTIVITY: &str = r#"
MATCH ()-[r:SENT]->()
WHERE r.date IS NOT NULL
RETURN toString(r.date) AS date, count(*) AS count
ORDER BY date
LIMIT $limit
"#;

/// Bolt integers are signed; counts are never negative.
pub(crate) fn count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

pub(crate) fn limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Blank or null neighbors are dropped.
pub(crate) fn neighbor(email: Option<String>, weight: i64) -> Option<Neighbor> {
    let email = email?.trim().to_string();
    (!email.is_empty()).then(|| Neighbor {
        neighbor: email,
        weight: count(weight),
    })
}

pub(crate) fn communicator(person: Option<String>, sent: i64) -> Option<Communicator> {
    let person = person.filter(|p| !p.trim().is_empty())?;
    Some(Communicator {
        person,
        sent: count(sent),
    })
}

pub(crate) fn connection(person: Option<String>, connections: i64) -> Option<Connection> {
    let person = person.filter(|p| !p.trim().is_empty())?;
    Some(Connection {
        person,
        connections: count(connections),
    })
}

pub(crate) fn sent_edge(
    source: Option<String>,
    target: Option<String>,
    weight: i64,
) -> Option<SentEdge> {
    Some(SentEdge {
        source: source.filter(|s| !s.trim().is_empty())?,
        target: target.filter(|t| !t.trim().is_empty())?,
        weight: count(weight),
    })
}

pub(crate) fn activity_bucket(date: Option<String>, messages: i64) -> Option<ActivityBucket> {
    Some(ActivityBucket {
        date: date?,
        count: count(messages),
    })
}
