//! Keyword scoring over a result set to find the dominant entity.

use serde::Serialize;
use tracing::debug;

use super::keywords::KeywordTable;
use crate::types::{EntityKey, SearchResult, UNKNOWN};

/// Score added when a fragment appears in a result's sender.
pub const SENDER_MATCH_WEIGHT: u32 = 3;

/// Score added when a fragment appears in subject or body (sender missed).
pub const TEXT_MATCH_WEIGHT: u32 = 1;

/// Accumulated score for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityScore {
    pub entity: EntityKey,
    pub score: u32,
}

/// Scores for every entity of the table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityScores(Vec<EntityScore>);

impl EntityScores {
    pub fn iter(&self) -> impl Iterator<Item = &EntityScore> {
        self.0.iter()
    }

    pub fn get(&self, entity: &EntityKey) -> Option<u32> {
        self.0.iter().find(|s| &s.entity == entity).map(|s| s.score)
    }

    /// The entity with the strictly highest positive score. Ties go to the
    /// entity declared first.
    pub fn best(&self) -> Option<&EntityKey> {
        let mut best: Option<&EntityScore> = None;
        for candidate in &self.0 {
            if candidate.score > best.map_or(0, |b| b.score) {
                best = Some(candidate);
            }
        }
        best.map(|b| &b.entity)
    }
}

/// Detects the dominant known entity in a set of search results.
///
/// Pure: the outcome depends only on the results and the keyword table.
#[derive(Debug, Clone, Default)]
pub struct EntityDetector {
    table: KeywordTable,
}

impl EntityDetector {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Score every entity against `results`.
    ///
    /// For each result and each (entity, fragment) pair, a case-insensitive
    /// match in the sender adds [`SENDER_MATCH_WEIGHT`]; otherwise a match
    /// in `subject + " " + body` adds [`TEXT_MATCH_WEIGHT`]. Fields holding
    /// the [`UNKNOWN`] placeholder never match.
    pub fn score(&self, results: &[SearchResult]) -> EntityScores {
        let mut scores: Vec<EntityScore> = self
            .table
            .iter()
            .map(|(entity, _)| EntityScore {
                entity: entity.clone(),
                score: 0,
            })
            .collect();

        for result in results {
            let sender = known(result.sender()).map(str::to_lowercase);
            let text = match known(result.subject()) {
                Some(subject) => format!("{} {}", subject, result.body()),
                None => result.body().to_string(),
            }
            .to_lowercase();

            for (slot, (_, fragments)) in scores.iter_mut().zip(self.table.iter()) {
                for fragment in fragments {
                    let in_sender = sender
                        .as_deref()
                        .is_some_and(|sender| sender.contains(fragment.as_str()));
                    if in_sender {
                        slot.score += SENDER_MATCH_WEIGHT;
                    } else if text.contains(fragment.as_str()) {
                        slot.score += TEXT_MATCH_WEIGHT;
                    }
                }
            }
        }

        EntityScores(scores)
    }

    /// Return the best-scoring entity, or `None` when nothing matched.
    pub fn detect(&self, results: &[SearchResult]) -> Option<EntityKey> {
        if results.is_empty() {
            return None;
        }

        let scores = self.score(results);
        let best = scores.best().cloned();
        debug!(
            results = results.len(),
            entity = best.as_ref().map(EntityKey::as_str),
            "Entity detection finished"
        );
        best
    }
}

fn known(field: &str) -> Option<&str> {
    (field != UNKNOWN).then_some(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(sender: &str, subject: &str, body: &str) -> SearchResult {
        SearchResult::builder()
            .sender(sender)
            .subject(subject)
            .body(body)
            .build()
    }

    #[test]
    fn test_sender_match_wins() {
        let detector = EntityDetector::new(
            KeywordTable::new().with_entity("sherron.watkins@x", ["sherron", "watkins"]),
        );
        let results = vec![result("sherron.watkins@x", "", "accounting concerns")];

        let scores = detector.score(&results);
        // Both fragments hit the sender.
        assert_eq!(scores.get(&"sherron.watkins@x".into()), Some(6));
        assert_eq!(detector.detect(&results), Some("sherron.watkins@x".into()));
    }

    #[test]
    fn test_body_match_only_when_sender_misses() {
        let detector = EntityDetector::new(KeywordTable::new().with_entity("ken@x", ["lay"]));
        let results = vec![result("Lay@x", "", "lay lay lay")];
        assert_eq!(detector.score(&results).get(&"ken@x".into()), Some(3));

        let results = vec![result("someone@x", "Re: LAY", "")];
        assert_eq!(detector.score(&results).get(&"ken@x".into()), Some(1));
    }

    #[test]
    fn test_empty_results_and_no_match() {
        let detector = EntityDetector::default();
        assert_eq!(detector.detect(&[]), None);
        assert_eq!(
            detector.detect(&[result("nobody@x", "weather", "sunny")]),
            None
        );
    }

    #[test]
    fn test_placeholder_fields_never_score() {
        let detector = EntityDetector::new(KeywordTable::new().with_entity("owen@x", ["own"]));
        let results = vec![SearchResult::builder().build()];

        assert_eq!(detector.score(&results).get(&"owen@x".into()), Some(0));
        assert_eq!(detector.detect(&results), None);

        // A real body still counts when sender and subject are missing.
        let results = vec![SearchResult::builder().body("known unknowns").build()];
        assert_eq!(detector.score(&results).get(&"owen@x".into()), Some(1));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let detector = EntityDetector::new(
            KeywordTable::new()
                .with_entity("first@x", ["alpha"])
                .with_entity("second@x", ["beta"]),
        );
        let results = vec![result("x@x", "alpha", "beta")];
        for _ in 0..5 {
            assert_eq!(detector.detect(&results), Some("first@x".into()));
        }
    }

    #[test]
    fn test_higher_score_beats_declaration_order() {
        let detector = EntityDetector::new(
            KeywordTable::new()
                .with_entity("first@x", ["alpha"])
                .with_entity("second@x", ["beta"]),
        );
        let results = vec![result("beta@x", "alpha", "")];
        assert_eq!(detector.detect(&results), Some("second@x".into()));
    }
}
