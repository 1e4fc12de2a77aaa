//! Entity resolution: which known participant dominates a result set.

mod detector;
mod keywords;

pub use detector::{
    EntityDetector, EntityScore, EntityScores, SENDER_MATCH_WEIGHT, TEXT_MATCH_WEIGHT,
};
pub use keywords::{EntityKeywords, KeywordTable};
