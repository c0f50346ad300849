use crate::models::*;
use crate::sentiment::SentimentScorer;

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Create a Review from string fields. The timestamp must use [TIMESTAMP_FORMAT].
pub(crate) fn review(id: &str, location: &str, timestamp: &str, body: &str) -> Review {
    Review {
        review_id: id.to_string(),
        location: location.to_string(),
        timestamp: NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).unwrap(),
        review_body: body.to_string(),
    }
}

/// Create a small set of reviews spread over locations and dates.
pub(crate) fn get_test_reviews() -> Vec<Review> {
    vec![
        review("1", "Denver, Colorado", "2024-01-15 08:30:00", "good"),
        review("2", "San Diego, California", "2024-02-01 00:00:00", "bad"),
        review("3", "San Diego, California", "2024-02-14 19:45:10", "great"),
        review("4", "Denver, Colorado", "2024-02-20 12:00:00", "awful"),
        review("5", "San Diego, California", "2024-03-01 09:15:00", "good"),
        review("6", "Tucson, Arizona", "2024-03-10 23:59:00", "fine"),
    ]
}

/// Deterministic scorer returning preset compound scores by exact text.
///
/// Unknown text scores zero.
#[derive(Debug, Default)]
pub(crate) struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    pub(crate) fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores
                .iter()
                .map(|(text, compound)| (text.to_string(), *compound))
                .collect(),
        }
    }

    /// Scores matching the bodies used by [get_test_reviews].
    pub(crate) fn for_test_reviews() -> Self {
        Self::new(&[
            ("good", 0.44),
            ("bad", -0.54),
            ("great", 0.62),
            ("awful", -0.46),
            ("fine", 0.2),
        ])
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> Sentiment {
        let compound = self.scores.get(text).copied().unwrap_or_default();
        Sentiment {
            compound,
            pos: compound.max(0.0),
            neu: 1.0 - compound.abs(),
            neg: (-compound).max(0.0),
        }
    }
}
