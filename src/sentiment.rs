//! Sentiment scoring of review text

use crate::models::Sentiment;

use cached::{Cached, UnboundCache};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores the sentiment of a piece of text.
///
/// Implementations must be pure: the same text always yields the same scores.
pub trait SentimentScorer: Send + Sync {
    /// Returns the sentiment scores of `text`.
    fn score(&self, text: &str) -> Sentiment;
}

impl Sentiment {
    /// Build a [Sentiment] from VADER polarity scores. Missing keys score zero.
    pub fn from_polarity_scores(scores: &HashMap<&str, f64>) -> Self {
        let get = |key: &str| scores.get(key).copied().unwrap_or_default();
        Sentiment {
            compound: get("compound"),
            pos: get("pos"),
            neu: get("neu"),
            neg: get("neg"),
        }
    }
}

/// Lexicon-based scorer backed by the VADER sentiment analyser.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    /// Returns a new VaderScorer using the bundled VADER lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> Sentiment {
        Sentiment::from_polarity_scores(&self.analyzer.polarity_scores(text))
    }
}

/// Memoising wrapper around another [SentimentScorer].
///
/// Scores are keyed by the MD5 digest of the text. Review bodies never change once stored, so
/// a cached score is always the score the wrapped scorer would return.
pub struct CachedScorer<S> {
    inner: S,
    cache: Mutex<UnboundCache<[u8; 16], Sentiment>>,
}

impl<S: SentimentScorer> CachedScorer<S> {
    /// Returns a new CachedScorer wrapping `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(UnboundCache::new()),
        }
    }

    /// Number of distinct texts scored so far.
    pub fn len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_size()
    }

    /// Returns whether nothing has been scored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: SentimentScorer> SentimentScorer for CachedScorer<S> {
    fn score(&self, text: &str) -> Sentiment {
        let key = md5::compute(text).0;
        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_get(&key)
            .copied();
        if let Some(sentiment) = cached {
            return sentiment;
        }
        // Score without holding the lock.
        let sentiment = self.inner.score(text);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_set(key, sentiment);
        sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedScorer;

    #[test]
    fn from_polarity_scores() {
        let scores = HashMap::from([("neg", 0.1), ("neu", 0.2), ("pos", 0.7), ("compound", 0.6)]);
        let sentiment = Sentiment::from_polarity_scores(&scores);
        assert_eq!(
            Sentiment {
                compound: 0.6,
                pos: 0.7,
                neu: 0.2,
                neg: 0.1
            },
            sentiment
        );
    }

    #[test]
    fn from_polarity_scores_missing_keys() {
        let scores = HashMap::from([("compound", -0.3)]);
        let sentiment = Sentiment::from_polarity_scores(&scores);
        assert_eq!(-0.3, sentiment.compound);
        assert_eq!(0.0, sentiment.pos);
    }

    #[test]
    fn vader_positive() {
        let sentiment = VaderScorer::new().score("Great service, the staff were wonderful!");
        assert!(sentiment.compound > 0.5, "{sentiment:?}");
        assert!(sentiment.pos > sentiment.neg, "{sentiment:?}");
    }

    #[test]
    fn vader_negative() {
        let sentiment = VaderScorer::new().score("Terrible food and awful, rude staff.");
        assert!(sentiment.compound < -0.5, "{sentiment:?}");
        assert!(sentiment.neg > sentiment.pos, "{sentiment:?}");
    }

    #[test]
    fn vader_scores_in_range() {
        let scorer = VaderScorer::new();
        for text in ["ok", "The table was by the window.", "not bad at all", "I hate it"] {
            let sentiment = scorer.score(text);
            assert!((-1.0..=1.0).contains(&sentiment.compound), "{text}: {sentiment:?}");
            for proportion in [sentiment.pos, sentiment.neu, sentiment.neg] {
                assert!((0.0..=1.0).contains(&proportion), "{text}: {sentiment:?}");
            }
        }
    }

    #[test]
    fn vader_is_deterministic() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.score("Great service"), scorer.score("Great service"));
    }

    #[test]
    fn cached_scorer_matches_inner() {
        let scorer = CachedScorer::new(FixedScorer::new(&[("good", 0.5), ("bad", -0.5)]));
        assert!(scorer.is_empty());
        assert_eq!(0.5, scorer.score("good").compound);
        assert_eq!(-0.5, scorer.score("bad").compound);
        assert_eq!(0.5, scorer.score("good").compound);
        assert_eq!(2, scorer.len());
    }

    #[test]
    fn cached_vader_matches_vader() {
        let vader = VaderScorer::new();
        let cached = CachedScorer::new(VaderScorer::new());
        for text in ["Great service", "Terrible food", "Great service"] {
            assert_eq!(vader.score(text), cached.score(text));
        }
        assert_eq!(2, cached.len());
    }
}
