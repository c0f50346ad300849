use crate::cli::CommandLineArgs;
use crate::models::Review;
use crate::review_store::ReviewStore;
use crate::sentiment::{CachedScorer, SentimentScorer, VaderScorer};

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// Review store.
    pub store: ReviewStore,

    /// Sentiment scorer used by the read path.
    pub scorer: Box<dyn SentimentScorer>,
}

impl AppState {
    /// Create and return an [AppState] seeded with `reviews`.
    ///
    /// Scores with VADER, memoised when the sentiment cache is enabled.
    pub fn new(args: &CommandLineArgs, reviews: Vec<Review>) -> Self {
        let scorer: Box<dyn SentimentScorer> = if args.sentiment_cache {
            Box::new(CachedScorer::new(VaderScorer::new()))
        } else {
            Box::new(VaderScorer::new())
        };
        Self::with_scorer(args, ReviewStore::new(reviews), scorer)
    }

    /// Create and return an [AppState] from its parts.
    pub fn with_scorer(
        args: &CommandLineArgs,
        store: ReviewStore,
        scorer: Box<dyn SentimentScorer>,
    ) -> Self {
        Self {
            args: args.clone(),
            store,
            scorer,
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
