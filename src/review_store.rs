//! In-memory, append-only review storage

use crate::error::LoadError;
use crate::models::Review;

use hashbrown::HashSet;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared handle to the collection of reviews.
///
/// Clones refer to the same underlying storage. Reviews are only ever appended; nothing is
/// updated or removed for the lifetime of the store.
#[derive(Clone, Debug, Default)]
pub struct ReviewStore {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl ReviewStore {
    /// Returns a new ReviewStore seeded with `reviews`.
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(RwLock::new(reviews)),
        }
    }

    /// Returns a snapshot of every review, in insertion order.
    pub async fn all(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    /// Append a review to the end of the store.
    pub async fn append(&self, review: Review) {
        self.reviews.write().await.push(review);
    }

    /// Number of reviews held.
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    /// Returns whether the store holds no reviews.
    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

/// Load reviews from a CSV file with a header row.
///
/// Columns are matched by name (`ReviewId`, `Location`, `Timestamp`, `ReviewBody`) and any other
/// columns are ignored. Locations are taken as-is, but every timestamp must parse.
///
/// # Arguments
///
/// * `path`: Path to the CSV file
pub fn load_reviews(path: &Path) -> Result<Vec<Review>, LoadError> {
    let reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reviews = read_reviews(reader).map_err(|source| LoadError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} reviews from {}", reviews.len(), path.display());
    Ok(reviews)
}

/// Read reviews from any source of CSV data with a header row.
pub fn read_reviews<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Review>, csv::Error> {
    let reviews = reader
        .deserialize()
        .collect::<Result<Vec<Review>, csv::Error>>()?;
    warn_duplicate_ids(&reviews);
    Ok(reviews)
}

fn warn_duplicate_ids(reviews: &[Review]) {
    let mut seen = HashSet::with_capacity(reviews.len());
    for review in reviews {
        if !seen.insert(review.review_id.as_str()) {
            warn!("Duplicate ReviewId {} in bulk review data", review.review_id);
        }
    }
}
