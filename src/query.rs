//! Filtering and ranking of reviews for the read path

use crate::error::ReviewError;
use crate::models::{Review, ReviewQuery, ScoredReview, DATE_FORMAT};
use crate::sentiment::SentimentScorer;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use strum_macros::Display;

/// Which end of the date range a query parameter bounds
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum DateBound {
    /// `start_date`, inclusive
    #[strum(serialize = "start_date")]
    Start,
    /// `end_date`, inclusive
    #[strum(serialize = "end_date")]
    End,
}

impl DateBound {
    /// Parse a `YYYY-MM-DD` date into the midnight at the start of that day.
    ///
    /// The year must be four digits. Month and day may drop their leading zero. Signs and
    /// surrounding whitespace are rejected.
    pub fn parse(self, date: &str) -> Result<NaiveDateTime, ReviewError> {
        if !has_date_shape(date) {
            return Err(ReviewError::InvalidDate { bound: self });
        }
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| ReviewError::InvalidDate { bound: self })
    }
}

/// Returns whether `date` is three dash-separated runs of ASCII digits of lengths 4, 1-2 and 1-2.
fn has_date_shape(date: &str) -> bool {
    let digits = |part: &str, lengths: std::ops::RangeInclusive<usize>| {
        lengths.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4..=4) && digits(month, 1..=2) && digits(day, 1..=2)
        }
        _ => false,
    }
}

/// Criteria a review must satisfy to be returned by the read path
///
/// Both date bounds are midnight of the given day, so a review written later on the `end_date`
/// day falls outside the range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewFilter {
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl ReviewFilter {
    /// Build a filter from query parameters.
    ///
    /// Empty parameters are ignored. `start_date` is parsed before `end_date`, so when both are
    /// malformed the error names `start_date`.
    pub fn from_query(query: &ReviewQuery) -> Result<Self, ReviewError> {
        let start = non_empty(&query.start_date)
            .map(|date| DateBound::Start.parse(date))
            .transpose()?;
        let end = non_empty(&query.end_date)
            .map(|date| DateBound::End.parse(date))
            .transpose()?;
        Ok(ReviewFilter {
            location: non_empty(&query.location).map(str::to_string),
            start,
            end,
        })
    }

    /// Returns whether a review satisfies every criterion of this filter.
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(location) = &self.location {
            if review.location != *location {
                return false;
            }
        }
        if let Some(start) = self.start {
            if review.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if review.timestamp > end {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Score every review and order them by descending compound sentiment.
///
/// The sort is stable: reviews with equal compound scores keep their store order.
pub fn rank<I>(reviews: I, scorer: &dyn SentimentScorer) -> Vec<ScoredReview>
where
    I: IntoIterator<Item = Review>,
{
    let mut scored: Vec<ScoredReview> = reviews
        .into_iter()
        .map(|review| {
            let sentiment = scorer.score(&review.review_body);
            ScoredReview::new(review, sentiment)
        })
        .collect();
    scored.sort_by(|a, b| b.sentiment.compound.total_cmp(&a.sentiment.compound));
    scored
}

/// Apply a filter to a snapshot of the store and rank the survivors.
pub fn filter_and_rank(
    reviews: Vec<Review>,
    filter: &ReviewFilter,
    scorer: &dyn SentimentScorer,
) -> Vec<ScoredReview> {
    rank(
        reviews.into_iter().filter(|review| filter.matches(review)),
        scorer,
    )
}
