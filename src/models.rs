//! Data types and associated functions and methods

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::ReviewError;

/// Format of review timestamps, both stored and serialised.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the `start_date` and `end_date` query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Locations accepted for newly submitted reviews.
pub const PERMITTED_LOCATIONS: [&str; 18] = [
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

/// Returns whether `location` is one of the [PERMITTED_LOCATIONS].
pub fn is_permitted_location(location: &str) -> bool {
    PERMITTED_LOCATIONS.contains(&location)
}

/// (De)serialise a [NaiveDateTime] using [TIMESTAMP_FORMAT].
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;

    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let timestamp = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

/// A customer review as held in the store
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Review {
    /// Unique identifier
    pub review_id: String,
    /// City and state the review refers to
    pub location: String,
    /// Time the review was written
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// Free text of the review
    pub review_body: String,
}

impl Review {
    /// Return a new Review with a fresh identifier, stamped with the current local time.
    pub fn new(location: String, review_body: String) -> Self {
        Review {
            review_id: Uuid::new_v4().to_string(),
            location,
            timestamp: Local::now().naive_local().trunc_subsecs(0),
            review_body,
        }
    }
}

/// Sentiment scores of a piece of text
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Sentiment {
    /// Normalised aggregate score in [-1, 1]
    pub compound: f64,
    /// Proportion of positive text
    pub pos: f64,
    /// Proportion of neutral text
    pub neu: f64,
    /// Proportion of negative text
    pub neg: f64,
}

/// A review together with its sentiment, as returned by the read path
#[derive(Debug, PartialEq, Serialize)]
pub struct ScoredReview {
    #[serde(rename = "ReviewId")]
    pub review_id: String,
    #[serde(rename = "ReviewBody")]
    pub review_body: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub sentiment: Sentiment,
}

impl ScoredReview {
    /// Attach a sentiment to a review.
    pub fn new(review: Review, sentiment: Sentiment) -> Self {
        ScoredReview {
            review_id: review.review_id,
            review_body: review.review_body,
            location: review.location,
            timestamp: review.timestamp,
            sentiment,
        }
    }
}

/// Query parameters of the read path
///
/// Dates are kept as strings here so that a malformed date produces our own error message rather
/// than a generic url-encoded decode error.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ReviewQuery {
    /// Exact location to match
    pub location: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Inclusive upper bound at midnight, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Form body of the write path
#[derive(Debug, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewSubmission {
    /// City and state, one of [PERMITTED_LOCATIONS]
    #[validate(required, length(min = 1), custom = "validate_location")]
    pub location: Option<String>,
    /// Free text of the review
    #[validate(required, length(min = 1))]
    pub review_body: Option<String>,
}

impl ReviewSubmission {
    /// Convert a validated submission into a new [Review].
    pub fn into_review(self) -> Result<Review, ReviewError> {
        match (self.location, self.review_body) {
            (Some(location), Some(review_body)) => Ok(Review::new(location, review_body)),
            _ => Err(ReviewError::Internal {
                message: "review submission was not validated".to_string(),
            }),
        }
    }
}

/// Validate a submitted location
fn validate_location(location: &str) -> Result<(), ValidationError> {
    if !is_permitted_location(location) {
        let mut error = ValidationError::new("Location is not permitted");
        error.add_param("location".into(), &location);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use regex::Regex;
    use serde_test::{assert_de_tokens_error, assert_ser_tokens, Token};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_permitted_locations() {
        assert!(is_permitted_location("Denver, Colorado"));
        assert!(is_permitted_location("Tucson, Arizona"));
        assert!(!is_permitted_location("Nowhere"));
        assert!(!is_permitted_location("denver, colorado"));
        assert!(!is_permitted_location(""));
    }

    #[test]
    fn test_review_serialise() {
        let review = Review {
            review_id: "1".to_string(),
            location: "Denver, Colorado".to_string(),
            timestamp: timestamp(),
            review_body: "Great service".to_string(),
        };
        assert_ser_tokens(
            &review,
            &[
                Token::Struct {
                    name: "Review",
                    len: 4,
                },
                Token::Str("ReviewId"),
                Token::Str("1"),
                Token::Str("Location"),
                Token::Str("Denver, Colorado"),
                Token::Str("Timestamp"),
                Token::Str("2024-03-10 14:05:09"),
                Token::Str("ReviewBody"),
                Token::Str("Great service"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_scored_review_serialise() {
        let review = Review {
            review_id: "1".to_string(),
            location: "Denver, Colorado".to_string(),
            timestamp: timestamp(),
            review_body: "Great service".to_string(),
        };
        let sentiment = Sentiment {
            compound: 0.5,
            pos: 0.25,
            neu: 0.75,
            neg: 0.0,
        };
        assert_ser_tokens(
            &ScoredReview::new(review, sentiment),
            &[
                Token::Struct {
                    name: "ScoredReview",
                    len: 5,
                },
                Token::Str("ReviewId"),
                Token::Str("1"),
                Token::Str("ReviewBody"),
                Token::Str("Great service"),
                Token::Str("Location"),
                Token::Str("Denver, Colorado"),
                Token::Str("Timestamp"),
                Token::Str("2024-03-10 14:05:09"),
                Token::Str("sentiment"),
                Token::Struct {
                    name: "Sentiment",
                    len: 4,
                },
                Token::Str("compound"),
                Token::F64(0.5),
                Token::Str("pos"),
                Token::F64(0.25),
                Token::Str("neu"),
                Token::F64(0.75),
                Token::Str("neg"),
                Token::F64(0.0),
                Token::StructEnd,
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        assert_de_tokens_error::<Review>(
            &[
                Token::Struct {
                    name: "Review",
                    len: 4,
                },
                Token::Str("ReviewId"),
                Token::Str("1"),
                Token::Str("Location"),
                Token::Str("Denver, Colorado"),
                Token::Str("Timestamp"),
                Token::Str("2024-03-10"),
            ],
            "premature end of input",
        )
    }

    #[test]
    fn test_new_review() {
        let review = Review::new("Denver, Colorado".to_string(), "Great service".to_string());
        assert!(Uuid::parse_str(&review.review_id).is_ok());
        let timestamp = review.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&timestamp), "timestamp: {timestamp}");
        assert_eq!(review.timestamp, review.timestamp.trunc_subsecs(0));
    }

    #[test]
    fn test_new_review_ids_unique() {
        let a = Review::new("Denver, Colorado".to_string(), "a".to_string());
        let b = Review::new("Denver, Colorado".to_string(), "b".to_string());
        assert_ne!(a.review_id, b.review_id);
    }

    fn submission(location: Option<&str>, review_body: Option<&str>) -> ReviewSubmission {
        ReviewSubmission {
            location: location.map(str::to_string),
            review_body: review_body.map(str::to_string),
        }
    }

    #[test]
    fn test_submission_valid() {
        submission(Some("Denver, Colorado"), Some("Great service"))
            .validate()
            .unwrap()
    }

    #[test]
    fn test_submission_unknown_location() {
        let errors = submission(Some("Nowhere"), Some("ok"))
            .validate()
            .unwrap_err();
        assert_eq!(1, errors.field_errors().len());
    }

    #[test]
    fn test_submission_missing_location() {
        assert!(submission(None, Some("ok")).validate().is_err());
        assert!(submission(Some(""), Some("ok")).validate().is_err());
    }

    #[test]
    fn test_submission_missing_body() {
        assert!(submission(Some("Denver, Colorado"), None)
            .validate()
            .is_err());
        assert!(submission(Some("Denver, Colorado"), Some(""))
            .validate()
            .is_err());
    }

    #[test]
    fn test_submission_into_review() {
        let review = submission(Some("Denver, Colorado"), Some("Great service"))
            .into_review()
            .unwrap();
        assert_eq!("Denver, Colorado", review.location);
        assert_eq!("Great service", review.review_body);
    }

    #[test]
    fn test_unvalidated_submission_into_review() {
        let error = submission(None, Some("ok")).into_review().unwrap_err();
        assert!(matches!(error, ReviewError::Internal { message: _ }));
    }
}
