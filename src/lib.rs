//! This crate provides a small HTTP service that holds customer reviews in memory and returns
//! them ranked by sentiment.
//!
//! Reviews are seeded from a CSV file at startup and new ones are accepted as url-encoded forms.
//! A single endpoint answers on every path:
//!
//! * `GET` returns reviews, optionally filtered by `location`, `start_date` and `end_date`
//!   (`YYYY-MM-DD`), each with VADER sentiment scores and sorted by descending compound score.
//! * `POST` validates a `Location` and `ReviewBody`, assigns an identifier and timestamp, and
//!   stores the review.
//! * Any other method receives `405 Method Not Allowed`.
//!
//! The service is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs (de)serialisation of form, query and JSON data, and [csv] reads the
//!   bulk review file.
//! * [vader_sentiment] scores review text with the VADER lexicon.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod review_store;
pub mod sentiment;
pub mod server;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod validated_form;
