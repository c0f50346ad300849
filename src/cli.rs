//! Command Line Interface (CLI) arguments.

use clap::Parser;
use std::path::PathBuf;

/// Review analyser command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "REVIEW_ANALYSER_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8000, env = "PORT")]
    pub port: u16,
    /// Path to the CSV file of reviews loaded at startup
    #[arg(
        long,
        default_value = "data/reviews.csv",
        env = "REVIEW_ANALYSER_REVIEWS_FILE"
    )]
    pub reviews_file: PathBuf,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "REVIEW_ANALYSER_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/review-analyser/certs/cert.pem",
        env = "REVIEW_ANALYSER_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/review-analyser/certs/key.pem",
        env = "REVIEW_ANALYSER_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "REVIEW_ANALYSER_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Whether to memoise sentiment scores of review bodies.
    #[arg(long, default_value_t = false, env = "REVIEW_ANALYSER_SENTIMENT_CACHE")]
    pub sentiment_cache: bool,
    /// Whether to expose Prometheus metrics at `/metrics`.
    #[arg(long, default_value_t = false, env = "REVIEW_ANALYSER_ENABLE_METRICS")]
    pub enable_metrics: bool,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
