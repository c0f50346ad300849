//! This file defines the review-analyser binary entry point.

use review_analyser::app;
use review_analyser::app_state::AppState;
use review_analyser::cli;
use review_analyser::metrics;
use review_analyser::review_store;
use review_analyser::server;
use review_analyser::tracing;

use std::process::exit;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing();
    if args.enable_metrics {
        if let Err(err) = metrics::register_metrics() {
            ::tracing::error!("Failed to register metrics: {}", err);
            exit(1)
        }
    }
    let reviews = match review_store::load_reviews(&args.reviews_file) {
        Ok(reviews) => reviews,
        Err(err) => {
            ::tracing::error!("{}", err);
            if let Some(source) = std::error::Error::source(&err) {
                ::tracing::error!("Caused by: {}", source);
            }
            exit(1)
        }
    };
    let service = app::service(AppState::new(&args, reviews));
    server::serve(&args, service).await;
}
