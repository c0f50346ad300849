use crate::app_state::{AppState, SharedAppState};
use crate::error::ReviewError;
use crate::metrics::{
    metrics_handler, record_response_metrics, request_counter, REVIEWS_ACCEPTED, REVIEWS_RETURNED,
};
use crate::models::{ReviewQuery, ReviewSubmission};
use crate::query::{filter_and_rank, ReviewFilter};
use crate::validated_form::{from_first_values, ValidatedForm};

use axum::{
    extract::{RawQuery, State},
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Service type served by [crate::server::serve].
pub type Service = Router;

/// Render `body` as pretty-printed JSON with the given status.
fn pretty_json<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ReviewError> {
    let json_body = serde_json::to_string_pretty(body)?;
    Ok((
        status,
        [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
        json_body,
    )
        .into_response())
}

/// Build the review router.
///
/// Every path serves the same endpoint, distinguished only by method. Only GET and POST are
/// served; HEAD is rejected like any other method. `/metrics` is routed ahead of it when metrics
/// are enabled.
pub fn router(state: SharedAppState) -> Router {
    let reviews: MethodRouter = get(list_reviews)
        .head(method_not_allowed)
        .post(submit_review)
        .fallback(method_not_allowed)
        .with_state(state.clone());

    let mut router = Router::new();
    if state.args.enable_metrics {
        router = router.route("/metrics", get(metrics_handler));
    }
    router.fallback_service(reviews).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .on_request(request_counter)
                .on_response(record_response_metrics),
        ),
    )
}

/// Returns a [Service] for the given application state.
pub fn service(state: AppState) -> Service {
    router(Arc::new(state))
}

/// Return reviews filtered by the query parameters, ranked by descending sentiment.
///
/// A repeated parameter takes its first value.
async fn list_reviews(
    State(state): State<SharedAppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ReviewError> {
    let query: ReviewQuery = from_first_values(query.unwrap_or_default().as_bytes())?;
    let filter = ReviewFilter::from_query(&query)?;
    let reviews = state.store.all().await;
    let ranked = filter_and_rank(reviews, &filter, state.scorer.as_ref());
    REVIEWS_RETURNED.observe(ranked.len() as f64);
    pretty_json(StatusCode::OK, &ranked)
}

/// Validate a submitted review and append it to the store.
async fn submit_review(
    State(state): State<SharedAppState>,
    ValidatedForm(submission): ValidatedForm<ReviewSubmission>,
) -> Result<Response, ReviewError> {
    let review = submission.into_review()?;
    let response = pretty_json(StatusCode::CREATED, &review)?;
    info!(review_id = %review.review_id, location = %review.location, "Accepted review");
    state.store.append(review).await;
    REVIEWS_ACCEPTED.inc();
    Ok(response)
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
