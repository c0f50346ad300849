//! Prometheus metrics

use axum::{body::Body, http::Request, response::Response};
use lazy_static::lazy_static;
use prometheus::{
    self, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry,
};
use tracing::Span;

lazy_static! {
    // Registry for holding metric state
    pub static ref REGISTRY: Registry = Registry::new();
    // Requests received, by method
    pub static ref INCOMING_REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new("review_analyser_incoming_requests", "The number of HTTP requests received"),
        &["http_method"]
    ).unwrap();
    // Responses sent, by status code
    pub static ref RESPONSE_CODE_COLLECTOR: IntCounterVec = IntCounterVec::new(
        Opts::new("review_analyser_outgoing_responses", "The number of responses sent"),
        &["status_code"]
    ).unwrap();
    // Response latency
    pub static ref RESPONSE_TIME_COLLECTOR: HistogramVec = HistogramVec::new(
        HistogramOpts{
            common_opts: Opts::new("review_analyser_response_time", "The time taken to respond to each request"),
            buckets: prometheus::DEFAULT_BUCKETS.to_vec(),
        },
        &[],
    ).unwrap();
    // Reviews appended to the store by the write path
    pub static ref REVIEWS_ACCEPTED: IntCounter = IntCounter::new(
        "review_analyser_reviews_accepted", "The number of reviews accepted by POST"
    ).unwrap();
    // Size of each ranked list returned by the read path
    pub static ref REVIEWS_RETURNED: Histogram = Histogram::with_opts(
        HistogramOpts::new("review_analyser_reviews_returned", "The number of reviews returned per GET")
            .buckets(prometheus::exponential_buckets(1.0, 4.0, 8).unwrap()),
    ).unwrap();
}

/// Register the collectors with [REGISTRY]. Call once at startup.
pub fn register_metrics() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(INCOMING_REQUESTS.clone()))?;
    REGISTRY.register(Box::new(RESPONSE_CODE_COLLECTOR.clone()))?;
    REGISTRY.register(Box::new(RESPONSE_TIME_COLLECTOR.clone()))?;
    REGISTRY.register(Box::new(REVIEWS_ACCEPTED.clone()))?;
    REGISTRY.register(Box::new(REVIEWS_RETURNED.clone()))?;
    Ok(())
}

/// Render every registered metric in the Prometheus text format.
pub async fn metrics_handler() -> String {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", err);
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

/// Count an incoming request, labelled by HTTP method.
pub fn request_counter(request: &Request<Body>, _span: &Span) {
    INCOMING_REQUESTS
        .with_label_values(&[request.method().as_str()])
        .inc();
}

/// Count an outgoing response by status code and record its latency.
pub fn record_response_metrics<B>(
    response: &Response<B>,
    latency: std::time::Duration,
    _span: &Span,
) {
    RESPONSE_CODE_COLLECTOR
        .with_label_values(&[response.status().as_str()])
        .inc();

    RESPONSE_TIME_COLLECTOR
        .with_label_values(&[])
        .observe(latency.as_secs_f64());
}
