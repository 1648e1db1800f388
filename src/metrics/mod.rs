//! Prometheus collectors for vote submissions.
//!
//! The crate does not serve metrics itself. Embedding applications call
//! [`register_metrics`] on their own registry and scrape it, or use
//! [`encode_metrics`] to render the text exposition format.

use lazy_static::lazy_static;
use prometheus::exponential_buckets;
use prometheus::Encoder;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;
use prometheus::TextEncoder;
use tracing::error;

lazy_static! {
    pub static ref VOTE_SUBMISSIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("vote_submissions_total", "Vote submissions by target kind and outcome"),
        &["target_kind", "outcome"]
    )
    .expect("Should succeed to create metric");

    pub static ref REMOTE_CALL_DURATION_MS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "vote_remote_call_duration_ms",
            "Histogram of remote vote call duration in ms"
        )
        .buckets(exponential_buckets(1.0, 2.0, 14).expect("valid bucket layout")),
        &["operation"]
    )
    .expect("metric can not be created");

    pub static ref VOTES_IN_FLIGHT: IntGauge = IntGauge::new(
        "votes_in_flight",
        "Vote submissions currently waiting on the remote service"
    )
    .expect("metric can not be created");
}

/// Registers every vote collector into `registry`.
pub fn register_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(VOTE_SUBMISSIONS_TOTAL.clone()))?;
    registry.register(Box::new(REMOTE_CALL_DURATION_MS.clone()))?;
    registry.register(Box::new(VOTES_IN_FLIGHT.clone()))?;
    Ok(())
}

/// Renders `registry` in the Prometheus text format.
pub fn encode_metrics(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        error!("could not encode vote metrics: {}", e);
        return String::default();
    }
    String::from_utf8(buffer).unwrap_or_else(|e| {
        error!("vote metrics could not be from_utf8'd: {}", e);
        String::default()
    })
}
