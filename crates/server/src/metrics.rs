//! Prometheus metrics
//!
//! Counters and the latency histogram are recorded through the `metrics`
//! facade; they are no-ops until a recorder is installed.

use std::time::Duration;

use campus_faq_agent::{HandlerReply, ReplySource};
use campus_faq_core::{Intent, Language};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "faq_requests_total";
pub const FALLBACK_TOTAL: &str = "faq_fallback_total";
pub const EMPTY_REQUESTS_TOTAL: &str = "faq_empty_requests_total";
pub const REQUEST_LATENCY_MS: &str = "faq_request_latency_ms";

const LATENCY_BUCKETS_MS: &[f64] = &[1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0];

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(REQUEST_LATENCY_MS.to_string()),
        LATENCY_BUCKETS_MS,
    )
}

fn describe() {
    metrics::describe_counter!(REQUESTS_TOTAL, "Messages answered by the pipeline");
    metrics::describe_counter!(FALLBACK_TOTAL, "Messages answered by the keyword fallback");
    metrics::describe_counter!(EMPTY_REQUESTS_TOTAL, "Blank messages");
    metrics::describe_histogram!(REQUEST_LATENCY_MS, "Time to answer one message");
}

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = builder()?.install_recorder()?;
    describe();
    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally
pub fn detached_handle() -> Result<PrometheusHandle, BuildError> {
    Ok(builder()?.build_recorder().handle())
}

pub fn record_request(language: Language, intent: Intent) {
    metrics::counter!(
        REQUESTS_TOTAL,
        "language" => language.as_str(),
        "intent" => intent.as_str()
    )
    .increment(1);
}

pub fn record_fallback() {
    metrics::counter!(FALLBACK_TOTAL).increment(1);
}

pub fn record_empty_request() {
    metrics::counter!(EMPTY_REQUESTS_TOTAL).increment(1);
}

pub fn record_latency(elapsed: Duration) {
    metrics::histogram!(REQUEST_LATENCY_MS).record(elapsed.as_secs_f64() * 1000.0);
}

/// Record the counters matching the path that produced `reply`
pub fn record_reply(reply: &HandlerReply, elapsed: Duration) {
    match reply.source {
        ReplySource::Pipeline => {
            if let (Some(language), Some(intent)) = (reply.language, reply.intent) {
                record_request(language, intent);
            }
        }
        ReplySource::Fallback => record_fallback(),
        ReplySource::EmptyInput => record_empty_request(),
    }
    record_latency(elapsed);
}
