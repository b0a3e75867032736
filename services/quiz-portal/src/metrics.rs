//! Prometheus metrics exposition
//!
//! - `portal_requests_total` (counter): labels `route`, `status`
//! - `portal_request_duration_seconds` (histogram): label `route`
//! - `portal_callbacks_total` (counter): label `outcome`
//! - `portal_guard_decisions_total` (counter): label `decision`

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

const DURATION_METRIC: &str = "portal_request_duration_seconds";

/// Pages are rendered in-process, so 5ms to 10s covers everything short of a hang
const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

fn builder() -> PrometheusBuilder {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(DURATION_METRIC.to_string()), DURATION_BUCKETS)
        .expect("histogram buckets are non-empty")
}

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_recorder() -> PrometheusHandle {
    builder()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Handle backed by a recorder that is not installed globally.
#[cfg(test)]
pub fn test_handle() -> PrometheusHandle {
    builder().build_recorder().handle()
}

/// Record a completed request against its matched route.
pub fn record_request(route: &str, status: u16, duration_secs: f64) {
    metrics::counter!(
        "portal_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(DURATION_METRIC, "route" => route.to_string()).record(duration_secs);
}

/// Outcome of an auth callback: `stored`, `missing_token` or `storage_error`.
pub fn record_callback(outcome: &'static str) {
    metrics::counter!("portal_callbacks_total", "outcome" => outcome).increment(1);
}

/// Access guard result: `allow` or `redirect`.
pub fn record_guard(decision: &'static str) {
    metrics::counter!("portal_guard_decisions_total", "decision" => decision).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusRecorder;

    fn isolated_recorder() -> (PrometheusRecorder, PrometheusHandle) {
        let recorder = builder().build_recorder();
        let handle = recorder.handle();
        (recorder, handle)
    }

    #[test]
    fn record_functions_do_not_panic_without_recorder() {
        record_request("/", 200, 0.01);
        record_callback("stored");
        record_guard("allow");
    }

    #[test]
    fn record_request_renders_counter_and_histogram() {
        let (recorder, handle) = isolated_recorder();
        let _guard = metrics::set_default_local_recorder(&recorder);

        record_request("/dashboard", 200, 0.004);
        record_request("/auth/callback", 303, 0.002);

        let output = handle.render();
        assert!(output.contains("portal_requests_total"));
        assert!(output.contains("route=\"/dashboard\""));
        assert!(output.contains("status=\"303\""));
        assert!(
            output.contains("portal_request_duration_seconds_bucket"),
            "histogram must render _bucket lines"
        );
        assert!(output.contains("le=\"0.005\""));
        assert!(output.contains("le=\"10\""));
    }

    #[test]
    fn callback_and_guard_counters_carry_labels() {
        let (recorder, handle) = isolated_recorder();
        let _guard = metrics::set_default_local_recorder(&recorder);

        record_callback("stored");
        record_callback("missing_token");
        record_guard("redirect");

        let output = handle.render();
        assert!(output.contains("outcome=\"stored\""));
        assert!(output.contains("outcome=\"missing_token\""));
        assert!(output.contains("portal_guard_decisions_total{decision=\"redirect\"} 1"));
    }
}
