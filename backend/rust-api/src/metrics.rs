use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Session Metrics
    pub static ref SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sessions_total",
        "Total number of interview sessions by lifecycle event",
        &["event"]
    )
    .unwrap();

    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "sessions_active",
        "Number of currently live sessions"
    )
    .unwrap();

    pub static ref QUESTIONS_SHUFFLED_TOTAL: IntCounter = register_int_counter!(
        "questions_shuffled_total",
        "Total number of question reselections"
    )
    .unwrap();

    // Feedback Metrics
    pub static ref FEEDBACK_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feedback_requests_total",
        "Total number of answer submissions by outcome",
        &["outcome"]
    )
    .unwrap();

    pub static ref GENERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "generation_duration_seconds",
        "Text-generation collaborator call duration in seconds",
        &["status"],
        vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .get();
        let _ = FEEDBACK_REQUESTS_TOTAL
            .with_label_values(&["feedback"])
            .get();
        let _ = QUESTIONS_SHUFFLED_TOTAL.get();
    }

    #[test]
    fn test_render_metrics() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        FEEDBACK_REQUESTS_TOTAL
            .with_label_values(&["validation_rejected"])
            .inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("feedback_requests_total"));
    }
}
