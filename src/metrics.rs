//! Prometheus metrics registry for the pharmacy notification relay.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and hand it
//! to the router. Exposed at `GET /metrics` in Prometheus text
//! exposition format (`text/plain; version=0.0.4`).

use prometheus::{Counter, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total notify-nearby requests received (valid + invalid).
    pub notify_requests_total: Counter,
    /// Requests rejected by payload validation.
    pub invalid_payloads_total: Counter,
    /// Total notification records handed to the dispatcher.
    pub notifications_dispatched_total: Counter,
    /// Matching passes served from the seed list instead of the store.
    pub directory_fallbacks_total: Counter,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated (should not happen in practice).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let notify_requests_total = Counter::with_opts(Opts::new(
            "pharmacy_notify_requests_total",
            "Total notify-nearby requests received",
        ))?;

        let invalid_payloads_total = Counter::with_opts(Opts::new(
            "pharmacy_notify_invalid_payloads_total",
            "Requests rejected by payload validation",
        ))?;

        let notifications_dispatched_total = Counter::with_opts(Opts::new(
            "pharmacy_notify_notifications_dispatched_total",
            "Notification records dispatched to pharmacies",
        ))?;

        let directory_fallbacks_total = Counter::with_opts(Opts::new(
            "pharmacy_notify_directory_fallbacks_total",
            "Matching passes served from the seed list",
        ))?;

        registry.register(Box::new(notify_requests_total.clone()))?;
        registry.register(Box::new(invalid_payloads_total.clone()))?;
        registry.register(Box::new(notifications_dispatched_total.clone()))?;
        registry.register(Box::new(directory_fallbacks_total.clone()))?;

        Ok(Self {
            notify_requests_total,
            invalid_payloads_total,
            notifications_dispatched_total,
            directory_fallbacks_total,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for `/metrics`).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_metrics_register_without_error() {
        let metrics = AppMetrics::new();
        assert!(metrics.is_ok(), "AppMetrics::new() failed: {:?}", metrics.err());
    }

    #[test]
    fn render_contains_metric_names_after_increments() {
        let metrics = AppMetrics::new().unwrap();
        metrics.notify_requests_total.inc();
        metrics.invalid_payloads_total.inc();
        metrics.notifications_dispatched_total.inc_by(3.0);
        metrics.directory_fallbacks_total.inc();

        let output = metrics.render().unwrap();
        assert!(output.contains("pharmacy_notify_requests_total 1"));
        assert!(output.contains("pharmacy_notify_invalid_payloads_total 1"));
        assert!(output.contains("pharmacy_notify_notifications_dispatched_total 3"));
        assert!(output.contains("pharmacy_notify_directory_fallbacks_total 1"));
    }

    #[test]
    fn counters_increment_correctly() {
        let metrics = AppMetrics::new().unwrap();
        metrics.notifications_dispatched_total.inc_by(2.0);
        assert!((metrics.notifications_dispatched_total.get() - 2.0).abs() < f64::EPSILON);
    }
}
