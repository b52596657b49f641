use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Registry, opts,
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry,
    register_int_gauge_vec_with_registry, register_int_gauge_with_registry,
};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

trait ResultExt<T> {
    fn or_exit(self, context: &str) -> T;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_exit(self, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                eprintln!("failed to initialize metric ({context}): {err}");
                std::process::exit(1);
            }
        }
    }
}

pub static UP: LazyLock<IntGauge> = LazyLock::new(|| {
    register_int_gauge_with_registry!(
        "recipeyoulove_up",
        "1 while the API is serving requests",
        &REGISTRY
    )
    .or_exit("metric can be created")
});

pub static PROBE_CHECKS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec_with_registry!(
        opts!(
            "recipeyoulove_probe_checks_total",
            "Connectivity checks by backend and result (success, failure)"
        ),
        &["backend", "result"],
        &REGISTRY
    )
    .or_exit("metric can be created")
});

pub static BACKEND_UP: LazyLock<IntGaugeVec> = LazyLock::new(|| {
    register_int_gauge_vec_with_registry!(
        opts!(
            "recipeyoulove_backend_up",
            "Outcome of the last connectivity check: 1 ok, 0 error"
        ),
        &["backend"],
        &REGISTRY
    )
    .or_exit("metric can be created")
});

pub static PROBE_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec_with_registry!(
        HistogramOpts::new(
            "recipeyoulove_probe_duration_seconds",
            "Connectivity check duration in seconds"
        ),
        &["backend"],
        &REGISTRY
    )
    .or_exit("metric can be created")
});

/// Record the outcome of a single backend check
pub fn record_check(backend: &str, ok: bool, seconds: f64) {
    let result = if ok { "success" } else { "failure" };
    PROBE_CHECKS.with_label_values(&[backend, result]).inc();
    BACKEND_UP.with_label_values(&[backend]).set(i64::from(ok));
    PROBE_DURATION
        .with_label_values(&[backend])
        .observe(seconds);
}

/// Encode and return metrics for HTTP export
///
/// # Errors
///
/// Returns an error if metrics encoding fails
pub fn encode_metrics() -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    let encoder = prometheus::TextEncoder::new();

    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| format!("could not encode custom metrics: {e}"))?;

    Ok(buffer)
}
