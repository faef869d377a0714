use lazy_static::lazy_static;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

lazy_static! {
    // Search metrics
    pub static ref SEARCH_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("sdn_search_requests_total", "Total SDN search requests"),
        &["detail", "status"]
    ).expect("metric can be created");

    pub static ref SEARCH_MATCHES: HistogramVec = HistogramVec::new(
        HistogramOpts::new("sdn_search_matches", "Records matched per search")
            .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 500.0]),
        &["detail"]
    ).expect("metric can be created");

    // Dataset metrics
    pub static ref REFRESHES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("sdn_refreshes_total", "SDN list refresh attempts"),
        &["outcome"]
    ).expect("metric can be created");

    pub static ref RECORDS_LOADED: IntGauge = IntGauge::new(
        "sdn_records_loaded",
        "Records in the currently loaded SDN list"
    ).expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(SEARCH_REQUESTS_TOTAL.clone()))?;
    registry.register(Box::new(SEARCH_MATCHES.clone()))?;
    registry.register(Box::new(REFRESHES_TOTAL.clone()))?;
    registry.register(Box::new(RECORDS_LOADED.clone()))?;
    Ok(())
}

/// Encode the default registry in Prometheus text format
pub fn render_metrics() -> Result<String, Box<dyn std::error::Error>> {
    render_registry(prometheus::default_registry())
}

pub fn render_registry(registry: &Registry) -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
