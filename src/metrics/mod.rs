use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;

lazy_static! {
    pub static ref REFRESH_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("account_cache_refresh_total", "Refresh tasks scheduled, by kind"),
        &["kind"]
    )
    .expect("metric can not be created");
    pub static ref REFRESH_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("account_cache_refresh_failures", "Failed raw fetches, by cause"),
        &["cause"]
    )
    .expect("metric can not be created");
    pub static ref IN_FLIGHT_REFRESHES: IntGauge = IntGauge::new(
        "account_cache_in_flight_refreshes",
        "Refresh tasks currently outstanding"
    )
    .expect("metric can not be created");
    pub static ref PUBLISH_TOTAL: IntCounter = IntCounter::new(
        "account_cache_publish_total",
        "Filtered view publishes, successes and carried failures alike"
    )
    .expect("metric can not be created");
    pub static ref REGISTRY: Registry = Registry::new();
}

pub fn register_custom_metrics() {
    REGISTRY
        .register(Box::new(REFRESH_TOTAL.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(REFRESH_FAILURES.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(IN_FLIGHT_REFRESHES.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(PUBLISH_TOTAL.clone()))
        .expect("collector can be registered");
}
