use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_VARIABLE: &str = "API_TEST_LOG";

/// Installs the fmt subscriber once per process. Later calls are no-ops.
///
/// The filter comes from `API_TEST_LOG` (e.g. `api_harness=debug`) and defaults to `info`. Output
/// goes through the test writer so libtest captures it per test.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VARIABLE).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
