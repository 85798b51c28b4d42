// tests/common.rs
//! Shared test utilities — logging setup

/// Initialize test-friendly logging.
/// Call once at the start of any test that needs logs; repeat calls are
/// no-ops and RUST_LOG= is respected.
pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}
