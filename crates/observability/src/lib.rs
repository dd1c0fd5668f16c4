//! Tracing setup shared by applications, tests and benchmarks.
//!
//! `equality-core` only emits `tracing` events; installing a subscriber is
//! left to the process that links it.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing for unit/integration tests (captured by the test harness).
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
