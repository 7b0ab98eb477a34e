//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate. Log output goes to stderr so it never interleaves with the
//! customer-facing lines the [`ConsoleReporter`](crate::reporting::ConsoleReporter)
//! prints on stdout.
//!
//! ## What Gets Traced
//!
//! - **Scenarios**: every run is wrapped in a `scenario{name=...}` span
//! - **Preparations**: each beverage runs in a `prepare{beverage=...}` span
//! - **Outlets**: acquire and release with the current number in use (`debug`)
//! - **Inventory**: registrations, consumption and refills (`debug`/`trace`)
//! - **Outcomes**: `Prepared` at `info`, failures at `warn` with the reason
//!
//! ## Usage Examples
//!
//! ```bash
//! # Scenario summaries and outcomes
//! RUST_LOG=info dispenser --input-file input.json
//!
//! # Outlet and ingredient movements
//! RUST_LOG=debug dispenser --input-file input.json
//!
//! # Only the dispenser core
//! RUST_LOG=beverage_dispenser::dispenser=debug dispenser --input-file input.json
//! ```
//!
//! With `RUST_LOG=info` a run looks like:
//!
//! ```text
//! INFO scenario: Machine warming up outlets=3 name="input.json"
//! INFO scenario: Serving beverages=4 name="input.json"
//! INFO scenario:prepare: Prepared name="input.json" beverage="hot_tea"
//! WARN scenario:prepare: Preparation failed error=beverage green_tea cannot be prepared because ingredient green_mixture is not available name="input.json" beverage="green_tea"
//! INFO scenario: Scenario complete prepared=2 failed=2 low_running=1 name="input.json"
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false) // Don't show module paths - spans carry the context
        .compact()
        .init();
}
