//! Initialises structured tracing of matching runs, using `tracing_subscriber`.
//!
//! Spans are emitted around spatial lookups, routing and trace matching.
//! Verbosity is controlled through the environment, for example:
//! ```bash
//! RUST_LOG=trackmatch=debug
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
///
/// Records emitted through `log` are forwarded into the subscriber.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer();

    // Initialise tracing with subscribers and environment filter
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
