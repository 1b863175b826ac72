//! logging — process-wide `tracing` subscriber setup.
//!
//! Library code only emits events inside per-instance spans (`fd_sampler`,
//! `fd_analysis`); installing a subscriber is left to the application, test,
//! or Python module init that calls [`init_tracing`].
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a formatted stderr subscriber filtered by `RUST_LOG`.
///
/// Parameters
/// ----------
/// - `default_level`: filter directive used when `RUST_LOG` is unset or
///   unparsable, e.g. `"info"` or `"rust_uq=debug"`.
///
/// Returns
/// -------
/// `true` if this call installed the subscriber, `false` if a global
/// subscriber was already set (repeat calls are no-ops).
pub fn init_tracing(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()
        .is_ok()
}
