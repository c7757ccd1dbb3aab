//! Diagnostics go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `agent_onboard=trace`.
pub const LOG_ENV: &str = "AGENT_ONBOARD_LOG";

/// Filter used when `AGENT_ONBOARD_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "agent_onboard=debug"
    } else {
        "warn"
    }
}

pub fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time(),
        )
        .try_init();
}
