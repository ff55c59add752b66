//! Logging setup for the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` switches the crate from
/// `info` to `debug`.
pub fn init_logger(verbose: bool) {
    let default = if verbose {
        "tennis_win_prob=debug,info"
    } else {
        "tennis_win_prob=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
