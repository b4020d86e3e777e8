use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "COMMITART_LOG";

/// Install the stderr subscriber.
///
/// `COMMITART_LOG` wins, then `RUST_LOG`, then the `-v` count
/// (warn, info, debug, trace).
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let layer = fmt::layer().compact().with_target(false).with_writer(std::io::stderr);
    // a second init (tests driving the CLI in-process) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(layer).with(filter).try_init();
}
