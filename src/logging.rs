use crate::error::AppError;
use std::io::stderr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for `--list-teams` output.
///
/// `RUST_LOG` is honored; the crate's own level is `info`, or `debug` when
/// `verbose` is set.
pub fn init(verbose: bool) -> Result<(), AppError> {
    let directive = if verbose { "rink_travel=debug" } else { "rink_travel=info" };
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .map_err(|e| AppError::LogSetup(format!("bad filter directive: {e}")))?,
    );

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| AppError::LogSetup(e.to_string()))
}
