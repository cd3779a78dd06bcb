//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::Uptime;

/// Filter directive for the given verbosity flags
///
/// `quiet` wins over any number of `-v` flags.
pub const fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the flag-derived level
///
/// Calling this more than once keeps the first subscriber.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, quiet)));
    let span_events = if verbose >= 2 {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(span_events)
        .with_timer(Uptime::default())
        .try_init();
}
