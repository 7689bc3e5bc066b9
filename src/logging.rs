//! Diagnostic logging for the `facetkit` binary.
//!
//! Library code only talks to the `log` facade. The binary installs a
//! `tracing-subscriber` formatter on stderr, which also forwards `log` records,
//! so widgets and the session stay quiet unless an embedder asks for output.

use tracing_subscriber::EnvFilter;

/// Filter used for a given number of `-v` flags when `RUST_LOG` is unset.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. Calling it again keeps the first subscriber.
pub fn initialize(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_default_level() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "trace");
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        initialize(0);
        initialize(3);
        log::debug!("still running");
    }
}
