//! Logging setup for the binary.
//!
//! Library code only emits `tracing` events; the subscriber is installed
//! here, once, by `main`. `RUST_LOG` wins over the `-v` count when set.
//!
//! ```ignore
//! use asyncify::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(1); // -v
//! }
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "asyncify=warn",
        1 => "asyncify=info",
        2 => "asyncify=debug",
        _ => "asyncify=trace",
    }
}

/// Install the global subscriber, writing to stderr so stdout stays clean
/// for generated source. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "asyncify=warn");
        assert_eq!(default_directive(2), "asyncify=debug");
        assert_eq!(default_directive(9), "asyncify=trace");
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(0);
        init_tracing(3);
    }
}
