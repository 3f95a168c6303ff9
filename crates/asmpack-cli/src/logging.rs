//! Logging setup for the CLI
//!
//! `RUST_LOG` takes precedence over the configured filter; without either,
//! only warnings are shown. Logs go to stderr so command output on stdout
//! stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: `RUST_LOG`, then config, then the default
fn filter_directive(rust_log: Option<String>, configured: Option<&str>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber
pub fn init_logging(configured: Option<&str>) {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), configured);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(
            filter_directive(Some("trace".to_string()), Some("debug")),
            "trace"
        );
    }

    #[test]
    fn test_configured_filter() {
        assert_eq!(filter_directive(None, Some("asmpack_module=debug")), "asmpack_module=debug");
        assert_eq!(filter_directive(Some("  ".to_string()), Some("info")), "info");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(filter_directive(None, None), "warn");
    }
}
