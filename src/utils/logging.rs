//! Diagnostic logging (tracing). User-facing output goes through
//! `ui::messages`; this is for `RPOMODORO_LOG=debug` troubleshooting.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter.
///
/// A bare level (`debug`) applies to this crate only. Anything with a
/// target (`rpomodoro=trace`, `rpomodoro::core=debug,warn`) is used as-is.
pub const LOG_ENV: &str = "RPOMODORO_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Filter directive built from the raw `RPOMODORO_LOG` value.
fn directive(raw: Option<&str>) -> String {
    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");

    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(full) if full.contains('=') || full.contains(',') => full.to_string(),
        Some(level) => format!("{crate_name}={level}"),
        None => format!("{crate_name}={DEFAULT_LEVEL}"),
    }
}

pub fn init() {
    let raw = std::env::var(LOG_ENV).ok();

    let filter = EnvFilter::try_new(directive(raw.as_deref())).unwrap_or_else(|_| {
        eprintln!("{LOG_ENV}: invalid filter {raw:?}, using {DEFAULT_LEVEL}");
        EnvFilter::new(DEFAULT_LEVEL)
    });

    // try_init: a subscriber may already be installed (tests call run() repeatedly)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::directive;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn bare_level_is_scoped_to_the_crate() {
        assert_eq!(directive(Some("debug")), "rpomodoro=debug");
        assert_eq!(directive(None), "rpomodoro=warn");
        assert_eq!(directive(Some("  ")), "rpomodoro=warn");
    }

    #[test]
    fn full_directives_pass_through() {
        for raw in ["rpomodoro=trace", "rpomodoro::core=debug,warn"] {
            let d = directive(Some(raw));
            assert_eq!(d, raw);
            assert!(EnvFilter::try_new(&d).is_ok(), "{d}");
        }
    }
}
