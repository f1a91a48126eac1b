//! Process-wide log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Verbose in development, quieter once deployed (a `PORT` variable is set).
pub fn default_level(deployed: bool) -> &'static str {
    if deployed {
        "info"
    } else {
        "debug"
    }
}

/// Pick the filter directive: `RUST_LOG` > configured level > [`default_level`].
pub fn filter_directive(rust_log: Option<&str>, configured: Option<&str>, deployed: bool) -> String {
    let set = |s: &&str| !s.trim().is_empty();
    rust_log
        .filter(set)
        .or(configured.filter(set))
        .unwrap_or_else(|| default_level(deployed))
        .to_string()
}

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init(configured: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let deployed = std::env::var_os("PORT").is_some();
    let directive = filter_directive(rust_log.as_deref(), configured, deployed);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_by_environment() {
        assert_eq!(default_level(false), "debug");
        assert_eq!(default_level(true), "info");
    }

    #[test]
    fn test_filter_directive_precedence() {
        assert_eq!(filter_directive(Some("trace"), Some("warn"), true), "trace");
        assert_eq!(filter_directive(None, Some("warn"), false), "warn");
        assert_eq!(filter_directive(None, None, false), "debug");
        assert_eq!(filter_directive(None, None, true), "info");
        assert_eq!(filter_directive(Some(""), Some("warn"), false), "warn");
    }
}
