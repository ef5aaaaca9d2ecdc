use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Env vars consulted for a filter directive, first match wins.
const FILTER_VARS: [&str; 2] = ["CALLBENCH_LOG", "RUST_LOG"];

/// Installs the global subscriber. Logs go to stderr so the result table on
/// stdout stays clean.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = FILTER_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(directive.as_deref(), verbose))
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// An explicit directive beats `--verbose`; an unparsable one falls back to
/// the default level.
fn resolve_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}
