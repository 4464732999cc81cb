use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter variables consulted in order before falling back to the verbosity flag.
const LOG_ENV_VARS: [&str; 2] = ["BARRAGE_LOG", "RUST_LOG"];

pub(crate) fn init_logging(verbose: bool, no_color: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(env_filter_value().as_deref(), verbose))
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn env_filter_value() -> Option<String> {
    LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
}

fn build_filter(value: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    value.map_or_else(
        || EnvFilter::new(fallback),
        |value| EnvFilter::try_new(value).unwrap_or_else(|_err| EnvFilter::new(fallback)),
    )
}
