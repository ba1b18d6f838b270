use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_filter(verbose: bool, configured_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("country_lookup=debug,info")
        } else if let Some(level) = configured_level {
            EnvFilter::new(format!("country_lookup={}", level))
        } else {
            EnvFilter::new("country_lookup=info")
        }
    })
}

// Logs go to stderr so rendered output on stdout stays clean.
pub fn init_cli_logger(verbose: bool, configured_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, configured_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, configured_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, configured_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
