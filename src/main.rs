use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_logging();

    if let Err(e) = duckpipe::app::run() {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

/// Log to stderr only; stdout belongs to the line protocol.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
