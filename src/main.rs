use std::process::ExitCode;

use sleepy_probe::config::Args;
use sleepy_probe::lifecycle::startup;
use sleepy_probe::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_flags();
    logging::init(args.log_level.as_deref(), args.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sleepy-probe starting");

    match startup::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
