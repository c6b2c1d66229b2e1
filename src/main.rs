use std::process::ExitCode;

use weather_mcp_gateway::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::logging::init();

    // Admin subcommands take over when arguments are present; a bare
    // invocation runs the server in the configured mode.
    if std::env::args().nth(1).is_some() {
        return cli::run().await;
    }

    match infra::boot::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
