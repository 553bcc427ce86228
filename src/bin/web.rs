use std::process::ExitCode;

use clap::Parser;
use santander_ynab::logging::init_logger;
use santander_ynab::web::{self, WebArgs};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let args = WebArgs::parse();
    init_logger(args.log_level(), &[env!("CARGO_CRATE_NAME"), "tower_http"]);
    debug!("Log level set to {}", args.log_level());

    let config = args.config();
    debug!(?config, "starting web server");

    match web::serve(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
