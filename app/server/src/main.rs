//! FILENAME: app/server/src/main.rs
// PURPOSE: Service entry point with unified logging.
// FORMAT: seq|level|category|message

use std::process::ExitCode;

use app_lib::log_error;

#[tokio::main]
async fn main() -> ExitCode {
    match app_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("SYS", "fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
