mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Parse CLI, load config, start logging, dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("pagecheck error: {:#}", err);
        std::process::exit(1);
    }
}
