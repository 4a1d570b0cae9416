// src/main.rs

use std::process::ExitCode;

use watchgraph::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("watchgraph: {err:#}");
        return ExitCode::FAILURE;
    }

    match watchgraph::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("watchgraph: {err:#}");
            ExitCode::FAILURE
        }
    }
}
