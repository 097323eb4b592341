use std::process;

use clap::Parser;
use team_gate::cli::TeamGate;
use team_gate::command::Outcome;

#[tokio::main]
async fn main() {
    let app = TeamGate::parse();
    timber::init(Some(app.log_level()));

    match app.run().await {
        Ok(Outcome::Completed(_)) => process::exit(0),
        Ok(Outcome::Terminated(signal)) => {
            tracing::error!("{}", signal);
            process::exit(signal.exit_code())
        }
        Err(error) => {
            tracing::debug!(?error);
            tracing::error!("{}", error.message());
            if let Some(suggestion) = error.suggestion() {
                tracing::info!("{}", suggestion);
            }
            process::exit(1)
        }
    }
}
