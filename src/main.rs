use postgres_check::check::CheckState;
use postgres_check::cli::{self, actions};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let result = match cli::start() {
        Ok(action) => actions::run::handle(action).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(state) => state.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            CheckState::Warning.into()
        }
    }
}
