use std::process::ExitCode;

use tracing::{error, info};
use walls_engine::run_app;

use super::bootstrap::{self, build_app, LaunchError};

pub(crate) fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    bootstrap::init_tracing();
    info!("=== Walls Startup ===");

    match launch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let LaunchError::Arguments(usage) = &err {
                eprintln!("{usage}");
            }
            error!(error = %err, "launch_failed");
            ExitCode::FAILURE
        }
    }
}

fn launch<I>(args: I) -> Result<(), LaunchError>
where
    I: IntoIterator<Item = String>,
{
    let app = build_app(args)?;
    run_app(app.config, app.scene)?;
    Ok(())
}
