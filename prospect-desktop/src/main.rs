mod app;
mod logging;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use prospect_application::{BootstrapOutcome, NavigationRouter};
use prospect_infrastructure::ConfigService;
use prospect_infrastructure::paths::ProspectPaths;

use crate::app::{AppBootstrap, InterruptHandler};
use crate::terminal::{Shell, TerminalLogin, TerminalRotation};

/// Environment variable that moves every Prospect file under one directory.
const HOME_ENV: &str = "PROSPECT_HOME";

#[tokio::main]
async fn main() -> Result<()> {
    let paths = ProspectPaths::new(std::env::var_os(HOME_ENV).map(PathBuf::from));
    let config = ConfigService::with_path(paths.config_file().ok()).get_config();
    let _log_guard = logging::init(&paths, &config.logging)?;

    let AppBootstrap { app_state } = AppBootstrap::initialize(&paths, &config)?;

    println!("{}", "=== Prospect ===".bright_magenta().bold());

    let interrupts = InterruptHandler::new(app_state.controller.clone());
    let shutdown = interrupts.shutdown();
    let interrupt = interrupts.spawn();

    let mut login = TerminalLogin::new()?;
    let mut rotation = TerminalRotation::new()?;
    let outcome = app_state.controller.run(&mut login, &mut rotation).await;

    let auth = match outcome {
        BootstrapOutcome::Ready(auth) => auth,
        BootstrapOutcome::Terminated => {
            interrupt.abort();
            println!("{}", "Goodbye!".bright_green());
            return Ok(());
        }
    };

    let router = NavigationRouter::new(auth, app_state.services.clone());
    let shell_result = Shell::new(router, shutdown)?.run().await;
    interrupt.abort();
    shell_result?;

    app_state.session.sign_out();
    tracing::info!("[Main] Signed out, exiting");
    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
