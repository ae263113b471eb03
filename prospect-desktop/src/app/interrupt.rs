//! Ctrl-C outside a rustyline prompt.
//!
//! Inside a prompt rustyline reports Ctrl-C as an interrupted line. Between
//! prompts the signal reaches this handler: before the gate opens it cancels
//! the gate, afterwards it asks the main window to stop at its next prompt.

use std::sync::Arc;

use prospect_application::BootstrapController;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    GateCancelled,
    ShellStopping,
}

#[derive(Clone)]
pub struct InterruptHandler {
    controller: Arc<BootstrapController>,
    shutdown: CancellationToken,
}

impl InterruptHandler {
    pub fn new(controller: Arc<BootstrapController>) -> Self {
        Self {
            controller,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token the main window checks before each prompt.
    pub fn shutdown(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn handle(&self) -> Interrupted {
        match self.controller.cancel() {
            Ok(state) => {
                tracing::info!("[Main] Interrupted, gate is now {}", state);
                Interrupted::GateCancelled
            }
            Err(_) => {
                tracing::info!("[Main] Interrupted in the main window, stopping");
                self.shutdown.cancel();
                Interrupted::ShellStopping
            }
        }
    }

    /// Listens for Ctrl-C for the rest of the process.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                self.handle();
            }
        })
    }
}
