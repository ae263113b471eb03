//! Terminal presentation: the startup modals and the main window.

mod prompt;
mod render;
mod shell;
mod surfaces;

pub use shell::Shell;
pub use surfaces::{TerminalLogin, TerminalRotation};
