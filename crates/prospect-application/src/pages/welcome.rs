//! Landing page.

use crate::navigation::HeaderInfo;

/// Greets the participant; the main-window menu does the rest.
#[derive(Debug)]
pub struct WelcomePage {
    greeting: String,
}

impl WelcomePage {
    pub fn new(header: &HeaderInfo) -> Self {
        Self {
            greeting: format!("Welcome, {}", header.display_name),
        }
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub(crate) async fn activated(&mut self) {}

    pub(crate) async fn process(&mut self) {}
}
