//! The two startup modals, drawn on the terminal.

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use prospect_application::bootstrap::{LoginAction, LoginSurface, RotationAction, RotationSurface};
use prospect_core::auth::AuthError;
use prospect_core::profile::Profile;

use super::prompt::{Input, Prompter};

fn show_feedback(feedback: Option<&AuthError>) {
    if let Some(error) = feedback {
        println!("{}", error.to_string().red());
    }
}

pub struct TerminalLogin {
    prompter: Prompter,
}

impl TerminalLogin {
    pub fn new() -> Result<Self> {
        Ok(Self {
            prompter: Prompter::new(Vec::new())?,
        })
    }
}

#[async_trait]
impl LoginSurface for TerminalLogin {
    async fn present(&mut self, feedback: Option<&AuthError>) -> LoginAction {
        println!();
        println!("{}", "Sign in".bold());
        show_feedback(feedback);

        let identifier = loop {
            match self.prompter.line("Identifier: ").await {
                Input::Line(line) if line.trim().is_empty() => continue,
                Input::Line(line) => break line.trim().to_string(),
                Input::Interrupted | Input::Closed => return LoginAction::Cancel,
            }
        };
        match self.prompter.secret("Secret: ").await {
            Input::Line(secret) => LoginAction::Submit { identifier, secret },
            Input::Interrupted | Input::Closed => LoginAction::Cancel,
        }
    }
}

pub struct TerminalRotation {
    prompter: Prompter,
}

impl TerminalRotation {
    pub fn new() -> Result<Self> {
        Ok(Self {
            prompter: Prompter::new(Vec::new())?,
        })
    }
}

#[async_trait]
impl RotationSurface for TerminalRotation {
    async fn present(&mut self, profile: &Profile, feedback: Option<&AuthError>) -> RotationAction {
        println!();
        println!("{}", "Choose a new secret".bold());
        println!(
            "{}",
            format!("{}, your secret has to be changed before you can continue.", profile.display_name()).yellow()
        );
        show_feedback(feedback);

        loop {
            let new_secret = match self.prompter.secret("New secret: ").await {
                Input::Line(secret) => secret,
                Input::Interrupted | Input::Closed => return RotationAction::Cancel,
            };
            let repeated = match self.prompter.secret("Repeat new secret: ").await {
                Input::Line(secret) => secret,
                Input::Interrupted | Input::Closed => return RotationAction::Cancel,
            };
            if new_secret == repeated {
                return RotationAction::Submit { new_secret };
            }
            println!("{}", "The two entries differ, try again.".red());
        }
    }
}
