//! The main window as a command loop.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use prospect_application::NavigationRouter;
use prospect_application::navigation::ActivePage;
use prospect_application::pages::{CompanyDetailPage, CompanyEditorPage, CompanyOverviewPage, SettingsPage};
use prospect_core::command::CommandError;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::prompt::{Input, Prompter};
use super::render;

const COMMANDS: &[&str] = &[
    "welcome", "overview", "detail", "new", "settings", "help", "close", "quit", "select", "open", "refresh",
    "company", "activity", "edit", "delete", "add", "change", "date", "comment", "status", "save", "update",
    "discard", "remove", "set", "cancel", "secret",
];

fn report(result: Result<(), CommandError>) {
    if let Err(e) = result {
        println!("{}", e.to_string().yellow());
    }
}

fn parse_id<T: FromStr>(text: &str) -> Option<T> {
    let parsed = text.trim().parse().ok();
    if parsed.is_none() {
        println!("{}", format!("'{}' is not a valid id", text.trim()).yellow());
    }
    parsed
}

pub struct Shell {
    router: NavigationRouter,
    prompter: Prompter,
    shutdown: CancellationToken,
}

impl Shell {
    /// `shutdown` ends the loop before the next prompt.
    pub fn new(router: NavigationRouter, shutdown: CancellationToken) -> Result<Self> {
        Ok(Self {
            router,
            prompter: Prompter::new(COMMANDS.to_vec())?,
            shutdown,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            if self.shutdown.is_cancelled() {
                println!();
                println!("{}", "Interrupted.".yellow());
                break;
            }
            render::header(self.router.header());
            render::page(self.router.active_page()).await;

            let prompt = format!("{}> ", self.router.active_kind());
            let line = match self.prompter.line(&prompt).await {
                Input::Line(line) => line,
                Input::Interrupted => {
                    println!("{}", "Type 'quit' to exit.".yellow());
                    continue;
                }
                Input::Closed => break,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
            if matches!(word, "quit" | "exit") {
                break;
            }

            if !self.menu(word) && !self.page_command(word, rest.trim()).await {
                println!("{}", format!("Unknown command '{}'", word).bright_black());
            }
            self.router.pump().await;
        }
        Ok(())
    }

    fn menu(&self, word: &str) -> bool {
        let commands = self.router.commands();
        let command = match word {
            "welcome" => &commands.show_welcome,
            "overview" => &commands.show_company_overview,
            "detail" => &commands.show_company_detail,
            "new" => &commands.show_company_editor,
            "settings" => &commands.show_settings,
            "help" => &commands.show_help,
            "close" => &commands.close_help,
            _ => return false,
        };
        report(command.invoke(&()));
        true
    }

    async fn page_command(&mut self, word: &str, rest: &str) -> bool {
        match self.router.active_page().clone() {
            ActivePage::CompanyOverview(page) => overview(&page, word, rest).await,
            ActivePage::CompanyDetail(page) => self.detail(&page, word, rest).await,
            ActivePage::CompanyEditor(page) => editor(&page, word, rest).await,
            ActivePage::Settings(page) => self.settings(&page, word).await,
            ActivePage::Welcome(_) | ActivePage::Help(_) => false,
        }
    }

    async fn detail(&mut self, page: &Arc<RwLock<CompanyDetailPage>>, word: &str, rest: &str) -> bool {
        match word {
            "company" => {
                if let Some(id) = parse_id(rest) {
                    page.write().await.select_company(Some(id)).await;
                }
            }
            "activity" => {
                if let Some(id) = parse_id(rest) {
                    page.write().await.select_activity(Some(id));
                }
            }
            "refresh" => report(page.read().await.refresh.invoke(&())),
            "edit" => {
                let page = page.read().await;
                report(page.edit_company.invoke(&page.selection()));
            }
            "delete" => {
                let name = match page.read().await.selected_company() {
                    Some(company) => company.details.name.clone(),
                    None => String::new(),
                };
                let question = format!("Delete '{}' and all of its activities?", name);
                if !name.is_empty() && !self.prompter.confirm(&question).await {
                    return true;
                }
                let page = page.read().await;
                report(page.delete_company.invoke(&page.selection()));
            }
            "add" => {
                let page = page.read().await;
                report(page.add_activity.invoke(&page.selection()));
            }
            "change" => {
                let page = page.read().await;
                report(page.edit_activity.invoke(&page.selection()));
            }
            "date" => match NaiveDate::parse_from_str(rest, "%Y-%m-%d") {
                Ok(date) => {
                    if let Some(form) = page.write().await.activity_editor_mut() {
                        form.date = date;
                    }
                }
                Err(_) => println!("{}", "Use the format yyyy-mm-dd".yellow()),
            },
            "comment" => {
                if let Some(form) = page.write().await.activity_editor_mut() {
                    form.comment = rest.to_string();
                }
            }
            "status" => {
                if let Some(id) = parse_id(rest) {
                    let mut page = page.write().await;
                    if let Some(form) = page.activity_editor_mut()
                        && !form.select_status(id)
                    {
                        println!("{}", format!("There is no status {}", id).yellow());
                    }
                }
            }
            "save" => {
                let page = page.read().await;
                report(page.save_activity.invoke(&page.selection()));
            }
            "discard" => {
                let page = page.read().await;
                report(page.discard_activity.invoke(&page.selection()));
            }
            "remove" => {
                let blocked = {
                    let page = page.read().await;
                    !page.delete_activity.can_invoke(&page.selection())
                };
                if blocked {
                    println!("{}", "Open an existing activity with 'change' first.".yellow());
                    return true;
                }
                if self.prompter.confirm("Delete this activity?").await {
                    let page = page.read().await;
                    report(page.delete_activity.invoke(&page.selection()));
                }
            }
            _ => return false,
        }
        true
    }

    async fn settings(&mut self, page: &Arc<RwLock<SettingsPage>>, word: &str) -> bool {
        if word != "secret" {
            return false;
        }
        let Input::Line(new_secret) = self.prompter.secret("New secret: ").await else {
            return true;
        };
        let Input::Line(repeated) = self.prompter.secret("Repeat new secret: ").await else {
            return true;
        };
        if new_secret != repeated {
            println!("{}", "The two entries differ.".red());
            return true;
        }
        report(page.read().await.change_secret.invoke(new_secret.as_str()));
        true
    }
}

async fn overview(page: &Arc<RwLock<CompanyOverviewPage>>, word: &str, rest: &str) -> bool {
    match word {
        "select" => {
            if let Some(id) = parse_id(rest) {
                page.write().await.select(Some(id));
            }
        }
        "open" => {
            let page = page.read().await;
            report(page.open_detail.invoke(&page.selected()));
        }
        "refresh" => report(page.read().await.refresh.invoke(&())),
        _ => return false,
    }
    true
}

async fn editor(page: &Arc<RwLock<CompanyEditorPage>>, word: &str, rest: &str) -> bool {
    match word {
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let mut page = page.write().await;
            let form = &mut page.form;
            let target = match field {
                "name" => &mut form.name,
                "street" => &mut form.street,
                "house-number" => &mut form.house_number,
                "postal-code" => &mut form.postal_code,
                "city" => &mut form.city,
                "contact" => &mut form.contact_person,
                "phone" => &mut form.phone,
                "email" => &mut form.email,
                other => {
                    println!("{}", format!("Unknown field '{}'", other).yellow());
                    return true;
                }
            };
            *target = value.trim().to_string();
        }
        "save" | "update" => {
            let page = page.read().await;
            report(page.save.invoke(&page.state()));
        }
        "cancel" => report(page.read().await.cancel.invoke(&())),
        _ => return false,
    }
    true
}
