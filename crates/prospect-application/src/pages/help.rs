//! Contextual help overlay.

use crate::navigation::{NavigationRequest, Navigator};
use prospect_core::command::Command;

/// One numbered callout on the help screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub number: u8,
    pub text: &'static str,
}

/// Title, screenshot and legend for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpContent {
    pub title: &'static str,
    pub image_path: &'static str,
    pub legend: Vec<LegendEntry>,
}

fn legend(entries: &[&'static str]) -> Vec<LegendEntry> {
    entries
        .iter()
        .zip(1u8..)
        .map(|(text, number)| LegendEntry { number, text })
        .collect()
}

impl HelpContent {
    /// Looks up help for a page context key. Unknown keys get the welcome help.
    pub fn for_context(key: &str) -> Self {
        match key {
            "company-overview" => Self {
                title: "Company overview",
                image_path: "images/company-overview.png",
                legend: legend(&[
                    "All of your companies, sorted by name.",
                    "Status and comment of the most recent activity.",
                ]),
            },
            "company-detail" => Self {
                title: "Company details",
                image_path: "images/company-detail.png",
                legend: legend(&[
                    "Choose the company to look at.",
                    "Edit or delete the selected company.",
                    "Activity history, newest first.",
                    "Add a new activity or edit the selected one.",
                ]),
            },
            "company-editor" => Self {
                title: "Add or edit a company",
                image_path: "images/company-editor.png",
                legend: legend(&["Fill in the company data and save. Only the name is required."]),
            },
            "settings" => Self {
                title: "Settings",
                image_path: "images/settings.png",
                legend: legend(&["Change your secret."]),
            },
            _ => Self {
                title: "Welcome",
                image_path: "images/welcome.png",
                legend: legend(&[
                    "Overview of all companies.",
                    "Add a new company.",
                    "Company details and activities.",
                    "Settings.",
                    "This help.",
                ]),
            },
        }
    }
}

/// The help overlay, built fresh for the page it was opened from.
pub struct HelpPage {
    context: String,
    content: HelpContent,
    pub close: Command,
}

impl HelpPage {
    pub fn new(context: &str, navigator: Navigator) -> Self {
        Self {
            context: context.to_string(),
            content: HelpContent::for_context(context),
            close: Command::<()>::new("close-help", move |_| {
                navigator.request(NavigationRequest::CloseHelp)
            }),
        }
    }

    /// Key of the page the overlay explains.
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn content(&self) -> &HelpContent {
        &self.content
    }

    pub(crate) async fn activated(&mut self) {}

    pub(crate) async fn process(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::navigator;

    #[test]
    fn test_unknown_context_falls_back_to_welcome() {
        assert_eq!(HelpContent::for_context("nope"), HelpContent::for_context("welcome"));
        assert_eq!(HelpContent::for_context("welcome").legend.len(), 5);
    }

    #[test]
    fn test_legend_is_numbered_from_one() {
        let content = HelpContent::for_context("company-detail");
        let numbers: Vec<_> = content.legend.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_close_posts_request() {
        let (nav, mut requests) = navigator();
        let page = HelpPage::new("settings", nav);
        assert_eq!(page.content().title, "Settings");

        page.close.invoke(&()).unwrap();
        assert_eq!(requests.try_recv().unwrap(), NavigationRequest::CloseHelp);
    }
}
