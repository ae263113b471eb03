//! Text rendering of the main window.

use colored::Colorize;
use prospect_application::navigation::{ActivePage, HeaderInfo};
use prospect_application::pages::{
    CompanyDetailPage, CompanyEditorPage, CompanyOverviewPage, EditorMode, HelpPage, Notice, SettingsPage, WelcomePage,
};
use prospect_core::company::CompanyDetails;

pub fn header(info: &HeaderInfo) {
    println!();
    println!(
        "{} {}",
        info.display_name.bright_magenta().bold(),
        format!("({})", info.course).bright_black()
    );
}

fn notice(notice: Option<&Notice>) {
    match notice {
        Some(Notice::Info(message)) => println!("{}", message.green()),
        Some(Notice::Error(message)) => println!("{}", message.red()),
        None => {}
    }
}

fn title(text: &str) {
    println!("{}", text.bold().underline());
}

fn hint(text: &str) {
    println!("{}", text.bright_black());
}

pub async fn page(active: &ActivePage) {
    match active {
        ActivePage::Welcome(page) => welcome(&*page.read().await),
        ActivePage::Settings(page) => settings(&*page.read().await),
        ActivePage::CompanyOverview(page) => overview(&*page.read().await),
        ActivePage::CompanyDetail(page) => detail(&*page.read().await),
        ActivePage::CompanyEditor(page) => editor(&*page.read().await),
        ActivePage::Help(page) => help(&*page.read().await),
    }
}

fn welcome(page: &WelcomePage) {
    title(page.greeting());
    hint("overview | detail | new | settings | help | quit");
}

fn settings(page: &SettingsPage) {
    title("Settings");
    notice(page.notice());
    hint("secret: change your secret");
}

fn overview(page: &CompanyOverviewPage) {
    title("Companies");
    notice(page.notice());
    if page.rows().is_empty() {
        println!("  No companies yet. Use 'new' to add one.");
    }
    for row in page.rows() {
        let marker = if page.selected() == Some(row.company.id) { ">" } else { " " };
        println!(
            "{} {:>4}  {:<30} {:<20} {}",
            marker,
            row.company.id,
            row.company.details.name,
            row.latest_status.as_deref().unwrap_or("-"),
            row.latest_comment.as_deref().unwrap_or("")
        );
    }
    hint("select <id> | open | refresh");
}

fn detail(page: &CompanyDetailPage) {
    title("Company details");
    notice(page.notice());
    for company in page.companies() {
        let marker = if page.selection().company == Some(company.id) { ">" } else { " " };
        println!("{} {:>4}  {}", marker, company.id, company.details.name);
    }

    if let Some(company) = page.selected_company() {
        println!();
        company_card(&company.details);
        println!();
        if page.activities().is_empty() {
            println!("  No activities recorded.");
        }
        for activity in page.activities() {
            let marker = if page.selection().activity == Some(activity.id) { ">" } else { " " };
            println!(
                "{} {:>4}  {}  {:<20} {}",
                marker, activity.id, activity.date, activity.status_label, activity.comment
            );
        }
    }

    if let Some(form) = page.activity_editor() {
        println!();
        println!("{}", "Activity".bold());
        println!("  date:    {}", form.date);
        println!("  comment: {}", form.comment);
        for status in form.status_options() {
            let marker = if form.selected_status() == Some(status.id) { "(x)" } else { "( )" };
            println!("  {} {:>2} {}", marker, status.id, status.label);
        }
        hint("date <yyyy-mm-dd> | comment <text> | status <id> | save | discard | remove");
    } else {
        hint("company <id> | activity <id> | edit | delete | add | change | refresh");
    }
}

fn company_card(details: &CompanyDetails) {
    println!("  {}", details.name.bold());
    let street = format!("{} {}", details.street, details.house_number);
    let city = format!("{} {}", details.postal_code, details.city);
    for line in [street.trim(), city.trim()] {
        if !line.is_empty() {
            println!("  {}", line);
        }
    }
    if !details.contact_person.is_empty() {
        println!("  Contact: {}", details.contact_person);
    }
    if !details.phone.is_empty() {
        println!("  Phone:   {}", details.phone);
    }
    if !details.email.is_empty() {
        println!("  Email:   {}", details.email);
    }
}

fn editor(page: &CompanyEditorPage) {
    title(match page.mode() {
        EditorMode::Create => "New company",
        EditorMode::Edit(_) => "Edit company",
    });
    notice(page.notice());
    let form = &page.form;
    for (field, value) in [
        ("name", &form.name),
        ("street", &form.street),
        ("house-number", &form.house_number),
        ("postal-code", &form.postal_code),
        ("city", &form.city),
        ("contact", &form.contact_person),
        ("phone", &form.phone),
        ("email", &form.email),
    ] {
        println!("  {:<13} {}", field, value);
    }
    hint(&format!("set <field> <value> | {} | cancel", page.save_label().to_lowercase()));
}

fn help(page: &HelpPage) {
    let content = page.content();
    title(&format!("Help: {}", content.title));
    hint(&format!("Screenshot: {}", content.image_path));
    for entry in &content.legend {
        println!("  {}. {}", entry.number, entry.text);
    }
    hint("close");
}
