//! Form state for adding or editing one activity.

use chrono::NaiveDate;
use prospect_core::activity::{Activity, ActivityDraft, ActivityId};
use prospect_core::status::{Status, StatusId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEditorMode {
    Create,
    Edit(ActivityId),
}

/// The activity form shown on the detail page.
#[derive(Debug, Clone)]
pub struct ActivityEditor {
    mode: ActivityEditorMode,
    pub date: NaiveDate,
    pub comment: String,
    status_options: Vec<Status>,
    selected_status: Option<StatusId>,
}

impl ActivityEditor {
    /// A blank form dated today with no status chosen.
    pub fn for_create(status_options: Vec<Status>) -> Self {
        Self {
            mode: ActivityEditorMode::Create,
            date: chrono::Local::now().date_naive(),
            comment: String::new(),
            status_options,
            selected_status: None,
        }
    }

    /// A copy of `activity`, with its status preselected when it is still an option.
    pub fn for_edit(activity: &Activity, status_options: Vec<Status>) -> Self {
        let selected_status = status_options
            .iter()
            .find(|status| status.id == activity.status_id)
            .map(|status| status.id);
        Self {
            mode: ActivityEditorMode::Edit(activity.id),
            date: activity.date,
            comment: activity.comment.clone(),
            status_options,
            selected_status,
        }
    }

    pub fn mode(&self) -> ActivityEditorMode {
        self.mode
    }

    pub fn status_options(&self) -> &[Status] {
        &self.status_options
    }

    pub fn selected_status(&self) -> Option<StatusId> {
        self.selected_status
    }

    /// Chooses a status. Returns false and keeps the old choice for ids that
    /// are not among the options.
    pub fn select_status(&mut self, id: StatusId) -> bool {
        if self.status_options.iter().any(|status| status.id == id) {
            self.selected_status = Some(id);
            true
        } else {
            false
        }
    }

    /// The form as a draft, or `None` while no status is chosen.
    pub fn draft(&self) -> Option<ActivityDraft> {
        self.selected_status.map(|status_id| ActivityDraft {
            date: self.date,
            comment: self.comment.clone(),
            status_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<Status> {
        vec![
            Status {
                id: 1,
                label: "Application sent".to_string(),
            },
            Status {
                id: 2,
                label: "Phone call".to_string(),
            },
        ]
    }

    fn activity(status_id: StatusId) -> Activity {
        Activity {
            id: 7,
            company_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            comment: "called back".to_string(),
            status_id,
            status_label: String::new(),
        }
    }

    #[test]
    fn test_edit_preselects_matching_status() {
        let editor = ActivityEditor::for_edit(&activity(2), options());
        assert_eq!(editor.mode(), ActivityEditorMode::Edit(7));
        assert_eq!(editor.selected_status(), Some(2));
        assert_eq!(editor.draft().unwrap().comment, "called back");
    }

    #[test]
    fn test_edit_with_retired_status_has_no_selection() {
        let editor = ActivityEditor::for_edit(&activity(9), options());
        assert_eq!(editor.selected_status(), None);
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_create_needs_a_status() {
        let mut editor = ActivityEditor::for_create(options());
        assert!(editor.draft().is_none());
        assert!(!editor.select_status(42));
        assert!(editor.select_status(1));
        assert_eq!(editor.draft().unwrap().status_id, 1);
    }
}
