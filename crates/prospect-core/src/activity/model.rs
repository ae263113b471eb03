//! Activity domain model.

use crate::company::CompanyId;
use crate::status::StatusId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ActivityId = i64;

/// One entry in a company's activity history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub company_id: CompanyId,
    pub date: NaiveDate,
    #[serde(default)]
    pub comment: String,
    pub status_id: StatusId,
    /// Status label resolved at read time, for display
    #[serde(default, skip_serializing)]
    pub status_label: String,
}

/// The editable fields of an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub date: NaiveDate,
    pub comment: String,
    pub status_id: StatusId,
}

impl ActivityDraft {
    /// A blank draft dated today.
    pub fn today(status_id: StatusId) -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
            comment: String::new(),
            status_id,
        }
    }
}

impl From<&Activity> for ActivityDraft {
    fn from(activity: &Activity) -> Self {
        Self {
            date: activity.date,
            comment: activity.comment.clone(),
            status_id: activity.status_id,
        }
    }
}
