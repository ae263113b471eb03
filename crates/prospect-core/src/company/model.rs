//! Company domain model.

use crate::profile::ParticipantId;
use serde::{Deserialize, Serialize};

pub type CompanyId = i64;

/// The editable part of a company record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub house_number: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// A stored company, owned by the participant who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    /// Only the owning participant sees this record
    pub owner: ParticipantId,
    pub details: CompanyDetails,
}

/// A company together with its most recent activity, for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub company: Company,
    pub latest_status: Option<String>,
    pub latest_comment: Option<String>,
}
