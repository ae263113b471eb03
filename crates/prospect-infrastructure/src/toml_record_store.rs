//! TOML-backed record store for companies, activities and status options.
//!
//! Everything lives in one document so a company and its activities are
//! always written together:
//!
//! ```toml
//! next_company_id = 3
//! next_activity_id = 8
//!
//! [[status]]
//! id = 1
//! label = "Application sent"
//!
//! [[company]]
//! id = 1
//! owner = 1
//! [company.details]
//! name = "Acme"
//!
//! [[activity]]
//! id = 1
//! company_id = 1
//! date = "2025-03-01"
//! status_id = 1
//! ```

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use prospect_core::ProspectError;
use prospect_core::activity::{Activity, ActivityDraft, ActivityId, ActivityRepository};
use prospect_core::company::{Company, CompanyDetails, CompanyId, CompanyRepository, CompanySummary};
use prospect_core::error::Result;
use prospect_core::profile::ParticipantId;
use prospect_core::status::{Status, StatusId, StatusRepository};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// Status options used until the document defines its own.
const DEFAULT_STATUSES: &[(StatusId, &str)] = &[
    (1, "Application sent"),
    (2, "Phone call"),
    (3, "Interview"),
    (4, "Offer"),
    (5, "Rejection"),
    (6, "No response"),
];

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    next_company_id: i64,
    #[serde(default)]
    next_activity_id: i64,
    #[serde(default, rename = "status")]
    statuses: Vec<Status>,
    #[serde(default, rename = "company")]
    companies: Vec<Company>,
    #[serde(default, rename = "activity")]
    activities: Vec<Activity>,
}

impl RecordDocument {
    fn statuses(&self) -> Vec<Status> {
        if self.statuses.is_empty() {
            DEFAULT_STATUSES
                .iter()
                .map(|(id, label)| Status {
                    id: *id,
                    label: (*label).to_string(),
                })
                .collect()
        } else {
            let mut statuses = self.statuses.clone();
            statuses.sort_by_key(|s| s.id);
            statuses
        }
    }

    fn status_label(&self, id: StatusId) -> String {
        self.statuses()
            .into_iter()
            .find(|s| s.id == id)
            .map(|s| s.label)
            .unwrap_or_default()
    }

    fn ensure_status(&self, id: StatusId) -> Result<()> {
        if self.statuses().iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(ProspectError::validation(format!("unknown status id {}", id)))
        }
    }

    fn allocate_company_id(&mut self) -> CompanyId {
        let floor = self.companies.iter().map(|c| c.id).max().unwrap_or(0);
        self.next_company_id = self.next_company_id.max(floor) + 1;
        self.next_company_id
    }

    fn allocate_activity_id(&mut self) -> ActivityId {
        let floor = self.activities.iter().map(|a| a.id).max().unwrap_or(0);
        self.next_activity_id = self.next_activity_id.max(floor) + 1;
        self.next_activity_id
    }

    /// Activities of one company, newest first, labels resolved.
    fn activities_of(&self, company_id: CompanyId) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .map(|mut a| {
                a.status_label = self.status_label(a.status_id);
                a
            })
            .collect();
        activities.sort_by_key(|a| Reverse((a.date, a.id)));
        activities
    }

    fn companies_of(&self, owner: ParticipantId) -> Vec<Company> {
        let mut companies: Vec<Company> = self
            .companies
            .iter()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        companies.sort_by_key(|c| c.details.name.to_lowercase());
        companies
    }
}

fn require_name(details: &CompanyDetails) -> Result<()> {
    if details.name.trim().is_empty() {
        return Err(ProspectError::validation("a company needs a name"));
    }
    Ok(())
}

/// One TOML file implementing the company, activity and status repositories.
///
/// Reads parse the whole document; writes go through
/// [`AtomicTomlFile::update`] so each mutation is a single locked
/// read-modify-write. A refused mutation does not touch the file.
pub struct TomlRecordStore {
    file: AtomicTomlFile<RecordDocument>,
}

impl TomlRecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn read(&self) -> Result<RecordDocument> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut RecordDocument) -> Result<R>) -> Result<R> {
        self.file
            .update(RecordDocument::default(), f)
            .inspect_err(|e| tracing::warn!("[Records] Mutation refused: {}", e))
    }
}

#[async_trait]
impl CompanyRepository for TomlRecordStore {
    async fn list_for_owner(&self, owner: ParticipantId) -> Result<Vec<Company>> {
        Ok(self.read()?.companies_of(owner))
    }

    async fn list_with_latest_activity(&self, owner: ParticipantId) -> Result<Vec<CompanySummary>> {
        let document = self.read()?;
        Ok(document
            .companies_of(owner)
            .into_iter()
            .map(|company| {
                let latest = document.activities_of(company.id).into_iter().next();
                CompanySummary {
                    latest_status: latest.as_ref().map(|a| a.status_label.clone()),
                    latest_comment: latest.map(|a| a.comment),
                    company,
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>> {
        Ok(self.read()?.companies.into_iter().find(|c| c.id == id))
    }

    async fn add(&self, owner: ParticipantId, details: &CompanyDetails) -> Result<Company> {
        require_name(details)?;
        let company = self.mutate(|document| {
            let company = Company {
                id: document.allocate_company_id(),
                owner,
                details: details.clone(),
            };
            document.companies.push(company.clone());
            Ok(company)
        })?;
        tracing::info!("[Records] Added company {} for participant {}", company.id, owner);
        Ok(company)
    }

    async fn update(&self, company: &Company) -> Result<()> {
        require_name(&company.details)?;
        self.mutate(|document| {
            let stored = document
                .companies
                .iter_mut()
                .find(|c| c.id == company.id)
                .ok_or_else(|| ProspectError::not_found("company", company.id.to_string()))?;
            stored.details = company.details.clone();
            Ok(())
        })
    }

    async fn delete(&self, id: CompanyId) -> Result<()> {
        let removed_activities = self.mutate(|document| {
            let before = document.companies.len();
            document.companies.retain(|c| c.id != id);
            if document.companies.len() == before {
                return Err(ProspectError::not_found("company", id.to_string()));
            }
            let activities_before = document.activities.len();
            document.activities.retain(|a| a.company_id != id);
            Ok(activities_before - document.activities.len())
        })?;
        tracing::info!(
            "[Records] Deleted company {} and {} activities",
            id,
            removed_activities
        );
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for TomlRecordStore {
    async fn list_for_company(&self, company_id: CompanyId) -> Result<Vec<Activity>> {
        Ok(self.read()?.activities_of(company_id))
    }

    async fn add(&self, company_id: CompanyId, draft: &ActivityDraft) -> Result<Activity> {
        self.mutate(|document| {
            if !document.companies.iter().any(|c| c.id == company_id) {
                return Err(ProspectError::not_found("company", company_id.to_string()));
            }
            document.ensure_status(draft.status_id)?;
            let activity = Activity {
                id: document.allocate_activity_id(),
                company_id,
                date: draft.date,
                comment: draft.comment.clone(),
                status_id: draft.status_id,
                status_label: document.status_label(draft.status_id),
            };
            document.activities.push(activity.clone());
            Ok(activity)
        })
    }

    async fn update(&self, id: ActivityId, draft: &ActivityDraft) -> Result<()> {
        self.mutate(|document| {
            document.ensure_status(draft.status_id)?;
            let stored = document
                .activities
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| ProspectError::not_found("activity", id.to_string()))?;
            stored.date = draft.date;
            stored.comment = draft.comment.clone();
            stored.status_id = draft.status_id;
            Ok(())
        })
    }

    async fn delete(&self, id: ActivityId) -> Result<()> {
        self.mutate(|document| {
            let before = document.activities.len();
            document.activities.retain(|a| a.id != id);
            if document.activities.len() == before {
                return Err(ProspectError::not_found("activity", id.to_string()));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl StatusRepository for TomlRecordStore {
    async fn list_all(&self) -> Result<Vec<Status>> {
        Ok(self.read()?.statuses())
    }
}
