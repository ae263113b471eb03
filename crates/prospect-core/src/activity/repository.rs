//! Activity repository trait.

use super::model::{Activity, ActivityDraft, ActivityId};
use crate::company::CompanyId;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Lists a company's activities, newest first, with status labels filled in.
    async fn list_for_company(&self, company_id: CompanyId) -> Result<Vec<Activity>>;

    async fn add(&self, company_id: CompanyId, draft: &ActivityDraft) -> Result<Activity>;

    async fn update(&self, id: ActivityId, draft: &ActivityDraft) -> Result<()>;

    async fn delete(&self, id: ActivityId) -> Result<()>;
}
