//! Company repository trait.

use super::model::{Company, CompanyDetails, CompanyId, CompanySummary};
use crate::error::Result;
use crate::profile::ParticipantId;
use async_trait::async_trait;

/// Persistence for company records.
///
/// Every listing is scoped to one owner.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Lists the owner's companies ordered by name.
    async fn list_for_owner(&self, owner: ParticipantId) -> Result<Vec<Company>>;

    /// Lists the owner's companies with the status and comment of their
    /// latest activity.
    async fn list_with_latest_activity(&self, owner: ParticipantId) -> Result<Vec<CompanySummary>>;

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>>;

    /// Stores a new company and returns it with its assigned id.
    async fn add(&self, owner: ParticipantId, details: &CompanyDetails) -> Result<Company>;

    /// Replaces the details of an existing company.
    ///
    /// Returns `NotFound` if the id is unknown.
    async fn update(&self, company: &Company) -> Result<()>;

    /// Deletes a company together with all of its activities.
    async fn delete(&self, id: CompanyId) -> Result<()>;
}
