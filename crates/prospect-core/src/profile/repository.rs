//! Profile repository trait.

use super::model::Profile;
use crate::error::Result;
use async_trait::async_trait;

/// Read-only access to the local profile store.
///
/// Implementations must keep "not found" and "could not check" apart: the
/// bootstrap gate reports them to the user differently.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by its login identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))`: Profile found
    /// - `Ok(None)`: No profile with this identifier
    /// - `Err(_)`: The store could not be read
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Profile>>;
}
