//! Status taxonomy used to classify activities.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type StatusId = i64;

/// One status option, e.g. "Call" or "Interview".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub label: String,
}

#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Lists every status option ordered by id.
    async fn list_all(&self) -> Result<Vec<Status>>;
}
