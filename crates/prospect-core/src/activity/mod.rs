//! Activity history of a company.

mod model;
mod repository;

pub use model::{Activity, ActivityDraft, ActivityId};
pub use repository::ActivityRepository;
