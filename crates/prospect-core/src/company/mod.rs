//! Company (prospect) records.

mod model;
mod repository;

pub use model::{Company, CompanyDetails, CompanyId, CompanySummary};
pub use repository::CompanyRepository;
