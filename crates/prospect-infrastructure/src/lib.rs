pub mod config_service;
pub mod http_credential_service;
pub mod paths;
pub mod storage;
pub mod toml_profile_repository;
pub mod toml_record_store;

pub use crate::config_service::ConfigService;
pub use crate::http_credential_service::HttpCredentialService;
pub use crate::toml_profile_repository::TomlProfileRepository;
pub use crate::toml_record_store::TomlRecordStore;
