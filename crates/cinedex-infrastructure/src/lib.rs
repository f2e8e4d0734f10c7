pub mod catalog_seed;
pub mod config_service;
pub mod dto;
pub mod lookup;
pub mod memory_catalog;
pub mod memory_user_repository;
pub mod paths;
pub mod storage;
pub mod toml_user_repository;

pub use crate::config_service::ConfigService;
pub use crate::memory_catalog::InMemoryCatalog;
pub use crate::memory_user_repository::InMemoryUserRepository;
pub use crate::paths::CinedexPaths;
pub use crate::toml_user_repository::TomlUserRepository;
