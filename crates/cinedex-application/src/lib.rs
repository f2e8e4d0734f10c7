//! Application layer for Cinedex.
//!
//! This crate provides the use cases that put the pure account rules from
//! `cinedex-core` behind storage: fetch, apply the rule, persist, and retry
//! on optimistic-concurrency conflicts.

pub mod catalog_usecase;
pub mod status;
pub mod user_account_usecase;
mod user_locks;

pub use catalog_usecase::CatalogUsecase;
pub use status::status_code;
pub use user_account_usecase::UserAccountUsecase;
