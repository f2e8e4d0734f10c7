pub mod catalog;
pub mod context;
pub mod favorite;
pub mod output;
pub mod password;
pub mod user;
