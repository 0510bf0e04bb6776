pub mod accounts;
pub mod auth;
pub mod sellers;
pub mod store;
