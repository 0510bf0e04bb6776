pub mod activities;
pub mod data;
pub mod models;
pub mod password;
pub mod policy;
pub mod role;

pub use data::AccountData;
pub use models::account::Account;
pub use policy::{authorize, Action, Actor, Decision, DenyReason};
pub use role::Role;
