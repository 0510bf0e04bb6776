pub mod admin_users;
pub mod login;
pub mod profile;
pub mod register;
