pub mod activities;
pub mod data;
pub mod models;

pub use data::SellerProfileData;
pub use models::seller_profile::SellerProfile;
