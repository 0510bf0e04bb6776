pub mod seller_profile;

pub use seller_profile::SellerProfile;
