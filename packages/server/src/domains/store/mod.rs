pub mod activities;
pub mod data;
pub mod models;
pub mod slug;

pub use data::{CategoryData, CategoryTreeData, ListingData};
pub use models::category::Category;
pub use models::listing::{Listing, ListingFilter, ListingOrdering, ListingScope};
