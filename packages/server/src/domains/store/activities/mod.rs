pub mod browse;
pub mod create_listing;
pub mod engagement;
pub mod update_listing;
