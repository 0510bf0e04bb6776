pub mod category;
pub mod like;
pub mod listing;
pub mod view;

pub use category::Category;
pub use like::ListingLike;
pub use listing::Listing;
pub use view::ListingView;
