pub mod errors;
pub mod locale;
pub mod validators;

pub use errors::{is_unique_violation, ApiError, ApiResult, FieldErrors};
pub use locale::Locale;
