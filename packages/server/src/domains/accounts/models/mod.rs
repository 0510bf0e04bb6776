pub mod account;
pub mod address;

pub use account::Account;
pub use address::Address;
