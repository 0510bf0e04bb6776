// Marketplace backend - API Core
//
// Phone-number-authenticated marketplace with a role-gated seller approval
// workflow. Architecture follows domain-driven design: pure policy decisions
// in domains/accounts/policy.rs, transactional lifecycle operations in
// domains/sellers, listing visibility in domains/store.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
