pub mod ip_extractor;
pub mod jwt_auth;
pub mod rate_limit;
pub mod security_headers;

pub use ip_extractor::{extract_client_ip, ClientIp};
pub use jwt_auth::{jwt_auth_middleware, AuthUser};
pub use rate_limit::{rate_limit_middleware, RateKey, RateLimiter};
pub use security_headers::security_headers;
