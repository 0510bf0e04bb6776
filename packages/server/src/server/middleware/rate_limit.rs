//! Fixed one-hour window rate limiting.
//!
//! Authenticated requests count against the account id with the higher
//! ceiling; anonymous requests count against the client IP with the lower
//! one. Counters live in process memory, so a restart clears them and
//! multiple replicas each enforce their own budget.

use axum::{middleware::Next, response::IntoResponse, response::Response};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;
use uuid::Uuid;

use crate::common::ApiError;
use crate::server::middleware::{AuthUser, ClientIp};

const WINDOW: Duration = Duration::from_secs(3600);

// Expired windows are swept once the map grows past this.
const PRUNE_THRESHOLD: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RateKey {
    Account(Uuid),
    Client(IpAddr),
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    window: Duration,
    authenticated_ceiling: u32,
    anonymous_ceiling: u32,
    windows: Mutex<HashMap<RateKey, Window>>,
}

impl RateLimiter {
    pub fn new(authenticated_ceiling: u32, anonymous_ceiling: u32) -> Self {
        Self::with_window(authenticated_ceiling, anonymous_ceiling, WINDOW)
    }

    fn with_window(authenticated_ceiling: u32, anonymous_ceiling: u32, window: Duration) -> Self {
        Self {
            window,
            authenticated_ceiling,
            anonymous_ceiling,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against the key. Err(RateLimited) once the window
    /// ceiling is reached; the rejected request is not counted.
    pub fn check(&self, key: RateKey) -> Result<(), ApiError> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: RateKey, now: Instant) -> Result<(), ApiError> {
        let ceiling = match key {
            RateKey::Account(_) => self.authenticated_ceiling,
            RateKey::Client(_) => self.anonymous_ceiling,
        };

        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= ceiling {
            return Err(ApiError::RateLimited);
        }

        entry.count += 1;
        Ok(())
    }
}

/// Rate limiting middleware. Must run after jwt_auth_middleware and
/// extract_client_ip so the extensions it reads are populated.
pub async fn rate_limit_middleware(
    limiter: Arc<RateLimiter>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let key = match request.extensions().get::<AuthUser>() {
        Some(user) => RateKey::Account(user.account_id),
        None => {
            let ip = request
                .extensions()
                .get::<ClientIp>()
                .map(|c| c.0)
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            RateKey::Client(ip)
        }
    };

    if let Err(err) = limiter.check(key.clone()) {
        warn!(?key, "Request rate limited");
        return err.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip_key() -> RateKey {
        RateKey::Client("192.0.2.1".parse().unwrap())
    }

    #[test]
    fn test_anonymous_ceiling_enforced() {
        let limiter = RateLimiter::new(1000, 3);

        for _ in 0..3 {
            assert!(limiter.check(ip_key()).is_ok());
        }
        assert!(matches!(
            limiter.check(ip_key()),
            Err(ApiError::RateLimited)
        ));
    }

    #[test]
    fn test_authenticated_ceiling_is_higher() {
        let limiter = RateLimiter::new(5, 2);
        let key = RateKey::Account(Uuid::new_v4());

        for _ in 0..5 {
            assert!(limiter.check(key.clone()).is_ok());
        }
        assert!(limiter.check(key).is_err());
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1000, 1);
        let other = RateKey::Client("192.0.2.2".parse().unwrap());

        assert!(limiter.check(ip_key()).is_ok());
        assert!(limiter.check(ip_key()).is_err());
        // A different IP still has its own budget
        assert!(limiter.check(other).is_ok());
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::with_window(1000, 1, Duration::from_millis(20));

        assert!(limiter.check(ip_key()).is_ok());
        assert!(limiter.check(ip_key()).is_err());

        std::thread::sleep(Duration::from_millis(30));

        assert!(limiter.check(ip_key()).is_ok());
    }

    #[test]
    fn test_rejected_requests_do_not_consume_budget() {
        let limiter = RateLimiter::with_window(1000, 1, Duration::from_millis(20));

        assert!(limiter.check(ip_key()).is_ok());
        for _ in 0..10 {
            assert!(limiter.check(ip_key()).is_err());
        }

        std::thread::sleep(Duration::from_millis(30));

        // Rejections inside the old window did not poison the new one
        assert!(limiter.check(ip_key()).is_ok());
    }

    #[test]
    fn test_concurrent_checks_never_exceed_ceiling() {
        let limiter = Arc::new(RateLimiter::new(1000, 100));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || {
                    (0..50).filter(|_| limiter.check(ip_key()).is_ok()).count()
                })
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 100);
    }
}
