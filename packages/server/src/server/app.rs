//! Application setup and router wiring.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::server::middleware::{
    extract_client_ip, jwt_auth_middleware, rate_limit_middleware, security_headers, RateLimiter,
};
use crate::server::routes::{accounts, admin_users, auth, health_handler, sellers, store};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];
    let headers = [AUTHORIZATION, CONTENT_TYPE];

    if allowed_origins.is_empty() {
        // No configured origins: open CORS for development
        return CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit_authenticated,
        config.rate_limit_anonymous,
    ));

    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
    };

    let cors = build_cors(&config.allowed_origins);

    let api = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/refresh", post(auth::refresh_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route(
            "/accounts/me",
            get(accounts::me_handler).patch(accounts::update_me_handler),
        )
        .route("/sellers/request", post(sellers::request_handler))
        .route("/admin/sellers/pending", get(sellers::pending_handler))
        .route(
            "/admin/sellers/:id/approval",
            patch(sellers::approval_handler),
        )
        .route(
            "/admin/users",
            get(admin_users::list_handler).post(admin_users::create_handler),
        )
        .route("/admin/users/stats", get(admin_users::stats_handler))
        .route(
            "/admin/users/:id",
            get(admin_users::get_handler)
                .patch(admin_users::update_handler)
                .delete(admin_users::delete_handler),
        )
        .route("/store/categories", get(store::list_categories_handler))
        .route("/store/categories/tree", get(store::category_tree_handler))
        .route(
            "/store/listings",
            get(store::list_listings_handler).post(store::create_listing_handler),
        )
        .route("/store/listings/my", get(store::my_listings_handler))
        .route("/store/listings/popular", get(store::popular_handler))
        .route("/store/listings/featured", get(store::featured_handler))
        .route(
            "/store/listings/:slug",
            get(store::get_listing_handler)
                .patch(store::update_listing_handler)
                .delete(store::delete_listing_handler),
        )
        .route("/store/listings/:slug/like", post(store::toggle_like_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
