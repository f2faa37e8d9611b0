//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`errors`]**: `AppError` → `{status, message, errors}` translation, error codes,
//!   OpenAPI response types
//! - **[`extractors`]**: JSON/query/UUID extractors that reject with `AppError`
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?.merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, build_router,
    create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldErrors};

pub use extractors::{QueryParams, UuidPath, ValidatedJson};
