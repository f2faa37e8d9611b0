use axum::Router;
use domain_users::{Argon2PasswordEncoder, PgUserRepository, UserService, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let timezone = state.config.timezone;
    let repository = PgUserRepository::new(state.db.clone(), timezone);
    let service = UserService::new(
        repository,
        Arc::new(Argon2PasswordEncoder::new()),
        timezone,
    );
    handlers::router(service)
}
