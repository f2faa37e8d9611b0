//! Users Domain
//!
//! Registration, lookup and maintenance of user accounts.
//!
//! # Features
//!
//! - Registration with per-field validation and Argon2 password hashing
//! - Paged listing with dynamic filters (`usuarioId`, `email`, `senha`, `nome`)
//! - Profile, password, status and role updates
//! - Seeded roles (`ROLE_ADMIN`, `ROLE_FUNCIONARIO`, `ROLE_USUARIO`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, OpenAPI paths
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, hashing, role lookup
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, input contracts, enums, entities
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_users::{
//!     handlers,
//!     password::Argon2PasswordEncoder,
//!     repository::InMemoryUserRepository,
//!     service::{DEFAULT_TIMEZONE, UserService},
//! };
//!
//! let service = UserService::new(
//!     InMemoryUserRepository::new(),
//!     Arc::new(Argon2PasswordEncoder::new()),
//!     DEFAULT_TIMEZONE,
//! );
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod role;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use filter::{UserFilter, UserSpec};
pub use models::{
    CreateUser, Page, PageRequest, ProfileType, Role, RoleType, UpdatePassword, UpdateProfile,
    UpdateRole, UpdateStatus, User, UserStatus,
};
pub use password::{Argon2PasswordEncoder, PasswordEncoder};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, RoleRepository, UserRepository};
pub use role::RoleService;
pub use service::UserService;
