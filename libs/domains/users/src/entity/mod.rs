//! SeaORM entities for the `users`, `roles` and `users_roles` tables.

pub mod role;
pub mod user;
pub mod user_role;
