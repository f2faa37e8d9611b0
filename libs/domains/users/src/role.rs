use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{Role, RoleType};
use crate::repository::RoleRepository;

/// Resolves role names to the seeded role rows.
pub struct RoleService<R: RoleRepository> {
    repository: Arc<R>,
}

impl<R: RoleRepository> Clone for RoleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// A missing role is [`UserError::RoleNotFound`], never an empty result.
    pub async fn find_by_role_name(&self, name: RoleType) -> UserResult<Role> {
        self.repository
            .find_role_by_name(name)
            .await?
            .ok_or_else(|| {
                tracing::error!(role = %name, "ERROR: ROLE NÃO EXISTENTE.");
                UserError::RoleNotFound
            })
    }
}
