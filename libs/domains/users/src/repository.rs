use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::{Uuid, uuid};

use crate::error::{UserError, UserResult};
use crate::filter::UserSpec;
use crate::models::{Page, PageRequest, Role, RoleType, User};

pub const DUPLICATE_EMAIL: &str = "E-mail já cadastrado!";
pub const DUPLICATE_NAME: &str = "Nome de usuário já cadastrado!";

/// Ids of the rows seeded by the `create_roles` migration.
pub const SEEDED_ROLES: [(Uuid, RoleType); 3] = [
    (uuid!("0193f1a0-0000-7000-8000-000000000001"), RoleType::RoleAdmin),
    (uuid!("0193f1a0-0000-7000-8000-000000000002"), RoleType::RoleFuncionario),
    (uuid!("0193f1a0-0000-7000-8000-000000000003"), RoleType::RoleUsuario),
];

/// Repository trait for User persistence
///
/// `save` is an upsert of the user row together with its role links.
/// Implementations report unique e-mail / name clashes as
/// [`UserError::Field`] on `email` / `nome`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Page of users matching `spec`, ordered by creation time then id
    async fn find_all(&self, spec: &UserSpec, page: PageRequest) -> UserResult<Page<User>>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn save(&self, user: User) -> UserResult<User>;

    /// Remove the user and its role links
    async fn delete(&self, user: &User) -> UserResult<()>;

    async fn exists_by_name(&self, name: &str) -> UserResult<bool>;

    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// Compares against the stored (hashed) value.
    async fn exists_by_password(&self, password: &str) -> UserResult<bool>;
}

/// Read-only access to the seeded roles
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_role_by_name(&self, name: RoleType) -> UserResult<Option<Role>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    roles: Arc<Vec<Role>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Empty user store with the three seeded roles.
    pub fn new() -> Self {
        let roles = SEEDED_ROLES
            .iter()
            .map(|(id, name)| Role { name: *name, id: *id })
            .collect();
        Self::with_roles(roles)
    }

    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            roles: Arc::new(roles),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self, spec: &UserSpec, page: PageRequest) -> UserResult<Page<User>> {
        let users = self.users.read().await;

        let mut matching: Vec<&User> = users.values().filter(|u| spec.matches(u)).collect();
        matching.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let others = || users.values().filter(|u| u.id != user.id);
        if others().any(|u| u.email == user.email) {
            return Err(UserError::field("email", DUPLICATE_EMAIL));
        }
        if others().any(|u| u.name == user.name) {
            return Err(UserError::field("nome", DUPLICATE_NAME));
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "Saved user");
        Ok(user)
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;
        users.remove(&user.id);
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.name == name))
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn exists_by_password(&self, password: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.password == password))
    }
}

#[async_trait]
impl RoleRepository for InMemoryUserRepository {
    async fn find_role_by_name(&self, name: RoleType) -> UserResult<Option<Role>> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(email: &str, name: &str) -> User {
        User::new(
            email.into(),
            name.into(),
            "hash".into(),
            Utc::now().fixed_offset(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(user("a@x.com", "joaosilva")).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicates_from_other_users() {
        let repo = InMemoryUserRepository::new();
        let first = repo.save(user("a@x.com", "joaosilva")).await.unwrap();

        let err = repo.save(user("a@x.com", "mariasilva")).await.unwrap_err();
        assert!(matches!(err, UserError::Field { ref field, .. } if field == "email"));

        let err = repo.save(user("b@x.com", "joaosilva")).await.unwrap_err();
        assert!(matches!(err, UserError::Field { ref field, .. } if field == "nome"));

        // re-saving the same user is an update, not a clash
        assert!(repo.save(first).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all_orders_and_pages() {
        let repo = InMemoryUserRepository::new();
        let base = Utc::now().fixed_offset();
        for i in 0..5 {
            let mut u = user(&format!("u{i}@x.com"), &format!("usuario{i}"));
            u.created_at = base + Duration::seconds(i);
            repo.save(u).await.unwrap();
        }

        let page = repo
            .find_all(&UserSpec::all(), PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        let names: Vec<_> = page.content.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["usuario2", "usuario3"]);
    }

    #[tokio::test]
    async fn test_exists_lifecycle() {
        let repo = InMemoryUserRepository::new();
        assert!(!repo.exists_by_email("a@x.com").await.unwrap());

        let saved = repo.save(user("a@x.com", "joaosilva")).await.unwrap();
        assert!(repo.exists_by_email("a@x.com").await.unwrap());
        assert!(repo.exists_by_name("joaosilva").await.unwrap());
        assert!(repo.exists_by_password("hash").await.unwrap());

        repo.delete(&saved).await.unwrap();
        assert!(!repo.exists_by_email("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_seeded_roles() {
        let repo = InMemoryUserRepository::new();
        let role = repo
            .find_role_by_name(RoleType::RoleUsuario)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(role.id, SEEDED_ROLES[2].0);

        let empty = InMemoryUserRepository::with_roles(vec![]);
        assert!(empty.find_role_by_name(RoleType::RoleAdmin).await.unwrap().is_none());
    }
}
