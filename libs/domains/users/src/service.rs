use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::filter::UserSpec;
use crate::models::{
    CreateUser, Page, PageRequest, RoleType, UpdatePassword, UpdateProfile, UpdateRole,
    UpdateStatus, User, UserStatus,
};
use crate::password::PasswordEncoder;
use crate::repository::{DUPLICATE_EMAIL, DUPLICATE_NAME, RoleRepository, UserRepository};
use crate::role::RoleService;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Recife;
pub const WRONG_OLD_PASSWORD: &str = "Senha antiga incorreta!";

/// Service layer for User business logic
pub struct UserService<R: UserRepository + RoleRepository> {
    repository: Arc<R>,
    roles: RoleService<R>,
    encoder: Arc<dyn PasswordEncoder>,
    timezone: Tz,
}

impl<R: UserRepository + RoleRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            roles: self.roles.clone(),
            encoder: Arc::clone(&self.encoder),
            timezone: self.timezone,
        }
    }
}

impl<R: UserRepository + RoleRepository> UserService<R> {
    pub fn new(repository: R, encoder: Arc<dyn PasswordEncoder>, timezone: Tz) -> Self {
        let repository = Arc::new(repository);
        Self {
            roles: RoleService::new(Arc::clone(&repository)),
            repository,
            encoder,
            timezone,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone).fixed_offset()
    }

    pub async fn find_all(&self, spec: &UserSpec, page: PageRequest) -> UserResult<Page<User>> {
        self.repository.find_all(spec, page).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> UserResult<User> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            tracing::error!(user_id = %id, "ERRO, USUARIO NÃO ENCONTRADO!");
            UserError::NotFound(id)
        })
    }

    /// Removes the loaded user and hands it back.
    pub async fn delete(&self, user: User) -> UserResult<User> {
        self.repository.delete(&user).await?;
        tracing::info!(user_id = %user.id, "Deleted user");
        Ok(user)
    }

    /// Register a new user.
    ///
    /// Order: uniqueness checks, record with defaults, hash, default role,
    /// persist. The unique constraints still catch a concurrent duplicate.
    pub async fn create(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;

        if self.exists_by_email(&input.email).await? {
            return Err(UserError::field("email", DUPLICATE_EMAIL));
        }
        if self.exists_by_name(&input.nome).await? {
            return Err(UserError::field("nome", DUPLICATE_NAME));
        }

        let mut user = User::new(input.email, input.nome, input.senha, self.now());
        user.password = self.encoder.encode(&user.password)?;

        let role = self.roles.find_by_role_name(RoleType::RoleUsuario).await?;
        user.roles.insert(role);

        let created = self.repository.save(user).await?;
        tracing::info!(user_id = %created.id, "Created user");
        Ok(created)
    }

    /// Rename the user. Also reactivates the account.
    pub async fn update_profile(&self, mut user: User, input: UpdateProfile) -> UserResult<User> {
        input.validate()?;

        if input.nome != user.name && self.exists_by_name(&input.nome).await? {
            return Err(UserError::field("nome", DUPLICATE_NAME));
        }

        user.name = input.nome;
        user.status = UserStatus::Ativo;
        user.updated_at = self.now();

        self.repository.save(user).await
    }

    /// Replace the password after checking the current one.
    pub async fn update_password(&self, mut user: User, input: UpdatePassword) -> UserResult<User> {
        input.validate()?;

        if !self.encoder.matches(&input.senha_antiga, &user.password) {
            tracing::info!(user_id = %user.id, "Old password mismatch");
            return Err(UserError::field("senhaAntiga", WRONG_OLD_PASSWORD));
        }

        user.password = self.encoder.encode(&input.senha)?;
        user.updated_at = self.now();

        self.repository.save(user).await
    }

    /// Set the status as given. `updated_at` is left untouched.
    pub async fn update_status(&self, mut user: User, input: UpdateStatus) -> UserResult<User> {
        input.validate()?;

        if let Some(status) = input.status_usuario {
            user.status = status;
        }

        self.repository.save(user).await
    }

    /// Grant a role. Granting a role the user already holds changes nothing
    /// but `updated_at`.
    pub async fn update_role(&self, mut user: User, input: UpdateRole) -> UserResult<User> {
        input.validate()?;

        let name: RoleType = input
            .role_usuario
            .parse()
            .map_err(|_| UserError::field("roleUsuario", "Permissão inexistente."))?;
        let role = self.roles.find_by_role_name(name).await?;

        user.roles.insert(role);
        user.updated_at = self.now();

        self.repository.save(user).await
    }

    pub async fn exists_by_name(&self, name: &str) -> UserResult<bool> {
        self.repository.exists_by_name(name).await
    }

    pub async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        self.repository.exists_by_email(email).await
    }

    pub async fn exists_by_password(&self, password: &str) -> UserResult<bool> {
        self.repository.exists_by_password(password).await
    }
}
