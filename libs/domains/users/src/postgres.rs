use async_trait::async_trait;
use chrono_tz::Tz;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::{
    entity::{role, user, user_role},
    error::{UserError, UserResult},
    filter::UserSpec,
    models::{Page, PageRequest, Role, RoleType, User},
    repository::{DUPLICATE_EMAIL, DUPLICATE_NAME, RoleRepository, UserRepository},
};

const EMAIL_CONSTRAINT: &str = "uq_users_email";
const NAME_CONSTRAINT: &str = "uq_users_name";

/// SeaORM-backed gateway for users and roles.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
    timezone: Tz,
}

impl PgUserRepository {
    /// `timezone` is the zone timestamps are presented in after a read.
    pub fn new(db: DatabaseConnection, timezone: Tz) -> Self {
        Self { db, timezone }
    }

    /// Role sets for the given users, one query through the join table.
    async fn roles_for<C>(&self, conn: &C, ids: &[Uuid]) -> Result<HashMap<Uuid, BTreeSet<Role>>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut roles: HashMap<Uuid, BTreeSet<Role>> = HashMap::new();
        if ids.is_empty() {
            return Ok(roles);
        }

        let links = user_role::Entity::find()
            .filter(user_role::Column::UserId.is_in(ids.iter().copied()))
            .find_also_related(role::Entity)
            .all(conn)
            .await?;

        for (link, role) in links {
            if let Some(role) = role {
                roles.entry(link.user_id).or_default().insert(role.into());
            }
        }
        Ok(roles)
    }

    fn to_users(&self, models: Vec<user::Model>, mut roles: HashMap<Uuid, BTreeSet<Role>>) -> Vec<User> {
        models
            .into_iter()
            .map(|model| {
                let user_roles = roles.remove(&model.id).unwrap_or_default();
                model.into_user(user_roles, &self.timezone)
            })
            .collect()
    }

    async fn exists(&self, condition: sea_orm::Condition) -> UserResult<bool> {
        let found = user::Entity::find()
            .filter(condition)
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }
}

/// One page of matching users, oldest first.
fn page_query(spec: &UserSpec, page: PageRequest) -> Select<user::Entity> {
    user::Entity::find()
        .filter(spec.condition())
        .order_by_asc(user::Column::CreatedAt)
        .order_by_asc(user::Column::Id)
        .offset(page.offset())
        .limit(page.size())
}

/// Field error for a violated `users` unique index, named in the driver message.
fn classify_unique(detail: &str) -> Option<UserError> {
    if detail.contains(EMAIL_CONSTRAINT) {
        Some(UserError::field("email", DUPLICATE_EMAIL))
    } else if detail.contains(NAME_CONSTRAINT) {
        Some(UserError::field("nome", DUPLICATE_NAME))
    } else {
        None
    }
}

/// Unique violations become the same field errors as the service pre-checks.
fn map_save_error(err: DbErr) -> UserError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        if let Some(field_error) = classify_unique(&detail) {
            return field_error;
        }
    }
    UserError::Database(err)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self, spec: &UserSpec, page: PageRequest) -> UserResult<Page<User>> {
        let total = user::Entity::find()
            .filter(spec.condition())
            .count(&self.db)
            .await?;
        let models = page_query(spec, page).all(&self.db).await?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let roles = self.roles_for(&self.db, &ids).await?;

        Ok(Page::new(self.to_users(models, roles), page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let roles = self.roles_for(&self.db, &[id]).await?;
        Ok(self.to_users(vec![model], roles).pop())
    }

    async fn save(&self, user: User) -> UserResult<User> {
        let txn = self.db.begin().await?;

        let active: user::ActiveModel = (&user).into();
        let existing = user::Entity::find_by_id(user.id).one(&txn).await?;
        let result = match existing {
            Some(_) => user::Entity::update(active).exec(&txn).await.map(|_| ()),
            None => user::Entity::insert(active)
                .exec_without_returning(&txn)
                .await
                .map(|_| ()),
        };
        result.map_err(map_save_error)?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user.id))
            .exec(&txn)
            .await?;
        for role in &user.roles {
            user_role::Entity::insert(user_role::ActiveModel::link(user.id, role.id))
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        tracing::info!(user_id = %user.id, "Saved user");
        Ok(user)
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        // users_roles rows go with the user (ON DELETE CASCADE)
        user::Entity::delete_by_id(user.id).exec(&self.db).await?;
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> UserResult<bool> {
        self.exists(sea_orm::Condition::all().add(user::Column::Name.eq(name)))
            .await
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        self.exists(sea_orm::Condition::all().add(user::Column::Email.eq(email)))
            .await
    }

    async fn exists_by_password(&self, password: &str) -> UserResult<bool> {
        self.exists(sea_orm::Condition::all().add(user::Column::Password.eq(password)))
            .await
    }
}

#[async_trait]
impl RoleRepository for PgUserRepository {
    async fn find_role_by_name(&self, name: RoleType) -> UserResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::RoleName.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }
}
