use chrono_tz::Tz;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use std::collections::BTreeSet;

use crate::models::{ProfileType, Role, User, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub name: String,
    pub password: String,
    pub profile_type: ProfileType,
    pub user_status: UserStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Domain user with its roles; timestamps are shifted into `tz`, since
    /// Postgres hands `timestamptz` values back in UTC.
    pub fn into_user(self, roles: BTreeSet<Role>, tz: &Tz) -> User {
        User {
            id: self.id,
            email: self.email,
            name: self.name,
            password: self.password,
            profile: self.profile_type,
            status: self.user_status,
            created_at: self.created_at.with_timezone(tz).fixed_offset(),
            updated_at: self.updated_at.with_timezone(tz).fixed_offset(),
            roles,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            password: Set(user.password.clone()),
            profile_type: Set(user.profile),
            user_status: Set(user.status),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}
