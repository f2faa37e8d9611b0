//! Dynamic user filter built from the list endpoint's query string.
//!
//! Every supplied parameter becomes one predicate and the predicates are
//! AND-ed. No parameter means no restriction.
//!
//! | parameter   | predicate                     |
//! |-------------|-------------------------------|
//! | `usuarioId` | id equals                     |
//! | `email`     | email equals                  |
//! | `senha`     | stored password equals        |
//! | `nome`      | name contains (`LIKE '%v%'`)  |
//!
//! `senha` is compared against the stored Argon2 hash, so a plaintext value
//! can never match.

use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::user;
use crate::models::User;

/// Query parameters accepted by `GET /usuarios`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    /// Exact user id
    #[serde(default, deserialize_with = "blank_as_none")]
    pub usuario_id: Option<Uuid>,
    /// Exact e-mail
    pub email: Option<String>,
    /// Exact stored password value
    pub senha: Option<String>,
    /// Substring of the user name (case-sensitive)
    pub nome: Option<String>,
}

/// Predicate over users, evaluated either in SQL or in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSpec {
    id: Option<Uuid>,
    email: Option<String>,
    password: Option<String>,
    name_contains: Option<String>,
}

/// `?usuarioId=` means no id filter, like the other empty parameters.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn supplied(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl From<&UserFilter> for UserSpec {
    fn from(filter: &UserFilter) -> Self {
        Self {
            id: filter.usuario_id,
            email: supplied(&filter.email),
            password: supplied(&filter.senha),
            name_contains: supplied(&filter.nome),
        }
    }
}

impl UserSpec {
    /// Matches every user.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(id) = self.id {
            condition = condition.add(user::Column::Id.eq(id));
        }
        if let Some(email) = &self.email {
            condition = condition.add(user::Column::Email.eq(email.as_str()));
        }
        if let Some(password) = &self.password {
            condition = condition.add(user::Column::Password.eq(password.as_str()));
        }
        if let Some(name) = &self.name_contains {
            condition = condition.add(user::Column::Name.contains(name.as_str()));
        }

        condition
    }

    pub fn matches(&self, user: &User) -> bool {
        self.id.is_none_or(|id| user.id == id)
            && self.email.as_ref().is_none_or(|email| &user.email == email)
            && self
                .password
                .as_ref()
                .is_none_or(|password| &user.password == password)
            && self
                .name_contains
                .as_ref()
                .is_none_or(|name| user.name.contains(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn user(email: &str, name: &str) -> User {
        User::new(
            email.into(),
            name.into(),
            "$argon2id$v=19$hash".into(),
            Utc::now().fixed_offset(),
        )
    }

    fn filter(query: &str) -> UserFilter {
        serde_json::from_str(query).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let spec = UserSpec::from(&UserFilter::default());
        assert!(spec.is_empty());
        assert!(spec.matches(&user("a@x.com", "joaosilva")));

        let unfiltered = user::Entity::find().build(DbBackend::Postgres).to_string();
        let sql = user::Entity::find()
            .filter(spec.condition())
            .build(DbBackend::Postgres)
            .to_string();
        // an empty AND group renders as `WHERE TRUE` or not at all
        let restriction = sql.strip_prefix(unfiltered.as_str()).unwrap_or(sql.as_str());
        assert!(
            restriction.is_empty() || restriction == " WHERE TRUE",
            "unexpected restriction: {sql}"
        );
    }

    #[test]
    fn test_name_is_substring_match() {
        let spec = UserSpec::from(&filter(r#"{"nome":"jo"}"#));
        assert!(spec.matches(&user("a@x.com", "joaosilva")));
        assert!(spec.matches(&user("b@x.com", "majo")));
        assert!(!spec.matches(&user("c@x.com", "mariasilva")));
        assert!(!spec.matches(&user("d@x.com", "JOAO")));

        let sql = user::Entity::find()
            .filter(spec.condition())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("LIKE '%jo%'"), "{sql}");
    }

    #[test]
    fn test_parameters_are_anded() {
        let spec = UserSpec::from(&filter(r#"{"email":"a@x.com","nome":"jo"}"#));
        assert!(spec.matches(&user("a@x.com", "joaosilva")));
        assert!(!spec.matches(&user("a@x.com", "mariasilva")));
        assert!(!spec.matches(&user("b@x.com", "joaosilva")));

        let sql = user::Entity::find()
            .filter(spec.condition())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("= 'a@x.com'"), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_id_filter() {
        let target = user("a@x.com", "joaosilva");
        let spec = UserSpec::from(&UserFilter {
            usuario_id: Some(target.id),
            ..Default::default()
        });
        assert!(spec.matches(&target));
        assert!(!spec.matches(&user("a@x.com", "joaosilva")));
    }

    #[test]
    fn test_plaintext_password_never_matches_hash() {
        let spec = UserSpec::from(&filter(r#"{"senha":"Abcde1!"}"#));
        assert!(!spec.matches(&user("a@x.com", "joaosilva")));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let spec = UserSpec::from(&filter(r#"{"email":"","nome":""}"#));
        assert!(spec.is_empty());
    }

    #[test]
    fn test_filter_wire_names() {
        let id = uuid::Uuid::new_v4();
        let parsed = filter(&format!(r#"{{"usuarioId":"{id}"}}"#));
        assert_eq!(parsed.usuario_id, Some(id));
    }

    #[test]
    fn test_blank_id_is_ignored() {
        let parsed = filter(r#"{"usuarioId":"","nome":"jo"}"#);
        assert_eq!(parsed.usuario_id, None);
        assert_eq!(parsed.nome.as_deref(), Some("jo"));

        assert!(serde_json::from_str::<UserFilter>(r#"{"usuarioId":"abc"}"#).is_err());
        assert_eq!(filter("{}").usuario_id, None);
    }
}
