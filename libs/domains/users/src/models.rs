use chrono::{DateTime, FixedOffset};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{
    validate_email_field, validate_name_field, validate_old_password_field,
    validate_password_field, validate_role_field,
};

/// Account profile
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "profile_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    #[default]
    #[sea_orm(string_value = "USUARIO")]
    Usuario,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// Account status
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    #[sea_orm(string_value = "ATIVO")]
    Ativo,
    #[sea_orm(string_value = "INATIVO")]
    Inativo,
    #[sea_orm(string_value = "BLOQUEADO")]
    Bloqueado,
}

/// Permission granted to a user
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    #[sea_orm(string_value = "ROLE_ADMIN")]
    RoleAdmin,
    #[sea_orm(string_value = "ROLE_FUNCIONARIO")]
    RoleFuncionario,
    #[sea_orm(string_value = "ROLE_USUARIO")]
    RoleUsuario,
}

/// Seeded role row. Ordered by name so a user's role set is stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub struct Role {
    #[serde(rename = "roleNome")]
    pub name: RoleType,
    #[serde(rename = "roleId")]
    pub id: Uuid,
}

/// User record.
///
/// Serialized with the public field names; the password hash never leaves
/// the service.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    #[serde(rename = "usuarioId")]
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
    /// Argon2 PHC string
    #[serde(skip)]
    pub password: String,
    #[serde(rename = "perfilUsuario")]
    pub profile: ProfileType,
    #[serde(rename = "statusUsuario")]
    pub status: UserStatus,
    #[serde(rename = "dataCriacao")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(rename = "dataAtualizacao")]
    pub updated_at: DateTime<FixedOffset>,
    pub roles: BTreeSet<Role>,
}

impl User {
    /// Registration defaults: `USUARIO` profile, `ATIVO` status, both
    /// timestamps set to `now`, no roles yet.
    pub fn new(email: String, name: String, password: String, now: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password,
            profile: ProfileType::Usuario,
            status: UserStatus::Ativo,
            created_at: now,
            updated_at: now,
            roles: BTreeSet::new(),
        }
    }

    pub fn has_role(&self, role: RoleType) -> bool {
        self.roles.iter().any(|r| r.name == role)
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateUser {
    #[validate(custom(function = "validate_email_field"))]
    #[schema(example = "joao.silva@email.com")]
    pub email: String,

    #[validate(custom(function = "validate_name_field"))]
    #[schema(example = "joaosilva", min_length = 5, max_length = 50)]
    pub nome: String,

    #[validate(custom(function = "validate_password_field"))]
    #[schema(example = "Abcde1!", min_length = 5, max_length = 20)]
    pub senha: String,
}

/// Profile update payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateProfile {
    #[validate(custom(function = "validate_name_field"))]
    #[schema(example = "joaosilva", min_length = 5, max_length = 50)]
    pub nome: String,
}

/// Password change payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdatePassword {
    #[validate(custom(function = "validate_password_field"))]
    #[schema(example = "Novo1!x", min_length = 5, max_length = 20)]
    pub senha: String,

    #[serde(rename = "senhaAntiga")]
    #[validate(custom(function = "validate_old_password_field"))]
    #[schema(example = "Abcde1!", min_length = 5, max_length = 20)]
    pub senha_antiga: String,
}

/// Status change payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateStatus {
    #[serde(rename = "statusUsuario")]
    #[validate(required(message = "Informe o status do usuário"))]
    pub status_usuario: Option<UserStatus>,
}

/// Role grant payload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateRole {
    #[serde(rename = "roleUsuario")]
    #[validate(custom(function = "validate_role_field"))]
    #[schema(example = "ROLE_FUNCIONARIO")]
    pub role_usuario: String,
}

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Postgres binds OFFSET as a signed BIGINT.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination query parameters (`page` is zero-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Zero-based page index (default 0)
    pub page: Option<u64>,
    /// Page size (default 10, at most 100)
    pub size: Option<u64>,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u64 {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Rows to skip, capped at [`MAX_OFFSET`]; pages past the end come back empty.
    pub fn offset(&self) -> u64 {
        self.page().saturating_mul(self.size()).min(MAX_OFFSET)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size();
        Self {
            content,
            page: request.page(),
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::errors::field_errors;
    use chrono::Utc;

    fn create_user(email: &str, nome: &str, senha: &str) -> CreateUser {
        CreateUser {
            email: email.into(),
            nome: nome.into(),
            senha: senha.into(),
        }
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(UserStatus::Bloqueado.to_string(), "BLOQUEADO");
        assert_eq!(ProfileType::Usuario.to_string(), "USUARIO");
        assert_eq!(RoleType::RoleFuncionario.to_string(), "ROLE_FUNCIONARIO");
        assert_eq!("ROLE_ADMIN".parse::<RoleType>().unwrap(), RoleType::RoleAdmin);
        assert_eq!(
            serde_json::to_string(&UserStatus::Inativo).unwrap(),
            "\"INATIVO\""
        );
    }

    #[test]
    fn test_create_user_valid() {
        assert!(create_user("u@x.com", "joaosilva", "Abcde1!").validate().is_ok());
    }

    #[test]
    fn test_create_user_missing_fields_are_field_errors() {
        let input: CreateUser = serde_json::from_str("{}").unwrap();
        let errors = field_errors(&input.validate().unwrap_err());

        assert_eq!(errors["email"], "O campo E-mail é obrigatorio!");
        assert_eq!(errors["nome"], "O campo nome é obrigatorio!");
        assert_eq!(errors["senha"], "O campo senha é obrigatorio");
    }

    #[test]
    fn test_create_user_field_rules() {
        let input = create_user("not-an-email", "jo", "Ab1!");
        let errors = field_errors(&input.validate().unwrap_err());

        assert_eq!(
            errors["email"],
            "O campo deve ser preenhido no formato de E-mail"
        );
        assert_eq!(
            errors["nome"],
            "O número máximo de caracteres é 50, e o mínimo é 5."
        );
        assert_eq!(
            errors["senha"],
            "Informe a senha com no minimo 5 caracteres e no maximo 20"
        );
    }

    #[test]
    fn test_create_user_password_composition() {
        let errors = field_errors(
            &create_user("u@x.com", "joaosilva", "abcdef1")
                .validate()
                .unwrap_err(),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["senha"], crate::validation::PASSWORD_COMPOSITION);
    }

    #[test]
    fn test_update_profile_length_applies() {
        let input = UpdateProfile { nome: "abc".into() };
        assert!(input.validate().is_err());
        let input = UpdateProfile {
            nome: "joaosilva".into(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_password_wire_names() {
        let input: UpdatePassword =
            serde_json::from_str(r#"{"senha":"Novo1!x","senhaAntiga":"Abcde1!"}"#).unwrap();
        assert_eq!(input.senha_antiga, "Abcde1!");
        assert!(input.validate().is_ok());

        let input: UpdatePassword = serde_json::from_str(r#"{"senha":"Novo1!x"}"#).unwrap();
        let errors = field_errors(&input.validate().unwrap_err());
        assert_eq!(errors["senhaAntiga"], "Informe a senha antiga");
    }

    #[test]
    fn test_update_status_required() {
        let input: UpdateStatus = serde_json::from_str("{}").unwrap();
        let errors = field_errors(&input.validate().unwrap_err());
        assert_eq!(errors["statusUsuario"], "Informe o status do usuário");

        let input: UpdateStatus = serde_json::from_str(r#"{"statusUsuario":"BLOQUEADO"}"#).unwrap();
        assert_eq!(input.status_usuario, Some(UserStatus::Bloqueado));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_status_rejects_unknown_value() {
        assert!(serde_json::from_str::<UpdateStatus>(r#"{"statusUsuario":"SUMIDO"}"#).is_err());
    }

    #[test]
    fn test_update_role_rules() {
        let input: UpdateRole = serde_json::from_str(r#"{"roleUsuario":"ROLE_ADMIN"}"#).unwrap();
        assert!(input.validate().is_ok());

        let input: UpdateRole = serde_json::from_str(r#"{"roleUsuario":"ROLE_CHEFE"}"#).unwrap();
        let errors = field_errors(&input.validate().unwrap_err());
        assert_eq!(errors["roleUsuario"], "Permissão inexistente.");

        let input: UpdateRole = serde_json::from_str("{}").unwrap();
        let errors = field_errors(&input.validate().unwrap_err());
        assert_eq!(errors["roleUsuario"], "Informe a permição do usuário");
    }

    #[test]
    fn test_page_request_defaults_and_clamp() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);

        assert_eq!(PageRequest::new(0, 0).size(), 1);
        assert_eq!(PageRequest::new(0, 1000).size(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 20).offset(), 60);
    }

    #[test]
    fn test_page_request_offset_fits_bigint() {
        let huge = PageRequest::new(1_000_000_000_000_000_000, 10);
        assert_eq!(huge.offset(), MAX_OFFSET);
        assert!(i64::try_from(huge.offset()).is_ok());
        assert_eq!(PageRequest::new(u64::MAX, MAX_PAGE_SIZE).offset(), MAX_OFFSET);
    }

    #[test]
    fn test_page_totals() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 7);

        let empty: Page<i32> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 0);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 7);
        assert_eq!(json["totalPages"], 3);
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let now = Utc::now().fixed_offset();
        let mut user = User::new(
            "u@x.com".into(),
            "joaosilva".into(),
            "$argon2id$secret".into(),
            now,
        );
        user.roles.insert(Role {
            name: RoleType::RoleUsuario,
            id: Uuid::new_v4(),
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["nome"], "joaosilva");
        assert_eq!(json["statusUsuario"], "ATIVO");
        assert_eq!(json["perfilUsuario"], "USUARIO");
        assert_eq!(json["roles"][0]["roleNome"], "ROLE_USUARIO");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("secret"));
        assert!(user.has_role(RoleType::RoleUsuario));
        assert!(!user.has_role(RoleType::RoleAdmin));
    }
}
