//! Field validators used by the input contracts.
//!
//! Each validator checks its rules in a fixed order and reports only the
//! first one broken, so a field always carries a single message.

use std::borrow::Cow;
use std::ops::RangeInclusive;

use validator::{ValidateEmail, ValidationError};

use crate::models::RoleType;

pub const EMAIL_REQUIRED: &str = "O campo E-mail é obrigatorio!";
pub const EMAIL_FORMAT: &str = "O campo deve ser preenhido no formato de E-mail";
pub const NAME_REQUIRED: &str = "O campo nome é obrigatorio!";
pub const NAME_LENGTH: &str = "O número máximo de caracteres é 50, e o mínimo é 5.";
pub const PASSWORD_REQUIRED: &str = "O campo senha é obrigatorio";
pub const OLD_PASSWORD_REQUIRED: &str = "Informe a senha antiga";
pub const PASSWORD_LENGTH: &str = "Informe a senha com no minimo 5 caracteres e no maximo 20";
pub const PASSWORD_COMPOSITION: &str = "A senha deve conter ao menos uma letra maiúscula, uma letra minúscula, um número e um caractere especial, sem espaços.";
pub const ROLE_REQUIRED: &str = "Informe a permição do usuário";
pub const ROLE_UNKNOWN: &str = "Permissão inexistente.";

const NAME_CHARS: RangeInclusive<usize> = 5..=50;
const PASSWORD_CHARS: RangeInclusive<usize> = 5..=20;

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_length(
    value: &str,
    bounds: RangeInclusive<usize>,
    message: &'static str,
) -> Result<(), ValidationError> {
    if bounds.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(violation("length", message))
    }
}

/// At least one upper-case letter, one lower-case letter, one digit and
/// one special character. Whitespace is not allowed anywhere.
pub fn validate_password_composition(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    let has_whitespace = password.chars().any(char::is_whitespace);

    if has_upper && has_lower && has_digit && has_special && !has_whitespace {
        Ok(())
    } else {
        Err(violation("password_composition", PASSWORD_COMPOSITION))
    }
}

pub fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(violation("required", EMAIL_REQUIRED));
    }
    if !email.validate_email() {
        return Err(violation("email", EMAIL_FORMAT));
    }
    Ok(())
}

pub fn validate_name_field(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(violation("required", NAME_REQUIRED));
    }
    check_length(name, NAME_CHARS, NAME_LENGTH)
}

fn validate_secret(password: &str, required: &'static str) -> Result<(), ValidationError> {
    if is_blank(password) {
        return Err(violation("required", required));
    }
    check_length(password, PASSWORD_CHARS, PASSWORD_LENGTH)?;
    validate_password_composition(password)
}

pub fn validate_password_field(password: &str) -> Result<(), ValidationError> {
    validate_secret(password, PASSWORD_REQUIRED)
}

pub fn validate_old_password_field(password: &str) -> Result<(), ValidationError> {
    validate_secret(password, OLD_PASSWORD_REQUIRED)
}

/// The value must name a [`RoleType`] exactly, e.g. `ROLE_ADMIN`.
pub fn validate_role_field(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(violation("required", ROLE_REQUIRED));
    }
    value
        .parse::<RoleType>()
        .map(|_| ())
        .map_err(|_| violation("unknown_role", ROLE_UNKNOWN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ValidationError>) -> String {
        result.unwrap_err().message.unwrap().to_string()
    }

    #[test]
    fn test_password_composition_accepts_strong_password() {
        assert!(validate_password_composition("Abcde1!").is_ok());
        assert!(validate_password_composition("Zz9#zz").is_ok());
    }

    #[test]
    fn test_password_composition_rejects_missing_classes() {
        for weak in ["abcde1!", "ABCDE1!", "Abcdef!", "Abcde12", ""] {
            let err = validate_password_composition(weak).unwrap_err();
            assert_eq!(err.code, "password_composition", "{weak}");
        }
    }

    #[test]
    fn test_password_composition_rejects_whitespace() {
        assert!(validate_password_composition("Abc de1!").is_err());
        assert!(validate_password_composition("Abcde1!\t").is_err());
    }

    #[test]
    fn test_email_rules_in_order() {
        assert!(validate_email_field("u@x.com").is_ok());
        assert_eq!(message(validate_email_field("")), EMAIL_REQUIRED);
        assert_eq!(message(validate_email_field("   ")), EMAIL_REQUIRED);
        assert_eq!(message(validate_email_field("not-an-email")), EMAIL_FORMAT);
    }

    #[test]
    fn test_name_rules_in_order() {
        assert!(validate_name_field("joaosilva").is_ok());
        assert_eq!(message(validate_name_field("")), NAME_REQUIRED);
        assert_eq!(message(validate_name_field("jo")), NAME_LENGTH);
        assert_eq!(message(validate_name_field(&"a".repeat(51))), NAME_LENGTH);
        assert!(validate_name_field(&"ã".repeat(50)).is_ok());
    }

    #[test]
    fn test_password_rules_in_order() {
        assert!(validate_password_field("Abcde1!").is_ok());
        assert_eq!(message(validate_password_field("")), PASSWORD_REQUIRED);
        assert_eq!(message(validate_password_field("Ab1!")), PASSWORD_LENGTH);
        assert_eq!(
            message(validate_password_field("Abcdefghij1!Abcdefghij")),
            PASSWORD_LENGTH
        );
        assert_eq!(message(validate_password_field("abcdef1")), PASSWORD_COMPOSITION);
        assert_eq!(message(validate_old_password_field("")), OLD_PASSWORD_REQUIRED);
    }

    #[test]
    fn test_role_rules() {
        assert!(validate_role_field("ROLE_ADMIN").is_ok());
        assert!(validate_role_field("ROLE_FUNCIONARIO").is_ok());
        assert!(validate_role_field("ROLE_USUARIO").is_ok());
        assert_eq!(message(validate_role_field("")), ROLE_REQUIRED);
        assert_eq!(message(validate_role_field("ADMIN")), ROLE_UNKNOWN);
        assert_eq!(message(validate_role_field("role_admin")), ROLE_UNKNOWN);
    }
}
