//! Validation logic for the signup form.
//!
//! Kept apart from the page component so the rules can be tested natively.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Positions offered in the signup select.
pub const POSITIONS: [&str; 8] = [
    "Brand Manager",
    "Account Executive",
    "Content Strategist",
    "Graphic Designer",
    "Social Media Manager",
    "Copywriter",
    "Marketing Analyst",
    "Project Manager",
];

/// Validation errors that can occur on the signup form.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    NameRequired,
    EmailRequired,
    InvalidEmail,
    PasswordRequired,
    PasswordTooShort,
    ConfirmRequired,
    PasswordsDoNotMatch,
    PositionRequired,
}

impl ValidationError {
    /// Translation key of the message shown under the field.
    pub fn message_key(self) -> &'static str {
        match self {
            Self::NameRequired => "signup.errors.name_required",
            Self::EmailRequired => "signup.errors.email_required",
            Self::InvalidEmail => "signup.errors.email_invalid",
            Self::PasswordRequired => "signup.errors.password_required",
            Self::PasswordTooShort => "signup.errors.password_too_short",
            Self::ConfirmRequired => "signup.errors.confirm_required",
            Self::PasswordsDoNotMatch => "signup.errors.passwords_dont_match",
            Self::PositionRequired => "signup.errors.position_required",
        }
    }
}

/// Form field a [`ValidationError`] belongs to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SignupField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Position,
}

/// Raw signup form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub position: String,
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

/// Requires something shaped like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirm_password(
    confirm_password: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if confirm_password.is_empty() {
        return Err(ValidationError::ConfirmRequired);
    }
    if confirm_password != password {
        return Err(ValidationError::PasswordsDoNotMatch);
    }
    Ok(())
}

pub fn validate_position(position: &str) -> Result<(), ValidationError> {
    if position.is_empty() {
        return Err(ValidationError::PositionRequired);
    }
    Ok(())
}

impl SignupForm {
    /// Every failing field with its first error, in form order.
    pub fn validate(&self) -> Vec<(SignupField, ValidationError)> {
        [
            (SignupField::Name, validate_name(&self.name)),
            (SignupField::Email, validate_email(&self.email)),
            (SignupField::Password, validate_password(&self.password)),
            (
                SignupField::ConfirmPassword,
                validate_confirm_password(&self.confirm_password, &self.password),
            ),
            (SignupField::Position, validate_position(&self.position)),
        ]
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|err| (field, err)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("dana@example.com" ; "plain address")]
    #[test_case("dana.r+reports@mail.example.co" ; "tagged address")]
    fn accepts_valid_email(email: &str) {
        assert_eq!(validate_email(email), Ok(()));
    }

    #[test_case("", ValidationError::EmailRequired ; "empty")]
    #[test_case("   ", ValidationError::EmailRequired ; "whitespace")]
    #[test_case("dana@example", ValidationError::InvalidEmail ; "no dot in domain")]
    #[test_case("dana.example.com", ValidationError::InvalidEmail ; "no at sign")]
    #[test_case("@example.com", ValidationError::InvalidEmail ; "no local part")]
    fn rejects_invalid_email(email: &str, expected: ValidationError) {
        assert_eq!(validate_email(email), Err(expected));
    }

    #[test]
    fn password_needs_six_characters() {
        assert_eq!(validate_password(""), Err(ValidationError::PasswordRequired));
        assert_eq!(
            validate_password("12345"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_password("123456"), Ok(()));
        assert_eq!(validate_password("päßwö"), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn confirmation_must_match_exactly() {
        assert_eq!(
            validate_confirm_password("", "secret1"),
            Err(ValidationError::ConfirmRequired)
        );
        assert_eq!(
            validate_confirm_password("Secret1", "secret1"),
            Err(ValidationError::PasswordsDoNotMatch)
        );
        assert_eq!(validate_confirm_password("secret1", "secret1"), Ok(()));
    }

    #[test]
    fn blank_name_and_missing_position_are_required() {
        assert_eq!(validate_name("  "), Err(ValidationError::NameRequired));
        assert_eq!(validate_position(""), Err(ValidationError::PositionRequired));
        assert_eq!(validate_position(POSITIONS[0]), Ok(()));
    }

    #[test]
    fn empty_form_reports_every_field_in_order() {
        let errors = SignupForm::default().validate();
        let fields: Vec<_> = errors.iter().map(|(field, _)| *field).collect();
        assert_eq!(
            fields,
            vec![
                SignupField::Name,
                SignupField::Email,
                SignupField::Password,
                SignupField::ConfirmPassword,
                SignupField::Position,
            ]
        );
    }

    #[test]
    fn complete_form_passes() {
        let form = SignupForm {
            name: "Dana Reyes".into(),
            email: "dana@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            position: "Copywriter".into(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn every_error_has_a_message_key() {
        let form = SignupForm {
            email: "nope".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..SignupForm::default()
        };
        for (_, err) in form.validate() {
            assert!(err.message_key().starts_with("signup.errors."));
        }
    }
}
