//! Request contract served by the CLI: change an account password by e-mail
//!
//! The e-mail comes from the route, the passwords from the JSON body.

use regex::Regex;
use serde::{Deserialize, Serialize};
use specgate_engine::{
    ErrorEntry, ErrorMessage, Translations, TypedValidator, ValidationResult,
    ValidationResultBuilder,
};
use specgate_pipeline::{Model, Property};
use std::sync::{Arc, OnceLock};

pub const EMAIL_MAX_LENGTH: usize = 254;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 64;

/// Code attached to the "passwords must differ" rule
pub const PASSWORDS_MUST_NOT_EQUAL: &str = "PasswordsMustNotEqual";

/// Route part of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeAccountPasswordByEmailRoute {
    pub email: Option<String>,
}

/// Body part of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAccountPasswordByEmailBody {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl Model for ChangeAccountPasswordByEmailRoute {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![Property::optional("Email", self.email.as_ref()).required()]
    }
}

impl Model for ChangeAccountPasswordByEmailBody {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::optional("CurrentPassword", self.current_password.as_ref()).required(),
            Property::optional("NewPassword", self.new_password.as_ref()).required(),
        ]
    }
}

/// English and Polish messages for the contract's rules
pub fn translations() -> Translations {
    Translations::new()
        .with_language(
            "English",
            [
                ("Texts.Required", "Required"),
                ("Texts.NotEmpty", "Must not be empty"),
                ("Texts.NotWhitespace", "Must not consist only of whitespace characters"),
                ("Texts.Email", "Must be a valid email address"),
                ("Texts.MinLength", "Must be at least {min} characters in length"),
                ("Texts.MaxLength", "Must be at most {max} characters in length"),
                ("Text.PasswordsMustNotEqual", "Current and new password must not be the same."),
            ],
        )
        .with_language(
            "Polish",
            [
                ("Texts.Required", "Wymagane"),
                ("Texts.NotEmpty", "Nie może być pusty"),
                ("Texts.NotWhitespace", "Nie może zawierać wyłącznie białych znaków"),
                ("Texts.Email", "Musi być poprawnym adresem email"),
                ("Texts.MinLength", "Musi być długości minimalnie {min} znaków"),
                ("Texts.MaxLength", "Musi być długości maksymalnie {max} znaków"),
                ("Text.PasswordsMustNotEqual", "Obecne i nowe hasło nie mogą być takie same."),
            ],
        )
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("e-mail pattern is a valid regex")
    })
}

fn min_length(min: usize) -> ErrorEntry {
    ErrorEntry::message(ErrorMessage::new("Texts.MinLength").arg("min", min))
}

fn max_length(max: usize) -> ErrorEntry {
    ErrorEntry::message(ErrorMessage::new("Texts.MaxLength").arg("max", max))
}

fn check_length(
    builder: &mut ValidationResultBuilder,
    path: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let length = value.chars().count();
    if length < min {
        builder.add(path, min_length(min));
    } else if length > max {
        builder.add(path, max_length(max));
    }
}

/// Rules for the route e-mail
///
/// Members are required: a missing e-mail reports `Texts.Required`, which
/// takes the place of the framework's own required message.
pub struct RouteValidator {
    translations: Arc<Translations>,
}

impl RouteValidator {
    pub fn new(translations: Arc<Translations>) -> Self {
        Self { translations }
    }
}

impl TypedValidator<ChangeAccountPasswordByEmailRoute> for RouteValidator {
    fn validate(
        &self,
        model: &ChangeAccountPasswordByEmailRoute,
        fail_fast: bool,
    ) -> ValidationResult {
        let mut builder = ValidationResult::builder(self.translations());
        let Some(email) = model.email.as_deref() else {
            builder.add("Email", ErrorEntry::message("Texts.Required"));
            return builder.build();
        };

        if email.trim().is_empty() {
            builder.add("Email", ErrorEntry::message("Texts.NotWhitespace"));
            return builder.build();
        }
        if !email_regex().is_match(email) {
            builder.add("Email", ErrorEntry::message("Texts.Email"));
            if fail_fast {
                return builder.build();
            }
        }
        if email.chars().count() > EMAIL_MAX_LENGTH {
            builder.add("Email", max_length(EMAIL_MAX_LENGTH));
        }
        builder.build()
    }

    fn translations(&self) -> Arc<Translations> {
        self.translations.clone()
    }

    fn template(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder(self.translations());
        builder
            .add("Email", ErrorEntry::message("Texts.Required"))
            .add("Email", ErrorEntry::message("Texts.NotWhitespace"))
            .add("Email", ErrorEntry::message("Texts.Email"))
            .add("Email", max_length(EMAIL_MAX_LENGTH));
        builder.build()
    }
}

/// Rules for the body passwords
pub struct BodyValidator {
    translations: Arc<Translations>,
}

impl BodyValidator {
    pub fn new(translations: Arc<Translations>) -> Self {
        Self { translations }
    }

    fn check_password(builder: &mut ValidationResultBuilder, path: &str, value: Option<&str>) {
        match value {
            None => {
                builder.add(path, ErrorEntry::message("Texts.Required"));
            }
            Some("") => {
                builder.add(path, ErrorEntry::message("Texts.NotEmpty"));
            }
            Some(value) => {
                check_length(builder, path, value, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)
            }
        }
    }

    fn passwords_must_not_equal() -> ErrorEntry {
        ErrorEntry::message("Text.PasswordsMustNotEqual").with_code(PASSWORDS_MUST_NOT_EQUAL)
    }
}

impl TypedValidator<ChangeAccountPasswordByEmailBody> for BodyValidator {
    fn validate(
        &self,
        model: &ChangeAccountPasswordByEmailBody,
        fail_fast: bool,
    ) -> ValidationResult {
        let mut builder = ValidationResult::builder(self.translations());

        Self::check_password(
            &mut builder,
            "CurrentPassword",
            model.current_password.as_deref(),
        );
        if fail_fast && builder.has_errors() {
            return builder.build();
        }
        Self::check_password(&mut builder, "NewPassword", model.new_password.as_deref());
        if fail_fast && builder.has_errors() {
            return builder.build();
        }

        if let (Some(current), Some(new)) = (&model.current_password, &model.new_password) {
            if current == new {
                builder.add("", Self::passwords_must_not_equal());
            }
        }
        builder.build()
    }

    fn translations(&self) -> Arc<Translations> {
        self.translations.clone()
    }

    fn template(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder(self.translations());
        for path in ["CurrentPassword", "NewPassword"] {
            builder
                .add(path, ErrorEntry::message("Texts.Required"))
                .add(path, ErrorEntry::message("Texts.NotEmpty"))
                .add(path, min_length(PASSWORD_MIN_LENGTH))
                .add(path, max_length(PASSWORD_MAX_LENGTH));
        }
        builder.add("", Self::passwords_must_not_equal());
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn route(email: Option<&str>) -> ChangeAccountPasswordByEmailRoute {
        ChangeAccountPasswordByEmailRoute {
            email: email.map(str::to_string),
        }
    }

    fn body(current: Option<&str>, new: Option<&str>) -> ChangeAccountPasswordByEmailBody {
        ChangeAccountPasswordByEmailBody {
            current_password: current.map(str::to_string),
            new_password: new.map(str::to_string),
        }
    }

    fn route_messages(email: Option<&str>) -> Vec<String> {
        let result = RouteValidator::new(Arc::new(translations())).validate(&route(email), false);
        result
            .translated_message_map("English")
            .and_then(|mut map| map.remove("Email"))
            .unwrap_or_default()
    }

    #[test]
    fn test_body_deserializes_camel_case() {
        let json = r#"{"currentPassword":"old-password","newPassword":null}"#;
        let parsed: ChangeAccountPasswordByEmailBody = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, body(Some("old-password"), None));
    }

    #[test]
    fn test_email_rules() {
        assert!(route_messages(Some("john@example.com")).is_empty());
        assert_eq!(route_messages(None), vec!["Required".to_string()]);
        assert_eq!(
            route_messages(Some("   ")),
            vec!["Must not consist only of whitespace characters".to_string()]
        );
        assert_eq!(
            route_messages(Some("john.example.com")),
            vec!["Must be a valid email address".to_string()]
        );

        let long = format!("{}@example.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert_eq!(
            route_messages(Some(&long)),
            vec!["Must be at most 254 characters in length".to_string()]
        );
    }

    #[test]
    fn test_passwords_must_differ() {
        let validator = BodyValidator::new(Arc::new(translations()));
        let result = validator.validate(&body(Some("same-password"), Some("same-password")), false);

        assert_eq!(result.codes(), vec![PASSWORDS_MUST_NOT_EQUAL]);
        let messages = result.translated_message_map("Polish").unwrap();
        assert_eq!(
            messages[""],
            vec!["Obecne i nowe hasło nie mogą być takie same.".to_string()]
        );
    }

    #[test]
    fn test_password_lengths_and_fail_fast() {
        let validator = BodyValidator::new(Arc::new(translations()));
        let short_and_long = body(Some("short"), Some(&"x".repeat(65)));

        let result = validator.validate(&short_and_long, false);
        let messages = result.translated_message_map("English").unwrap();
        assert_eq!(
            messages["CurrentPassword"],
            vec!["Must be at least 8 characters in length".to_string()]
        );
        assert_eq!(
            messages["NewPassword"],
            vec!["Must be at most 64 characters in length".to_string()]
        );

        let result = validator.validate(&short_and_long, true);
        assert_eq!(result.paths().collect::<Vec<_>>(), vec!["CurrentPassword"]);
    }

    #[test]
    fn test_email_pattern() {
        let regex = email_regex();
        assert!(regex.is_match("jane.doe@mail.example.org"));
        assert!(!regex.is_match("jane doe@example.org"));
        assert!(!regex.is_match("jane@localhost"));
    }

    #[test]
    fn test_missing_and_empty_passwords() {
        let validator = BodyValidator::new(Arc::new(translations()));
        let result = validator.validate(&body(None, Some("")), false);

        let messages = result.translated_message_map("English").unwrap();
        assert_eq!(messages["CurrentPassword"], vec!["Required".to_string()]);
        assert_eq!(messages["NewPassword"], vec!["Must not be empty".to_string()]);
    }

    #[test]
    fn test_templates_list_every_rule() {
        let translations = Arc::new(translations());

        let route = RouteValidator::new(translations.clone()).template();
        let english = route.translated_message_map("English").unwrap();
        assert_eq!(
            english["Email"],
            vec![
                "Required".to_string(),
                "Must not consist only of whitespace characters".to_string(),
                "Must be a valid email address".to_string(),
                "Must be at most 254 characters in length".to_string(),
            ]
        );

        let body = BodyValidator::new(translations).template();
        assert_eq!(
            body.paths().collect::<Vec<_>>(),
            vec!["", "CurrentPassword", "NewPassword"]
        );
        assert_eq!(body.error_registry()["NewPassword"].len(), 4);
        assert_eq!(body.codes(), vec![PASSWORDS_MUST_NOT_EQUAL]);
        assert_eq!(body.translation_names(), vec!["English", "Polish"]);

        let polish = body.translated_message_map("Polish").unwrap();
        assert_eq!(
            polish["CurrentPassword"][2],
            "Musi być długości minimalnie 8 znaków".to_string()
        );
    }
}
