//! End-to-end change password requests through binding and validation

mod common;

use common::*;
use pretty_assertions::assert_eq;
use specgate_pipeline::{ModelState, SpecValidationOptions};
use std::collections::BTreeMap;

fn short_passwords() -> ChangePasswordBody {
    ChangePasswordBody {
        current_password: Some("short".to_string()),
        new_password: Some("short".to_string()),
    }
}

fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, message) in pairs {
        map.entry(key.to_string()).or_default().push(message.to_string());
    }
    map
}

#[test]
fn test_english_messages() {
    let validation = validation(SpecValidationOptions::default());
    let mut state = ModelState::new();

    let valid =
        bind_and_validate(&validation, &request(None), &mut state, "body", &short_passwords());

    assert!(!valid);
    assert_eq!(
        state.to_error_map(),
        expected(&[
            ("", "Current and new password must not be the same."),
            ("CurrentPassword", "Must be at least 8 characters in length"),
            ("NewPassword", "Must be at least 8 characters in length"),
        ])
    );
}

#[test]
fn test_polish_messages() {
    let validation = validation(SpecValidationOptions::default());
    let mut state = ModelState::new();

    let polish = request(Some("Polish"));
    bind_and_validate(&validation, &polish, &mut state, "body", &short_passwords());

    assert_eq!(
        state.to_error_map(),
        expected(&[
            ("", "Obecne i nowe hasło nie mogą być takie same."),
            ("CurrentPassword", "Musi być długości minimalnie 8 znaków"),
            ("NewPassword", "Musi być długości minimalnie 8 znaków"),
        ])
    );
}

#[test]
fn test_unsupported_language_falls_back_to_default() {
    let validation = validation(SpecValidationOptions::default());
    let mut state = ModelState::new();

    let german = request(Some("German"));
    bind_and_validate(&validation, &german, &mut state, "body", &short_passwords());

    assert_eq!(
        state.to_error_map()[""],
        vec!["Current and new password must not be the same.".to_string()]
    );
}

#[test]
fn test_no_default_language_renders_keys() {
    let validation = validation(SpecValidationOptions {
        default_language: None,
        ..Default::default()
    });
    let mut state = ModelState::new();

    bind_and_validate(&validation, &request(None), &mut state, "body", &short_passwords());

    assert_eq!(
        state.to_error_map(),
        expected(&[
            ("", "Text.PasswordsMustNotEqual"),
            ("CurrentPassword", "Texts.MinLength"),
            ("NewPassword", "Texts.MinLength"),
        ])
    );
}

#[test]
fn test_revalidation_adds_no_duplicates() {
    let validation = validation(SpecValidationOptions::default());
    let request = request(None);
    let body = short_passwords();
    let mut state = ModelState::new();

    bind_and_validate(&validation, &request, &mut state, "body", &body);
    let first = state.to_error_map();

    for _ in 0..3 {
        validation
            .validate_parameter(&request, &mut state, "body", "", Some(&body))
            .unwrap();
    }

    assert_eq!(state.to_error_map(), first);
    assert_eq!(state.error_count(), 3);
}

#[test]
fn test_mismatch_is_reported_with_code() {
    let validation = validation(SpecValidationOptions::default());
    let validator = validation
        .validators()
        .get_for::<ChangePasswordBody>()
        .expect("body validator registered");

    let result = validator.validate(&short_passwords(), false).unwrap();
    assert_eq!(result.codes(), vec!["PasswordsMustNotEqual"]);
    assert_eq!(result.code_map()[""], vec!["PasswordsMustNotEqual".to_string()]);
}

#[test]
fn test_fail_fast_stops_after_first_field() {
    let validation = validation(SpecValidationOptions {
        fail_fast: true,
        ..Default::default()
    });
    let mut state = ModelState::new();

    bind_and_validate(&validation, &request(None), &mut state, "body", &short_passwords());

    assert_eq!(
        state.to_error_map(),
        expected(&[("CurrentPassword", "Must be at least 8 characters in length")])
    );
}

#[test]
fn test_valid_request() {
    let validation = validation(SpecValidationOptions::default());
    let mut state = ModelState::new();
    let body = ChangePasswordBody {
        current_password: Some("old-password-1".to_string()),
        new_password: Some("new-password-2".to_string()),
    };
    let route = ChangePasswordRoute {
        email: Some("ann@example.com".to_string()),
    };

    assert!(bind_and_validate(&validation, &request(None), &mut state, "route", &route));
    assert!(bind_and_validate(&validation, &request(None), &mut state, "body", &body));
    assert!(state.is_valid());
    assert!(state.to_error_map().is_empty());
}

#[test]
fn test_route_email() {
    let validation = validation(SpecValidationOptions::default());

    let mut state = ModelState::new();
    let route = ChangePasswordRoute {
        email: Some("not-an-email".to_string()),
    };
    bind_and_validate(&validation, &request(Some("Polish")), &mut state, "route", &route);
    assert_eq!(
        state.to_error_map(),
        expected(&[("Email", "Musi być poprawnym adresem email")])
    );

    let mut state = ModelState::new();
    let route = ChangePasswordRoute { email: None };
    bind_and_validate(&validation, &request(None), &mut state, "route", &route);
    assert_eq!(
        state.to_error_map(),
        expected(&[("Email", "The Email field is required.")])
    );
}
