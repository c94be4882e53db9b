//! Shared fixtures for pipeline integration tests
#![allow(dead_code)]

use specgate_engine::{
    ErrorEntry, ErrorMessage, Translations, TypedValidator, ValidationResult,
    ValidationResultBuilder,
};
use specgate_pipeline::{
    HeaderLanguageProvider, Model, ModelState, Property, RequestContext, SpecValidation,
    SpecValidationOptions,
};
use std::sync::Arc;

pub const LANGUAGE_HEADER: &str = "X-Validation-Language";

pub fn translations() -> Arc<Translations> {
    Arc::new(
        Translations::new()
            .with_language(
                "English",
                [
                    ("Texts.Required", "Required"),
                    ("Texts.NotEmpty", "Must not be empty"),
                    ("Texts.MinLength", "Must be at least {min} characters in length"),
                    ("Texts.MaxLength", "Must be at most {max} characters in length"),
                    ("Texts.Email", "Must be a valid email address"),
                    (
                        "Text.PasswordsMustNotEqual",
                        "Current and new password must not be the same.",
                    ),
                ],
            )
            .with_language(
                "Polish",
                [
                    ("Texts.Required", "Wymagane"),
                    ("Texts.NotEmpty", "Nie może być pusty"),
                    ("Texts.MinLength", "Musi być długości minimalnie {min} znaków"),
                    ("Texts.MaxLength", "Musi być długości maksymalnie {max} znaków"),
                    ("Texts.Email", "Musi być poprawnym adresem email"),
                    ("Text.PasswordsMustNotEqual", "Obecne i nowe hasło nie mogą być takie same."),
                ],
            ),
    )
}

/// Required, not empty, 8 to 64 characters
fn check_password(builder: &mut ValidationResultBuilder, path: &str, value: Option<&str>) {
    match value {
        None => {
            builder.add(path, ErrorEntry::message("Texts.Required"));
        }
        Some("") => {
            builder.add(path, ErrorEntry::message("Texts.NotEmpty"));
        }
        Some(v) if v.chars().count() < 8 => {
            let message = ErrorMessage::new("Texts.MinLength").arg("min", 8);
            builder.add(path, ErrorEntry::message(message));
        }
        Some(v) if v.chars().count() > 64 => {
            let message = ErrorMessage::new("Texts.MaxLength").arg("max", 64);
            builder.add(path, ErrorEntry::message(message));
        }
        Some(_) => {}
    }
}

fn check_not_empty(builder: &mut ValidationResultBuilder, path: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        builder.add(path, ErrorEntry::message("Texts.NotEmpty"));
    }
}

// ---------------------------------------------------------------------------
// Change password contract
// ---------------------------------------------------------------------------

pub struct ChangePasswordRoute {
    pub email: Option<String>,
}

pub struct ChangePasswordBody {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl Model for ChangePasswordRoute {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![Property::optional("Email", self.email.as_ref()).required()]
    }
}

impl Model for ChangePasswordBody {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::optional("CurrentPassword", self.current_password.as_ref()).required(),
            Property::optional("NewPassword", self.new_password.as_ref()).required(),
        ]
    }
}

pub struct RouteValidator;

impl TypedValidator<ChangePasswordRoute> for RouteValidator {
    fn validate(&self, model: &ChangePasswordRoute, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        if let Some(email) = model.email.as_deref() {
            if !email.contains('@') {
                builder.add("Email", ErrorEntry::message("Texts.Email"));
            }
        }
        builder.build()
    }
}

pub struct BodyValidator;

impl TypedValidator<ChangePasswordBody> for BodyValidator {
    fn validate(&self, model: &ChangePasswordBody, fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        check_password(&mut builder, "CurrentPassword", model.current_password.as_deref());
        if fail_fast && builder.has_errors() {
            return builder.build();
        }
        check_password(&mut builder, "NewPassword", model.new_password.as_deref());

        if let (Some(current), Some(new)) = (&model.current_password, &model.new_password) {
            if current == new {
                let entry = ErrorEntry::message("Text.PasswordsMustNotEqual")
                    .with_code("PasswordsMustNotEqual");
                builder.add("", entry);
            }
        }
        builder.build()
    }
}

// ---------------------------------------------------------------------------
// Nested graph: Order -> Customer -> Address
// ---------------------------------------------------------------------------

pub struct Address {
    pub city: Option<String>,
}

pub struct Customer {
    pub name: Option<String>,
    pub address: Option<Address>,
}

pub struct Order {
    pub reference: Option<String>,
    pub customer: Option<Customer>,
}

/// Re-checks its recipient's name on top of the recipient's own rules
pub struct Shipment {
    pub recipient: Option<Customer>,
}

impl Model for Address {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![Property::optional("City", self.city.as_ref())]
    }
}

impl Model for Customer {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::optional("Name", self.name.as_ref()),
            Property::optional("Address", self.address.as_ref()),
        ]
    }
}

impl Model for Order {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::optional("Reference", self.reference.as_ref()),
            Property::optional("Customer", self.customer.as_ref()),
        ]
    }
}

impl Model for Shipment {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![Property::optional("Recipient", self.recipient.as_ref())]
    }
}

pub struct AddressValidator;
pub struct CustomerValidator;
pub struct OrderValidator;
pub struct ShipmentValidator;

impl TypedValidator<Address> for AddressValidator {
    fn validate(&self, model: &Address, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        check_not_empty(&mut builder, "City", model.city.as_deref());
        builder.build()
    }
}

impl TypedValidator<Customer> for CustomerValidator {
    fn validate(&self, model: &Customer, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        check_not_empty(&mut builder, "Name", model.name.as_deref());
        builder.build()
    }
}

impl TypedValidator<Order> for OrderValidator {
    fn validate(&self, model: &Order, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        check_not_empty(&mut builder, "Reference", model.reference.as_deref());
        builder.build()
    }
}

impl TypedValidator<Shipment> for ShipmentValidator {
    fn validate(&self, model: &Shipment, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        if let Some(recipient) = &model.recipient {
            check_not_empty(&mut builder, "Recipient.Name", recipient.name.as_deref());
        }
        builder.build()
    }
}

// ---------------------------------------------------------------------------
// Required properties with and without engine rules
// ---------------------------------------------------------------------------

pub struct Profile {
    pub nickname: Option<String>,
    pub password: Option<String>,
}

impl Model for Profile {
    fn properties(&self) -> Vec<Property<'_>> {
        vec![
            Property::optional("Nickname", self.nickname.as_ref()).required(),
            Property::optional("Password", self.password.as_ref()).required(),
        ]
    }
}

/// Has rules for `Password` only
pub struct ProfileValidator;

impl TypedValidator<Profile> for ProfileValidator {
    fn validate(&self, model: &Profile, _fail_fast: bool) -> ValidationResult {
        let mut builder = ValidationResult::builder(translations());
        check_password(&mut builder, "Password", model.password.as_deref());
        builder.build()
    }
}

// ---------------------------------------------------------------------------
// Pipeline helpers
// ---------------------------------------------------------------------------

pub fn validation(options: SpecValidationOptions) -> SpecValidation {
    SpecValidation::builder()
        .with_options(options)
        .with_language_provider(Arc::new(HeaderLanguageProvider::new(LANGUAGE_HEADER)))
        .add_validator::<ChangePasswordRoute, _>(RouteValidator)
        .add_validator::<ChangePasswordBody, _>(BodyValidator)
        .add_validator::<Address, _>(AddressValidator)
        .add_validator::<Customer, _>(CustomerValidator)
        .add_validator::<Order, _>(OrderValidator)
        .add_validator::<Shipment, _>(ShipmentValidator)
        .add_validator::<Profile, _>(ProfileValidator)
        .build()
        .expect("pipeline should build")
}

pub fn implicit_disabled() -> SpecValidationOptions {
    SpecValidationOptions {
        implicit_validation_enabled: false,
        ..Default::default()
    }
}

pub fn request(language: Option<&str>) -> RequestContext {
    match language {
        Some(language) => RequestContext::new().with_header(LANGUAGE_HEADER, language),
        None => RequestContext::new(),
    }
}

/// Bind then validate one parameter, the way the host does per request
pub fn bind_and_validate<T: Model>(
    validation: &SpecValidation,
    request: &RequestContext,
    state: &mut ModelState,
    name: &str,
    model: &T,
) -> bool {
    validation
        .bind_parameter(state, name, "", model)
        .expect("binding should succeed");
    validation
        .validate_parameter(request, state, name, "", Some(model))
        .expect("validation should succeed")
}
