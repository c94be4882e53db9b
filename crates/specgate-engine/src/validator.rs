//! Typed validators and their type-erased form
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::{EngineError, Result};
use crate::message::{ErrorEntry, Translations};
use crate::result::ValidationResult;
use std::any::{type_name, Any, TypeId};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

/// A validator for models of type `T`
///
/// Implementations are expected to be stateless; one instance serves every
/// request concurrently.
pub trait TypedValidator<T>: Send + Sync {
    /// Validate the model against its rules
    ///
    /// With `fail_fast` the validator may stop after the first error.
    fn validate(&self, model: &T, fail_fast: bool) -> ValidationResult;

    /// Quick validity check without error details
    fn is_valid(&self, model: &T) -> bool {
        !self.validate(model, true).has_errors()
    }

    /// Translation tables the validator renders its messages with
    fn translations(&self) -> Arc<Translations> {
        Arc::default()
    }

    /// Every error the rules are able to produce, keyed by path
    ///
    /// Built without a model. Entries carry the message keys and codes a
    /// failing model would receive, so the template documents the rules.
    fn template(&self) -> ValidationResult {
        ValidationResult::valid(self.translations())
    }
}

/// Object-safe validator keyed by the model's `TypeId`
pub trait SpecValidator: Send + Sync {
    /// Identifier of the model type this validator accepts
    fn model_type_id(&self) -> TypeId;

    /// Readable name of the model type
    fn model_type_name(&self) -> &'static str;

    /// Validate a model; fails only when the model has the wrong type
    fn validate(&self, model: &dyn Any, fail_fast: bool) -> Result<ValidationResult>;

    /// Quick validity check; fails only when the model has the wrong type
    fn is_valid(&self, model: &dyn Any) -> Result<bool>;

    /// Every error the rules are able to produce, built once per validator
    fn template(&self) -> &ValidationResult;

    /// Path → every error entry the rules are able to produce
    fn error_registry(&self) -> &BTreeMap<String, Vec<ErrorEntry>> {
        self.template().error_registry()
    }

    /// Languages the validator's messages can be rendered in
    fn translation_names(&self) -> Vec<&str> {
        self.template().translation_names()
    }
}

/// Adapter from [`TypedValidator<T>`] to [`SpecValidator`]
pub struct ErasedValidator<T, V> {
    inner: V,
    template: OnceLock<ValidationResult>,
    _model: PhantomData<fn(&T)>,
}

impl<T, V> ErasedValidator<T, V>
where
    T: Any,
    V: TypedValidator<T>,
{
    /// Wrap a typed validator
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            template: OnceLock::new(),
            _model: PhantomData,
        }
    }

    /// Access the wrapped validator
    pub fn inner(&self) -> &V {
        &self.inner
    }

    fn downcast<'m>(&self, model: &'m dyn Any) -> Result<&'m T> {
        model
            .downcast_ref::<T>()
            .ok_or(EngineError::ModelTypeMismatch {
                expected: type_name::<T>(),
            })
    }
}

impl<T, V> SpecValidator for ErasedValidator<T, V>
where
    T: Any,
    V: TypedValidator<T>,
{
    fn model_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn model_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn validate(&self, model: &dyn Any, fail_fast: bool) -> Result<ValidationResult> {
        let model = self.downcast(model)?;
        Ok(self.inner.validate(model, fail_fast))
    }

    fn is_valid(&self, model: &dyn Any) -> Result<bool> {
        let model = self.downcast(model)?;
        Ok(self.inner.is_valid(model))
    }

    fn template(&self) -> &ValidationResult {
        self.template.get_or_init(|| self.inner.template())
    }
}

/// Erase a typed validator into a shareable [`SpecValidator`]
pub fn erase<T, V>(validator: V) -> Arc<dyn SpecValidator>
where
    T: Any,
    V: TypedValidator<T> + 'static,
{
    Arc::new(ErasedValidator::<T, V>::new(validator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Name(String);

    struct NameValidator {
        translations: Arc<Translations>,
        templates_built: AtomicUsize,
    }

    impl TypedValidator<Name> for NameValidator {
        fn validate(&self, model: &Name, _fail_fast: bool) -> ValidationResult {
            let mut builder = ValidationResult::builder(self.translations.clone());
            if model.0.is_empty() {
                builder.add("", ErrorEntry::message("Texts.NotEmpty"));
            }
            builder.build()
        }

        fn translations(&self) -> Arc<Translations> {
            self.translations.clone()
        }

        fn template(&self) -> ValidationResult {
            self.templates_built.fetch_add(1, Ordering::SeqCst);
            let mut builder = ValidationResult::builder(self.translations());
            builder.add("", ErrorEntry::message("Texts.NotEmpty").with_code("NAME_EMPTY"));
            builder.build()
        }
    }

    struct Unit;

    struct UnitValidator;

    impl TypedValidator<Unit> for UnitValidator {
        fn validate(&self, _model: &Unit, _fail_fast: bool) -> ValidationResult {
            ValidationResult::default()
        }
    }

    fn name_validator() -> NameValidator {
        NameValidator {
            translations: Arc::new(
                Translations::new()
                    .with_language("English", [("Texts.NotEmpty", "Must not be empty")])
                    .with_language("Polish", [("Texts.NotEmpty", "Nie może być pusty")]),
            ),
            templates_built: AtomicUsize::new(0),
        }
    }

    fn validator() -> Arc<dyn SpecValidator> {
        erase::<Name, _>(name_validator())
    }

    #[test]
    fn test_erased_validator_validates_matching_model() {
        let validator = validator();
        assert_eq!(validator.model_type_id(), TypeId::of::<Name>());
        assert!(validator.model_type_name().ends_with("Name"));

        let result = validator.validate(&Name(String::new()), false).unwrap();
        assert!(result.has_errors());
        assert!(validator.is_valid(&Name("ok".to_string())).unwrap());
    }

    #[test]
    fn test_erased_validator_rejects_other_models() {
        let validator = validator();
        let err = validator.validate(&42_u32, false).unwrap_err();
        assert!(matches!(err, EngineError::ModelTypeMismatch { .. }));
        assert!(validator.is_valid(&"text").is_err());

        let message = err.to_string();
        assert!(message.contains("Name"));
        assert!(!message.contains("TypeId"));
    }

    #[test]
    fn test_template_is_built_once() {
        let erased = ErasedValidator::<Name, _>::new(name_validator());

        let registry = erased.error_registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry[""][0].codes, vec!["NAME_EMPTY".to_string()]);
        assert_eq!(erased.translation_names(), vec!["English", "Polish"]);

        let polish = erased.template().translated_message_map("Polish").unwrap();
        assert_eq!(polish[""], vec!["Nie może być pusty".to_string()]);
        assert_eq!(erased.inner().templates_built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_template_is_empty() {
        let validator = erase::<Unit, _>(UnitValidator);
        assert!(!validator.template().has_errors());
        assert!(validator.error_registry().is_empty());
        assert!(validator.translation_names().is_empty());
    }
}
