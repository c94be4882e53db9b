//! Startup registration of validators
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::validator::{erase, SpecValidator, TypedValidator};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a [`crate::ValidatorProvider`] resolves validators from
pub trait ValidatorSource: Send + Sync {
    /// Resolve the validator for a model type, if one is registered
    fn resolve(&self, model_type: TypeId) -> Option<Arc<dyn SpecValidator>>;

    /// Every registered validator, in registration order
    fn all(&self) -> Vec<Arc<dyn SpecValidator>>;
}

/// Validators registered at startup, one per model type
#[derive(Default)]
pub struct ValidatorCollection {
    by_type: HashMap<TypeId, Arc<dyn SpecValidator>>,
    order: Vec<TypeId>,
}

impl ValidatorCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed validator for `T`
    pub fn add<T, V>(&mut self, validator: V) -> &mut Self
    where
        T: Any,
        V: TypedValidator<T> + 'static,
    {
        self.add_erased(erase::<T, V>(validator))
    }

    /// Register an already erased validator
    ///
    /// The first registration for a model type wins; later ones are ignored.
    pub fn add_erased(&mut self, validator: Arc<dyn SpecValidator>) -> &mut Self {
        let model_type = validator.model_type_id();
        if self.by_type.contains_key(&model_type) {
            warn!(
                model_type = validator.model_type_name(),
                "Validator already registered for model type, keeping the first one"
            );
            return self;
        }

        debug!(model_type = validator.model_type_name(), "Registered validator");
        self.by_type.insert(model_type, validator);
        self.order.push(model_type);
        self
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a validator is registered for `model_type`
    pub fn contains(&self, model_type: TypeId) -> bool {
        self.by_type.contains_key(&model_type)
    }
}

impl ValidatorSource for ValidatorCollection {
    fn resolve(&self, model_type: TypeId) -> Option<Arc<dyn SpecValidator>> {
        self.by_type.get(&model_type).cloned()
    }

    fn all(&self) -> Vec<Arc<dyn SpecValidator>> {
        self.order
            .iter()
            .filter_map(|model_type| self.by_type.get(model_type).cloned())
            .collect()
    }
}

impl fmt::Debug for ValidatorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.all().iter().map(|v| v.model_type_name()).collect();
        f.debug_struct("ValidatorCollection").field("validators", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ErrorEntry, Translations};
    use crate::result::ValidationResult;

    struct Email(String);

    struct EmailValidator {
        code: &'static str,
    }

    impl TypedValidator<Email> for EmailValidator {
        fn validate(&self, model: &Email, _fail_fast: bool) -> ValidationResult {
            let mut builder = ValidationResult::builder(Arc::new(Translations::new()));
            if !model.0.contains('@') {
                builder.add("", ErrorEntry::code(self.code));
            }
            builder.build()
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let mut collection = ValidatorCollection::new();
        collection
            .add::<Email, _>(EmailValidator { code: "first" })
            .add::<Email, _>(EmailValidator { code: "second" });

        assert_eq!(collection.len(), 1);
        let validator = collection.resolve(TypeId::of::<Email>()).unwrap();
        let result = validator.validate(&Email("nope".to_string()), false).unwrap();
        assert_eq!(result.codes(), vec!["first"]);
    }

    #[test]
    fn test_resolve_miss() {
        let collection = ValidatorCollection::new();
        assert!(collection.is_empty());
        assert!(collection.resolve(TypeId::of::<Email>()).is_none());
        assert!(collection.all().is_empty());
    }
}
