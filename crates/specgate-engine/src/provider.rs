//! Cached validator lookup by model type
//!
//! Validators are stateless singletons, so a resolved validator (or the fact
//! that none exists) is cached for the lifetime of the provider and never
//! invalidated.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::{EngineError, Result};
use crate::registry::ValidatorSource;
use crate::validator::SpecValidator;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::trace;

type CachedValidator = Option<Arc<dyn SpecValidator>>;

/// Resolves and caches validators by model type
pub struct ValidatorProvider {
    source: Arc<dyn ValidatorSource>,
    cache: RwLock<HashMap<TypeId, CachedValidator>>,
    all: OnceLock<Vec<Arc<dyn SpecValidator>>>,
}

impl ValidatorProvider {
    /// Create a provider over a validator source
    pub fn new(source: Arc<dyn ValidatorSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            all: OnceLock::new(),
        }
    }

    /// Validator for the model type, `None` when nothing is registered
    pub fn get(&self, model_type: TypeId) -> Option<Arc<dyn SpecValidator>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&model_type)
        {
            return cached.clone();
        }

        // Resolved outside the lock; when two callers race, the first insert wins
        // and both results are interchangeable anyway.
        let resolved = self.source.resolve(model_type);
        if resolved.is_none() {
            trace!(?model_type, "No validator registered for model type");
        }

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(model_type)
            .or_insert(resolved)
            .clone()
    }

    /// Validator for `T`, `None` when nothing is registered
    pub fn get_for<T: Any>(&self) -> Option<Arc<dyn SpecValidator>> {
        self.get(TypeId::of::<T>())
    }

    /// Validator for the model type, or an error naming the type
    pub fn get_required(
        &self,
        model_type: TypeId,
        type_name: &str,
    ) -> Result<Arc<dyn SpecValidator>> {
        self.get(model_type)
            .ok_or_else(|| EngineError::NoValidatorRegistered {
                type_name: type_name.to_string(),
            })
    }

    /// Validator for `T`, or an error naming the type
    pub fn get_required_for<T: Any>(&self) -> Result<Arc<dyn SpecValidator>> {
        self.get_required(TypeId::of::<T>(), type_name::<T>())
    }

    /// Every registered validator
    ///
    /// The source is enumerated once; the result also back-fills the per-type
    /// cache when the sizes differ.
    pub fn get_all(&self) -> &[Arc<dyn SpecValidator>] {
        self.all.get_or_init(|| {
            let validators = self.source.all();
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);

            if validators.len() != cache.len() {
                for validator in &validators {
                    cache
                        .entry(validator.model_type_id())
                        .or_insert_with(|| Some(validator.clone()));
                }
            }

            validators
        })
    }

    /// Number of cached lookups (hits and misses)
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl fmt::Debug for ValidatorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorProvider")
            .field("cached", &self.cached_len())
            .field("enumerated", &self.all.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Translations;
    use crate::registry::ValidatorCollection;
    use crate::result::ValidationResult;
    use crate::validator::TypedValidator;

    struct Route;
    struct Body;

    struct Accepting;

    impl TypedValidator<Route> for Accepting {
        fn validate(&self, _model: &Route, _fail_fast: bool) -> ValidationResult {
            ValidationResult::valid(Arc::new(Translations::new()))
        }
    }

    fn provider() -> ValidatorProvider {
        let mut collection = ValidatorCollection::new();
        collection.add::<Route, _>(Accepting);
        ValidatorProvider::new(Arc::new(collection))
    }

    #[test]
    fn test_get_hit_and_miss_are_cached() {
        let provider = provider();
        assert!(provider.get_for::<Route>().is_some());
        assert!(provider.get_for::<Body>().is_none());
        assert_eq!(provider.cached_len(), 2);

        assert!(provider.get_for::<Route>().is_some());
        assert_eq!(provider.cached_len(), 2);
    }

    #[test]
    fn test_get_required() {
        let provider = provider();
        assert!(provider.get_required_for::<Route>().is_ok());

        match provider.get_required_for::<Body>() {
            Err(EngineError::NoValidatorRegistered { type_name }) => {
                assert!(type_name.ends_with("Body"))
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected no validator for Body"),
        }
    }

    #[test]
    fn test_get_all_backfills_cache() {
        let provider = provider();
        assert_eq!(provider.get_all().len(), 1);
        assert_eq!(provider.cached_len(), 1);
        assert!(provider.get_for::<Route>().is_some());
    }
}
