//! Request validation orchestration for Specgate
//!
//! This crate sits between a web framework's model binding and the
//! validation engine in `specgate-engine`. It decides which nodes of a bound
//! request graph are validated, keeps the framework's own "required" errors
//! from duplicating engine errors, and renders engine results in the
//! request's language.
//!
//! # Example
//!
//! ```
//! use specgate_engine::{ErrorEntry, Translations, TypedValidator, ValidationResult};
//! use specgate_pipeline::{Model, ModelState, Property, RequestContext, SpecValidation};
//! use std::sync::Arc;
//!
//! struct Signup {
//!     email: Option<String>,
//! }
//!
//! impl Model for Signup {
//!     fn properties(&self) -> Vec<Property<'_>> {
//!         vec![Property::optional("Email", self.email.as_ref()).required()]
//!     }
//! }
//!
//! struct SignupValidator;
//!
//! impl TypedValidator<Signup> for SignupValidator {
//!     fn validate(&self, model: &Signup, _fail_fast: bool) -> ValidationResult {
//!         let mut builder = ValidationResult::builder(Arc::new(Translations::new()));
//!         if model.email.as_deref().is_some_and(|e| !e.contains('@')) {
//!             builder.add("Email", ErrorEntry::message("Must be a valid email address"));
//!         }
//!         builder.build()
//!     }
//! }
//!
//! let validation = SpecValidation::builder()
//!     .add_validator::<Signup, _>(SignupValidator)
//!     .build()
//!     .unwrap();
//!
//! let signup = Signup { email: None };
//! let mut state = ModelState::new();
//! validation.bind_parameter(&mut state, "signup", "", &signup).unwrap();
//! validation
//!     .validate_parameter(&RequestContext::new(), &mut state, "signup", "", Some(&signup))
//!     .unwrap();
//!
//! assert_eq!(state.to_error_map()["Email"], vec!["The Email field is required.".to_string()]);
//! ```
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

pub mod binding;
pub mod bridge;
pub mod error;
pub mod language;
pub mod metadata;
pub mod model_state;
pub mod options;
pub mod pipeline;
pub mod reconcile;
pub mod request;
pub mod scope;
pub mod translate;
pub mod validator;
pub mod visitor;

pub use bridge::{RequiredMessageBridge, REQUIRED_PREFIX};
pub use error::{Error, Result};
pub use language::{FixedLanguageProvider, HeaderLanguageProvider, LanguageProvider};
pub use metadata::{
    BindingMetadataProvider, MetadataKind, MetadataProvider, Model, ModelBase, ModelMetadata,
    ModelType, Property,
};
pub use model_state::{ModelError, ModelState, ModelStateEntry, ValidationState};
pub use options::SpecValidationOptions;
pub use pipeline::{
    configure_spec_validation, MvcOptions, SpecObjectModelValidator, SpecValidation,
    SpecValidationBuilder,
};
pub use reconcile::DeferredImplicitRequiredError;
pub use request::RequestContext;
pub use scope::{PassScope, ScopeOptions};
pub use translate::MessageTranslator;
pub use validator::{
    ModelValidationContext, ModelValidationResult, ModelValidator, ModelValidatorProvider,
    SpecModelValidator, SpecModelValidatorProvider,
};
pub use visitor::ValidationVisitor;
