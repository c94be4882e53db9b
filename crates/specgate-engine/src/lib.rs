//! Specgate Engine - validation engine facade
//!
//! This crate is the outbound side of the Specgate request-validation
//! pipeline. It defines what the pipeline needs from a rule-based
//! validation engine:
//!
//! - **Results**: per-path error entries with codes and messages, rendered
//!   untranslated or through per-language translation tables
//! - **Validators**: typed validators and their object-safe, `TypeId`-keyed form
//! - **Templates**: every error a validator can produce, listed without a model
//! - **Registration**: one validator per model type, first registration wins
//! - **Lookup**: a process-wide cache from model type to validator
//!
//! ## Quick Start
//!
//! ```rust
//! use specgate_engine::{
//!     ErrorEntry, Translations, TypedValidator, ValidationResult, ValidatorCollection,
//!     ValidatorProvider,
//! };
//! use std::sync::Arc;
//!
//! struct Route {
//!     email: String,
//! }
//!
//! struct RouteValidator {
//!     translations: Arc<Translations>,
//! }
//!
//! impl TypedValidator<Route> for RouteValidator {
//!     fn validate(&self, model: &Route, _fail_fast: bool) -> ValidationResult {
//!         let mut builder = ValidationResult::builder(self.translations.clone());
//!         if !model.email.contains('@') {
//!             builder.add("Email", ErrorEntry::message("Texts.Email"));
//!         }
//!         builder.build()
//!     }
//! }
//!
//! let translations = Arc::new(
//!     Translations::new()
//!         .with_language("English", [("Texts.Email", "Must be a valid email address")]),
//! );
//! let mut collection = ValidatorCollection::new();
//! collection.add::<Route, _>(RouteValidator { translations });
//!
//! let provider = ValidatorProvider::new(Arc::new(collection));
//! let validator = provider.get_for::<Route>().unwrap();
//! let result = validator.validate(&Route { email: "nope".into() }, false).unwrap();
//!
//! let english = result.translated_message_map("English").unwrap();
//! assert_eq!(english["Email"], vec!["Must be a valid email address".to_string()]);
//! ```
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod message;
pub mod provider;
pub mod registry;
pub mod result;
pub mod validator;

// Re-export commonly used types for convenience
pub use error::{EngineError, Result};
pub use message::{ErrorEntry, ErrorMessage, Translations};
pub use provider::ValidatorProvider;
pub use registry::{ValidatorCollection, ValidatorSource};
pub use result::{MessageMap, ValidationResult, ValidationResultBuilder};
pub use validator::{erase, ErasedValidator, SpecValidator, TypedValidator};
