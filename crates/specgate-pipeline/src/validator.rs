//! Per-node model validators
//!
//! The traversal asks every registered [`ModelValidatorProvider`] for the
//! validators of a node, then runs them against the node's value. The
//! engine-backed [`SpecModelValidator`] is the one this crate contributes.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::language::LanguageProvider;
use crate::metadata::{Model, ModelMetadata};
use crate::options::SpecValidationOptions;
use crate::request::RequestContext;
use crate::scope::{self, PassScope, ScopeOptions};
use crate::translate::MessageTranslator;
use specgate_engine::{SpecValidator, ValidatorProvider};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything a validator sees about the node being validated
#[derive(Clone, Copy)]
pub struct ModelValidationContext<'a> {
    request: &'a RequestContext,
    metadata: &'a Arc<ModelMetadata>,
    model: Option<&'a dyn Model>,
    scope: &'a PassScope,
}

impl<'a> ModelValidationContext<'a> {
    pub fn new(
        request: &'a RequestContext,
        metadata: &'a Arc<ModelMetadata>,
        model: Option<&'a dyn Model>,
        scope: &'a PassScope,
    ) -> Self {
        Self {
            request,
            metadata,
            model,
            scope,
        }
    }

    pub fn request(&self) -> &'a RequestContext {
        self.request
    }

    pub fn metadata(&self) -> &'a Arc<ModelMetadata> {
        self.metadata
    }

    /// Bound value of the node, `None` when nothing was bound
    pub fn model(&self) -> Option<&'a dyn Model> {
        self.model
    }

    /// Root of the current pass
    pub fn root(&self) -> Option<&'a Arc<ModelMetadata>> {
        self.scope.root()
    }
}

impl fmt::Debug for ModelValidationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelValidationContext")
            .field("metadata", self.metadata)
            .field("has_model", &self.model.is_some())
            .finish()
    }
}

/// One error reported by a validator, relative to the node's path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelValidationResult {
    /// Member path below the node; empty for the node itself
    pub member: String,
    pub message: String,
}

impl ModelValidationResult {
    pub fn new(member: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            message: message.into(),
        }
    }
}

/// Validates one node of the bound graph
pub trait ModelValidator: Send + Sync {
    fn validate(&self, context: &ModelValidationContext<'_>) -> Result<Vec<ModelValidationResult>>;
}

/// Supplies the validators for a metadata node
pub trait ModelValidatorProvider: Send + Sync {
    fn create_validators(&self, metadata: &Arc<ModelMetadata>) -> Vec<Arc<dyn ModelValidator>>;

    fn as_any(&self) -> &dyn Any;
}

/// Runs the engine validator registered for a node's model type
pub struct SpecModelValidator {
    validator: Option<Arc<dyn SpecValidator>>,
    scope_options: ScopeOptions,
    fail_fast: bool,
    translator: MessageTranslator,
    language_provider: Option<Arc<dyn LanguageProvider>>,
}

impl SpecModelValidator {
    pub fn new(
        validator: Option<Arc<dyn SpecValidator>>,
        options: &SpecValidationOptions,
        language_provider: Option<Arc<dyn LanguageProvider>>,
    ) -> Self {
        Self {
            validator,
            scope_options: ScopeOptions::from(options),
            fail_fast: options.fail_fast,
            translator: MessageTranslator::from_options(options),
            language_provider,
        }
    }
}

impl ModelValidator for SpecModelValidator {
    fn validate(&self, context: &ModelValidationContext<'_>) -> Result<Vec<ModelValidationResult>> {
        let Some(validator) = &self.validator else {
            return Ok(Vec::new());
        };
        let Some(model) = context.model() else {
            return Ok(Vec::new());
        };

        let metadata = context.metadata();
        if scope::should_skip(self.scope_options, context.root(), metadata) {
            debug!(
                kind = ?metadata.kind(),
                model_type = metadata.model_type().name(),
                "Skipping node outside validation scope"
            );
            return Ok(Vec::new());
        }

        let result = validator.validate(model.as_any(), self.fail_fast)?;
        if !result.has_errors() {
            return Ok(Vec::new());
        }

        let language = self
            .translator
            .resolve_language(self.language_provider.as_deref(), context.request());
        trace!(
            language = ?language,
            model_type = validator.model_type_name(),
            "Rendering validation errors"
        );

        Ok(self
            .translator
            .render(&result, language.as_deref())
            .into_iter()
            .flat_map(|(member, messages)| {
                messages
                    .into_iter()
                    .map(move |message| ModelValidationResult::new(member.clone(), message))
            })
            .collect())
    }
}

impl fmt::Debug for SpecModelValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecModelValidator")
            .field("validator", &self.validator.as_ref().map(|v| v.model_type_name()))
            .field("scope_options", &self.scope_options)
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

/// Provides a [`SpecModelValidator`] for every node
pub struct SpecModelValidatorProvider {
    validators: Arc<ValidatorProvider>,
    options: SpecValidationOptions,
    language_provider: Option<Arc<dyn LanguageProvider>>,
}

impl SpecModelValidatorProvider {
    pub fn new(
        validators: Arc<ValidatorProvider>,
        options: SpecValidationOptions,
        language_provider: Option<Arc<dyn LanguageProvider>>,
    ) -> Self {
        Self {
            validators,
            options,
            language_provider,
        }
    }

    pub fn options(&self) -> &SpecValidationOptions {
        &self.options
    }

    pub fn validators(&self) -> &Arc<ValidatorProvider> {
        &self.validators
    }
}

impl ModelValidatorProvider for SpecModelValidatorProvider {
    fn create_validators(&self, metadata: &Arc<ModelMetadata>) -> Vec<Arc<dyn ModelValidator>> {
        let validator: Arc<dyn ModelValidator> = Arc::new(SpecModelValidator::new(
            self.validators.get(metadata.model_type().id()),
            &self.options,
            self.language_provider.clone(),
        ));
        vec![validator]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for SpecModelValidatorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecModelValidatorProvider")
            .field("validators", &self.validators)
            .field("options", &self.options)
            .field("language_provider", &self.language_provider.is_some())
            .finish()
    }
}
