//! Host integration: registration, configuration and the object validator
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::binding;
use crate::bridge::RequiredMessageBridge;
use crate::error::{Error, Result};
use crate::language::LanguageProvider;
use crate::metadata::{BindingMetadataProvider, MetadataProvider, Model, ModelMetadata, ModelType};
use crate::model_state::ModelState;
use crate::options::SpecValidationOptions;
use crate::request::RequestContext;
use crate::validator::{ModelValidatorProvider, SpecModelValidatorProvider};
use crate::visitor::ValidationVisitor;
use specgate_engine::{SpecValidator, TypedValidator, ValidatorCollection, ValidatorProvider};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// The host framework's extension points
#[derive(Default, Clone)]
pub struct MvcOptions {
    /// Run on every newly created metadata node
    pub metadata_details_providers: Vec<Arc<dyn BindingMetadataProvider>>,
    /// Consulted in order for every visited node
    pub model_validator_providers: Vec<Arc<dyn ModelValidatorProvider>>,
}

impl MvcOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for MvcOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MvcOptions")
            .field("metadata_details_providers", &self.metadata_details_providers.len())
            .field("model_validator_providers", &self.model_validator_providers.len())
            .finish()
    }
}

/// Install the required-message bridge and the spec validator provider
///
/// Running this again on the same options adds nothing.
pub fn configure_spec_validation(
    options: &mut MvcOptions,
    provider: Arc<SpecModelValidatorProvider>,
) {
    let has_bridge = options
        .metadata_details_providers
        .iter()
        .any(|p| p.as_any().is::<RequiredMessageBridge>());
    if !has_bridge {
        options
            .metadata_details_providers
            .push(Arc::new(RequiredMessageBridge));
    }

    let has_provider = options
        .model_validator_providers
        .iter()
        .any(|p| p.as_any().is::<SpecModelValidatorProvider>());
    if !has_provider {
        options.model_validator_providers.insert(0, provider);
    }

    debug!(
        bridge_added = !has_bridge,
        provider_added = !has_provider,
        "Configured spec validation"
    );
}

/// Validates bound objects using only the spec validator provider
pub struct SpecObjectModelValidator {
    metadata_provider: Arc<MetadataProvider>,
    provider: Arc<dyn ModelValidatorProvider>,
}

impl SpecObjectModelValidator {
    /// Pick the spec validator provider out of the registered providers
    pub fn new(
        metadata_provider: Arc<MetadataProvider>,
        validator_providers: &[Arc<dyn ModelValidatorProvider>],
    ) -> Result<Self> {
        let mut matching = validator_providers
            .iter()
            .filter(|p| p.as_any().is::<SpecModelValidatorProvider>());

        let provider = matching.next().cloned().ok_or_else(|| {
            Error::configuration("spec model validator provider is not registered")
        })?;
        if matching.next().is_some() {
            return Err(Error::configuration(
                "spec model validator provider is registered more than once",
            ));
        }

        Ok(Self {
            metadata_provider,
            provider,
        })
    }

    pub fn metadata_provider(&self) -> &Arc<MetadataProvider> {
        &self.metadata_provider
    }

    /// Validate `model` bound at `prefix`, rooted at `metadata` when given
    pub fn validate(
        &self,
        request: &RequestContext,
        model_state: &mut ModelState,
        metadata: Option<Arc<ModelMetadata>>,
        prefix: &str,
        model: Option<&dyn Model>,
    ) -> Result<bool> {
        ValidationVisitor::new(
            request,
            model_state,
            &self.metadata_provider,
            self.provider.as_ref(),
        )
        .validate(metadata, prefix, model)
    }

    /// Validate an action parameter named `name`
    pub fn validate_parameter<T: Model>(
        &self,
        request: &RequestContext,
        model_state: &mut ModelState,
        name: &str,
        prefix: &str,
        model: Option<&T>,
    ) -> Result<bool> {
        let metadata = self.metadata_provider.for_parameter(name, ModelType::of::<T>())?;
        self.validate(
            request,
            model_state,
            Some(metadata),
            prefix,
            model.map(|m| m as &dyn Model),
        )
    }
}

impl fmt::Debug for SpecObjectModelValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecObjectModelValidator")
            .field("metadata_provider", &self.metadata_provider)
            .finish()
    }
}

/// Collects validators and settings, then wires everything together
#[derive(Default)]
pub struct SpecValidationBuilder {
    validators: ValidatorCollection,
    options: SpecValidationOptions,
    language_provider: Option<Arc<dyn LanguageProvider>>,
    mvc: MvcOptions,
}

impl SpecValidationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validator for `T`; the first registration per type wins
    pub fn add_validator<T, V>(mut self, validator: V) -> Self
    where
        T: Any,
        V: TypedValidator<T> + 'static,
    {
        self.validators.add::<T, V>(validator);
        self
    }

    pub fn add_erased_validator(mut self, validator: Arc<dyn SpecValidator>) -> Self {
        self.validators.add_erased(validator);
        self
    }

    pub fn with_options(mut self, options: SpecValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn configure_options(mut self, configure: impl FnOnce(&mut SpecValidationOptions)) -> Self {
        configure(&mut self.options);
        self
    }

    /// Set the language provider, replacing any earlier one
    pub fn with_language_provider(mut self, provider: Arc<dyn LanguageProvider>) -> Self {
        self.language_provider = Some(provider);
        self
    }

    /// Start from options the host already populated
    pub fn with_mvc_options(mut self, mvc: MvcOptions) -> Self {
        self.mvc = mvc;
        self
    }

    pub fn build(self) -> Result<SpecValidation> {
        let validator_count = self.validators.len();
        let validators = Arc::new(ValidatorProvider::new(Arc::new(self.validators)));
        let provider = Arc::new(SpecModelValidatorProvider::new(
            validators.clone(),
            self.options.clone(),
            self.language_provider,
        ));

        let mut mvc = self.mvc;
        configure_spec_validation(&mut mvc, provider);

        let metadata_provider =
            Arc::new(MetadataProvider::new(mvc.metadata_details_providers.clone()));
        let object_validator = SpecObjectModelValidator::new(
            metadata_provider.clone(),
            &mvc.model_validator_providers,
        )?;

        info!(
            validators = validator_count,
            implicit_validation = self.options.implicit_validation_enabled,
            default_language = ?self.options.normalized_default_language(),
            "Spec validation ready"
        );

        Ok(SpecValidation {
            options: self.options,
            validators,
            mvc,
            metadata_provider,
            object_validator,
        })
    }
}

impl fmt::Debug for SpecValidationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecValidationBuilder")
            .field("validators", &self.validators)
            .field("options", &self.options)
            .field("language_provider", &self.language_provider.is_some())
            .field("mvc", &self.mvc)
            .finish()
    }
}

/// A configured validation pipeline
#[derive(Debug)]
pub struct SpecValidation {
    options: SpecValidationOptions,
    validators: Arc<ValidatorProvider>,
    mvc: MvcOptions,
    metadata_provider: Arc<MetadataProvider>,
    object_validator: SpecObjectModelValidator,
}

impl SpecValidation {
    pub fn builder() -> SpecValidationBuilder {
        SpecValidationBuilder::new()
    }

    pub fn options(&self) -> &SpecValidationOptions {
        &self.options
    }

    pub fn validators(&self) -> &Arc<ValidatorProvider> {
        &self.validators
    }

    pub fn mvc_options(&self) -> &MvcOptions {
        &self.mvc
    }

    pub fn metadata_provider(&self) -> &Arc<MetadataProvider> {
        &self.metadata_provider
    }

    pub fn object_validator(&self) -> &SpecObjectModelValidator {
        &self.object_validator
    }

    /// Binding step: report missing required values of a parameter
    pub fn bind_parameter<T: Model>(
        &self,
        model_state: &mut ModelState,
        name: &str,
        prefix: &str,
        model: &T,
    ) -> Result<usize> {
        let metadata = self.metadata_provider.for_parameter(name, ModelType::of::<T>())?;
        binding::report_missing_values(
            &self.metadata_provider,
            model_state,
            prefix,
            &metadata,
            model,
        )
    }

    /// Validation step for a bound parameter
    pub fn validate_parameter<T: Model>(
        &self,
        request: &RequestContext,
        model_state: &mut ModelState,
        name: &str,
        prefix: &str,
        model: Option<&T>,
    ) -> Result<bool> {
        self.object_validator
            .validate_parameter(request, model_state, name, prefix, model)
    }

    /// Validate a bare model rooted at its own type
    pub fn validate_model(
        &self,
        request: &RequestContext,
        model_state: &mut ModelState,
        prefix: &str,
        model: &dyn Model,
    ) -> Result<bool> {
        self.object_validator
            .validate(request, model_state, None, prefix, Some(model))
    }
}
