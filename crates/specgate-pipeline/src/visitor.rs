//! Traversal of a bound model graph
//!
//! One call to [`ValidationVisitor::validate`] is one validation pass. The
//! pass defers the implicit required errors, walks the graph children first,
//! then restores what the engine did not supersede and drops duplicates.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::metadata::{MetadataProvider, Model, ModelMetadata};
use crate::model_state::{ModelState, ValidationState};
use crate::reconcile;
use crate::request::RequestContext;
use crate::scope::PassScope;
use crate::validator::{ModelValidationContext, ModelValidatorProvider};
use std::sync::Arc;
use tracing::{debug, trace};

/// Path of a property below `prefix`
pub fn join_key(prefix: &str, member: &str) -> String {
    if prefix.is_empty() {
        member.to_string()
    } else if member.is_empty() {
        prefix.to_string()
    } else if member.starts_with('[') {
        format!("{prefix}{member}")
    } else {
        format!("{prefix}.{member}")
    }
}

/// Path of a collection element below `prefix`
pub fn element_key(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

/// Walks a bound model and records validator output in model state
pub struct ValidationVisitor<'a> {
    request: &'a RequestContext,
    model_state: &'a mut ModelState,
    metadata_provider: &'a MetadataProvider,
    validator_provider: &'a dyn ModelValidatorProvider,
    validate_complex_types_if_child_validation_fails: bool,
}

impl<'a> ValidationVisitor<'a> {
    pub fn new(
        request: &'a RequestContext,
        model_state: &'a mut ModelState,
        metadata_provider: &'a MetadataProvider,
        validator_provider: &'a dyn ModelValidatorProvider,
    ) -> Self {
        Self {
            request,
            model_state,
            metadata_provider,
            validator_provider,
            validate_complex_types_if_child_validation_fails: true,
        }
    }

    /// Run one pass over `model` bound at `key`
    ///
    /// Without explicit metadata the model's own type becomes the root.
    /// Returns whether the pass found the graph valid.
    pub fn validate(
        &mut self,
        metadata: Option<Arc<ModelMetadata>>,
        key: &str,
        model: Option<&dyn Model>,
    ) -> Result<bool> {
        let root = match (metadata, model) {
            (Some(metadata), _) => metadata,
            (None, Some(model)) => self.metadata_provider.for_root_type(model.model_type())?,
            (None, None) => return Ok(true),
        };

        let scope = PassScope::new(Some(root.clone()));
        let deferred = reconcile::extract_implicit_required(self.model_state);
        let outcome = self.visit(&scope, &root, key, model);
        let restored = reconcile::restore_unhandled(self.model_state, deferred);
        let removed = reconcile::dedupe(self.model_state);

        debug!(
            key,
            root = root.model_type().name(),
            restored,
            removed,
            "Validation pass finished"
        );
        outcome
    }

    fn visit(
        &mut self,
        scope: &PassScope,
        metadata: &Arc<ModelMetadata>,
        key: &str,
        model: Option<&dyn Model>,
    ) -> Result<bool> {
        trace!(key, kind = ?metadata.kind(), "Visiting node");

        let mut valid = true;
        if let Some(model) = model {
            valid &= self.visit_children(scope, metadata, key, model)?;
        }

        if valid || self.validate_complex_types_if_child_validation_fails {
            valid &= self.validate_node(scope, metadata, key, model)?;
        }

        Ok(valid)
    }

    fn visit_children(
        &mut self,
        scope: &PassScope,
        metadata: &Arc<ModelMetadata>,
        key: &str,
        model: &dyn Model,
    ) -> Result<bool> {
        let mut valid = true;

        if let Some(elements) = model.elements() {
            for (index, element) in elements.into_iter().enumerate() {
                let element_metadata = self
                    .metadata_provider
                    .for_collection_element(element.model_type())?;
                valid &= self.visit(
                    scope,
                    &element_metadata,
                    &element_key(key, index),
                    Some(element),
                )?;
            }
            return Ok(valid);
        }

        for property in model.properties() {
            let property_metadata = self.metadata_provider.for_property(
                metadata.model_type(),
                property.name,
                property.model_type,
            )?;
            valid &= self.visit(
                scope,
                &property_metadata,
                &join_key(key, property.name),
                property.value,
            )?;
        }

        Ok(valid)
    }

    fn validate_node(
        &mut self,
        scope: &PassScope,
        metadata: &Arc<ModelMetadata>,
        key: &str,
        model: Option<&dyn Model>,
    ) -> Result<bool> {
        let context = ModelValidationContext::new(self.request, metadata, model, scope);

        let mut results = Vec::new();
        for validator in self.validator_provider.create_validators(metadata) {
            results.extend(validator.validate(&context)?);
        }

        if results.is_empty() {
            self.model_state.mark_field_valid(key);
            return Ok(self.model_state.field_state(key) != ValidationState::Invalid);
        }

        for result in results {
            self.model_state
                .add_model_error(&join_key(key, &result.member), result.message);
        }
        Ok(false)
    }
}
