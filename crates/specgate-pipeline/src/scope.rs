//! Which nodes of the bound graph get validated
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::metadata::{MetadataKind, ModelMetadata, ModelType};
use crate::options::SpecValidationOptions;
use std::sync::Arc;

/// The options the scope decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeOptions {
    pub implicit_validation_enabled: bool,
    pub implicit_root_collection_element_validation_enabled: bool,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            implicit_validation_enabled: true,
            implicit_root_collection_element_validation_enabled: true,
        }
    }
}

impl From<&SpecValidationOptions> for ScopeOptions {
    fn from(options: &SpecValidationOptions) -> Self {
        Self {
            implicit_validation_enabled: options.implicit_validation_enabled,
            implicit_root_collection_element_validation_enabled: options
                .implicit_root_collection_element_validation_enabled,
        }
    }
}

/// State of one validation pass: the root it started from
///
/// Created per pass and dropped with it, so concurrent passes never see
/// each other's root.
#[derive(Debug, Clone)]
pub struct PassScope {
    root: Option<Arc<ModelMetadata>>,
}

impl PassScope {
    pub fn new(root: Option<Arc<ModelMetadata>>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Arc<ModelMetadata>> {
        self.root.as_ref()
    }
}

/// Whether validation of `current` should be skipped in this pass
pub fn should_skip(
    options: ScopeOptions,
    root: Option<&Arc<ModelMetadata>>,
    current: &Arc<ModelMetadata>,
) -> bool {
    if options.implicit_validation_enabled || current.kind() == MetadataKind::RootType {
        return false;
    }

    let Some(root) = root else {
        return true;
    };
    let is_root = ModelMetadata::same_node(root, current);

    match current.kind() {
        MetadataKind::Property | MetadataKind::Parameter => !is_root,
        MetadataKind::Type | MetadataKind::CollectionElement => {
            if options.implicit_root_collection_element_validation_enabled
                && is_root_collection_element(root, current.model_type())
            {
                return false;
            }
            !is_root
        }
        MetadataKind::RootType => false,
    }
}

fn is_root_collection_element(root: &ModelMetadata, model_type: ModelType) -> bool {
    root.element_type() == Some(model_type)
}
