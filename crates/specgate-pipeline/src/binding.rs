//! Binding-side reporting of missing required values
//!
//! This is the part of model binding that runs before validation: every
//! required property without a value gets the message its metadata's
//! binding message provider produces.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::metadata::{MetadataProvider, Model, ModelMetadata};
use crate::model_state::ModelState;
use crate::visitor::{element_key, join_key};
use std::sync::Arc;
use tracing::trace;

/// Add a "required" error for every missing required property below `model`
///
/// Returns the number of errors added.
pub fn report_missing_values(
    metadata_provider: &MetadataProvider,
    model_state: &mut ModelState,
    prefix: &str,
    metadata: &Arc<ModelMetadata>,
    model: &dyn Model,
) -> Result<usize> {
    let mut reported = 0;

    if let Some(elements) = model.elements() {
        for (index, element) in elements.into_iter().enumerate() {
            let element_metadata = metadata_provider.for_collection_element(element.model_type())?;
            reported += report_missing_values(
                metadata_provider,
                model_state,
                &element_key(prefix, index),
                &element_metadata,
                element,
            )?;
        }
        return Ok(reported);
    }

    for property in model.properties() {
        let property_metadata = metadata_provider.for_property(
            metadata.model_type(),
            property.name,
            property.model_type,
        )?;
        let key = join_key(prefix, property.name);

        match property.value {
            Some(value) => {
                reported += report_missing_values(
                    metadata_provider,
                    model_state,
                    &key,
                    &property_metadata,
                    value,
                )?;
            }
            None if property.required => {
                let messages = property_metadata
                    .binding()
                    .message_provider
                    .as_ref()
                    .ok_or_else(|| Error::MissingMessageProvider {
                        type_name: metadata.model_type().short_name().to_string(),
                        property: property.name.to_string(),
                    })?;
                let message =
                    messages.value_must_not_be_null_message(property_metadata.display_name());
                trace!(key = %key, "Required value missing");
                model_state.add_model_error(&key, message);
                reported += 1;
            }
            None => {}
        }
    }

    Ok(reported)
}
