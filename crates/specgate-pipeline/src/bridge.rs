//! Tagging of framework "required" messages
//!
//! Binding reports a missing required value through the framework's
//! message slot. The bridge wraps that slot so every such message carries
//! [`REQUIRED_PREFIX`], which lets the reconciler tell implicit required
//! errors apart from everything else in model state.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::metadata::{
    BindingMetadataContext, BindingMetadataProvider, MessageFactory, MetadataKind,
};
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

/// Sentinel prepended to implicit required messages
pub const REQUIRED_PREFIX: &str = "_specgate_REQUIRED|";

/// Wrap a message factory so its output is tagged
pub fn tag_required_message(original: MessageFactory) -> MessageFactory {
    Arc::new(move |field| format!("{REQUIRED_PREFIX}{}", original(field)))
}

pub fn is_tagged(message: &str) -> bool {
    message.starts_with(REQUIRED_PREFIX)
}

/// The message without its tag; `None` when it was never tagged
pub fn strip_tag(message: &str) -> Option<&str> {
    message.strip_prefix(REQUIRED_PREFIX)
}

/// Metadata details provider that installs the tagging wrapper on property nodes
#[derive(Debug, Default, Clone, Copy)]
pub struct RequiredMessageBridge;

impl BindingMetadataProvider for RequiredMessageBridge {
    fn create_binding_metadata(&self, context: &mut BindingMetadataContext<'_>) -> Result<()> {
        let key = context.key;
        if key.kind != MetadataKind::Property {
            return Ok(());
        }

        let messages = context
            .binding_metadata
            .message_provider
            .as_mut()
            .ok_or_else(|| Error::MissingMessageProvider {
                type_name: key
                    .container
                    .map_or_else(String::new, |c| c.short_name().to_string()),
                property: key.name.clone().unwrap_or_default(),
            })?;

        let original = messages.value_must_not_be_null().clone();
        messages.set_value_must_not_be_null(tag_required_message(original));
        trace!(property = ?key.name, "Tagged required message slot");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataProvider, Model, ModelType};

    struct Account;

    impl Model for Account {}

    fn provider() -> MetadataProvider {
        MetadataProvider::new(vec![Arc::new(RequiredMessageBridge)])
    }

    #[test]
    fn test_property_messages_are_tagged() {
        let provider = provider();
        let node = provider
            .for_property(ModelType::of::<Account>(), "Email", ModelType::of::<String>())
            .unwrap();
        let message = node
            .binding()
            .message_provider
            .as_ref()
            .unwrap()
            .value_must_not_be_null_message("Email");

        assert!(is_tagged(&message));
        assert_eq!(strip_tag(&message), Some("The Email field is required."));
    }

    #[test]
    fn test_other_nodes_are_untouched() {
        let provider = provider();
        for node in [
            provider.for_type(ModelType::of::<Account>()).unwrap(),
            provider.for_parameter("account", ModelType::of::<Account>()).unwrap(),
        ] {
            let message = node
                .binding()
                .message_provider
                .as_ref()
                .unwrap()
                .value_must_not_be_null_message("x");
            assert!(!is_tagged(&message));
        }
    }

    #[test]
    fn test_missing_message_slot_is_fatal() {
        let provider =
            MetadataProvider::without_message_provider(vec![Arc::new(RequiredMessageBridge)]);
        let err = provider
            .for_property(ModelType::of::<Account>(), "Email", ModelType::of::<String>())
            .unwrap_err();
        match err {
            Error::MissingMessageProvider { type_name, property } => {
                assert_eq!(type_name, "Account");
                assert_eq!(property, "Email");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Non-property nodes never need the slot
        assert!(provider.for_type(ModelType::of::<Account>()).is_ok());
    }

    #[test]
    fn test_strip_untagged() {
        assert_eq!(strip_tag("plain"), None);
        assert!(!is_tagged("plain"));
    }
}
