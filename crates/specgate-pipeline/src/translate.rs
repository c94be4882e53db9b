//! Rendering engine results into path → message maps
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::language::LanguageProvider;
use crate::options::{normalize_language, SpecValidationOptions};
use crate::request::RequestContext;
use specgate_engine::{MessageMap, ValidationResult};
use tracing::trace;

/// Chooses the language of rendered messages
///
/// The request's language wins when the result supports it, then the
/// configured default, then the untranslated messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTranslator {
    default_language: Option<String>,
}

impl MessageTranslator {
    /// Translator with a default language; blank means none
    pub fn new(default_language: Option<&str>) -> Self {
        Self {
            default_language: normalize_language(default_language),
        }
    }

    pub fn from_options(options: &SpecValidationOptions) -> Self {
        Self {
            default_language: options.normalized_default_language(),
        }
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }

    /// Language for this request: the provider's answer, else the default
    pub fn resolve_language(
        &self,
        provider: Option<&dyn LanguageProvider>,
        request: &RequestContext,
    ) -> Option<String> {
        provider
            .and_then(|provider| normalize_language(provider.language(request).as_deref()))
            .or_else(|| self.default_language.clone())
    }

    /// Messages of `result` in the best available language
    pub fn render(&self, result: &ValidationResult, language: Option<&str>) -> MessageMap {
        if !result.has_errors() {
            return MessageMap::new();
        }

        if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(map) = result.translated_message_map(language) {
                return map;
            }
            trace!(language, "Language not supported by result, falling back");
        }

        if let Some(default) = self.default_language.as_deref() {
            if let Some(map) = result.translated_message_map(default) {
                return map;
            }
        }

        result.message_map()
    }
}
