//! Structured validation results
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::message::{ErrorEntry, Translations};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Path → messages map, the shape every message accessor returns
pub type MessageMap = BTreeMap<String, Vec<String>>;

/// Outcome of validating one model against its rules
///
/// Results are immutable once built. They share the translation tables of the
/// validator that produced them, so hold on to the rendered maps rather than
/// the result itself when the data has to outlive the current pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<ErrorEntry>>,
    translations: Arc<Translations>,
}

impl ValidationResult {
    /// A result with no errors
    pub fn valid(translations: Arc<Translations>) -> Self {
        Self {
            errors: BTreeMap::new(),
            translations,
        }
    }

    /// Start building a result that renders through the given translations
    pub fn builder(translations: Arc<Translations>) -> ValidationResultBuilder {
        ValidationResultBuilder {
            result: Self::valid(translations),
        }
    }

    /// Whether any path carries an error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Paths that carry errors, in lexicographic order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Path → error entries
    pub fn error_registry(&self) -> &BTreeMap<String, Vec<ErrorEntry>> {
        &self.errors
    }

    /// Every code reported anywhere in the result, first occurrence order
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for entry in self.errors.values().flatten() {
            for code in &entry.codes {
                if !codes.contains(&code.as_str()) {
                    codes.push(code);
                }
            }
        }
        codes
    }

    /// Path → codes, omitting paths without codes
    pub fn code_map(&self) -> BTreeMap<String, Vec<String>> {
        self.errors
            .iter()
            .filter_map(|(path, entries)| {
                let codes: Vec<String> =
                    entries.iter().flat_map(|e| e.codes.iter().cloned()).collect();
                (!codes.is_empty()).then(|| (path.clone(), codes))
            })
            .collect()
    }

    /// Path → untranslated messages
    pub fn message_map(&self) -> MessageMap {
        self.collect_messages(|message| message.render_key())
    }

    /// Names of the languages this result can be rendered in
    pub fn translation_names(&self) -> Vec<&str> {
        self.translations.names().collect()
    }

    /// Whether this result can be rendered in the given language
    pub fn supports_language(&self, language: &str) -> bool {
        self.translations.contains(language)
    }

    /// Path → messages translated to `language`; `None` if unsupported
    pub fn translated_message_map(&self, language: &str) -> Option<MessageMap> {
        if !self.supports_language(language) {
            return None;
        }

        Some(self.collect_messages(|message| {
            self.translations
                .translate(language, message)
                .unwrap_or_else(|| message.render_key())
        }))
    }

    fn collect_messages<F>(&self, render: F) -> MessageMap
    where
        F: Fn(&crate::message::ErrorMessage) -> String,
    {
        self.errors
            .iter()
            .filter_map(|(path, entries)| {
                let messages: Vec<String> = entries
                    .iter()
                    .flat_map(|entry| entry.messages.iter())
                    .map(&render)
                    .collect();
                (!messages.is_empty()).then(|| (path.clone(), messages))
            })
            .collect()
    }
}

/// Incremental construction of a [`ValidationResult`]
#[derive(Debug)]
pub struct ValidationResultBuilder {
    result: ValidationResult,
}

impl ValidationResultBuilder {
    /// Register an error entry at `path` (empty path = the model itself)
    pub fn add(&mut self, path: impl Into<String>, entry: ErrorEntry) -> &mut Self {
        self.result.errors.entry(path.into()).or_default().push(entry);
        self
    }

    /// Number of entries registered so far
    pub fn error_count(&self) -> usize {
        self.result.errors.values().map(Vec::len).sum()
    }

    /// Whether anything was registered yet
    pub fn has_errors(&self) -> bool {
        self.result.has_errors()
    }

    /// Finish the result
    pub fn build(self) -> ValidationResult {
        self.result
    }
}
