//! Error messages, error entries and translation tables
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A message key with its placeholder arguments
///
/// The key doubles as the untranslated message: when a translation table has
/// no template for the key, the key itself is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Message key, e.g. `Texts.MinLength`
    pub key: String,
    /// Placeholder arguments substituted into `{name}` slots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<(String, String)>,
}

impl ErrorMessage {
    /// Create a message without arguments
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Attach a placeholder argument
    pub fn arg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    /// Render the given template with this message's arguments
    pub fn render(&self, template: &str) -> String {
        let mut rendered = template.to_string();
        for (name, value) in &self.args {
            rendered = rendered.replace(&format!("{{{}}}", name), value);
        }
        rendered
    }

    /// Render the message key itself
    pub fn render_key(&self) -> String {
        self.render(&self.key)
    }
}

impl From<&str> for ErrorMessage {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// One error registered at a path: its codes and its messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
    /// Human-readable messages
    #[serde(default)]
    pub messages: Vec<ErrorMessage>,
}

impl ErrorEntry {
    /// Create an entry with a single message
    pub fn message(message: impl Into<ErrorMessage>) -> Self {
        Self {
            codes: Vec::new(),
            messages: vec![message.into()],
        }
    }

    /// Create an entry with a single code and no message
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            codes: vec![code.into()],
            messages: Vec::new(),
        }
    }

    /// Add a code to this entry
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.codes.push(code.into());
        self
    }

    /// Add a message to this entry
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.messages.push(message.into());
        self
    }
}

/// Translation tables keyed by language name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    languages: BTreeMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Create an empty set of translations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a language with the given key/template pairs
    pub fn with_language<L, I, K, V>(mut self, language: L, entries: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extend_language(language, entries);
        self
    }

    /// Add (or extend) a language in place; later templates replace earlier ones
    pub fn extend_language<L, I, K, V>(&mut self, language: L, entries: I)
    where
        L: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.languages.entry(language.into()).or_default();
        for (key, template) in entries {
            table.insert(key.into(), template.into());
        }
    }

    /// Merge another set of translations into this one
    pub fn merge(mut self, other: Translations) -> Self {
        for (language, table) in other.languages {
            self.extend_language(language, table);
        }
        self
    }

    /// Names of all languages, in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Check whether a language is known
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Translate a message; `None` when the language is unknown
    pub fn translate(&self, language: &str, message: &ErrorMessage) -> Option<String> {
        let table = self.languages.get(language)?;
        Some(match table.get(&message.key) {
            Some(template) => message.render(template),
            None => message.render_key(),
        })
    }
}
