//! Validation options
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Language picked when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "English";

/// Options controlling how request models are validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SpecValidationOptions {
    /// Validate every node of the bound graph, not only the root
    pub implicit_validation_enabled: bool,

    /// With implicit validation off, still validate elements of a root collection
    pub implicit_root_collection_element_validation_enabled: bool,

    /// Stop each validator after its first error
    pub fail_fast: bool,

    /// Language used when the request does not pick one
    pub default_language: Option<String>,
}

impl Default for SpecValidationOptions {
    fn default() -> Self {
        Self {
            implicit_validation_enabled: true,
            implicit_root_collection_element_validation_enabled: true,
            fail_fast: false,
            default_language: Some(DEFAULT_LANGUAGE.to_string()),
        }
    }
}

impl SpecValidationOptions {
    /// Default language trimmed, with blank values treated as unset
    pub fn normalized_default_language(&self) -> Option<String> {
        normalize_language(self.default_language.as_deref())
    }
}

pub(crate) fn normalize_language(language: Option<&str>) -> Option<String> {
    language
        .map(str::trim)
        .filter(|language| !language.is_empty())
        .map(str::to_string)
}
