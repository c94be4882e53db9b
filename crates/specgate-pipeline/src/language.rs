//! Per-request language resolution
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::request::RequestContext;

/// Header read by [`HeaderLanguageProvider::default`]
pub const LANGUAGE_HEADER: &str = "X-Validation-Language";

/// Picks the language validation messages are rendered in
pub trait LanguageProvider: Send + Sync {
    /// Language for this request, `None` to defer to the configured default
    fn language(&self, request: &RequestContext) -> Option<String>;
}

/// Reads the language from a request header
#[derive(Debug, Clone)]
pub struct HeaderLanguageProvider {
    header: String,
}

impl HeaderLanguageProvider {
    pub fn new(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

impl Default for HeaderLanguageProvider {
    fn default() -> Self {
        Self::new(LANGUAGE_HEADER)
    }
}

impl LanguageProvider for HeaderLanguageProvider {
    fn language(&self, request: &RequestContext) -> Option<String> {
        request.header(&self.header).map(str::to_string)
    }
}

/// Always answers with the same language
#[derive(Debug, Clone)]
pub struct FixedLanguageProvider(String);

impl FixedLanguageProvider {
    pub fn new(language: impl Into<String>) -> Self {
        Self(language.into())
    }
}

impl LanguageProvider for FixedLanguageProvider {
    fn language(&self, _request: &RequestContext) -> Option<String> {
        Some(self.0.clone())
    }
}
