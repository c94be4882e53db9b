//! Per-request context visible to validators
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;

/// What the host knows about the request being validated
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add a header; names are case-insensitive
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}
