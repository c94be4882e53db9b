//! Per-request error store keyed by model path
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::collections::BTreeMap;

/// Validation state of one model-state entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ValidationState {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// One error message recorded at a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelError {
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors and state recorded at one path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStateEntry {
    pub errors: Vec<ModelError>,
    pub validation_state: ValidationState,
}

/// Path → entry store shared by binding and validation for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    entries: BTreeMap<String, ModelStateEntry>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at `key` and mark the entry invalid
    pub fn add_model_error(&mut self, key: &str, message: impl Into<String>) {
        let entry = self.get_or_insert(key);
        entry.errors.push(ModelError::new(message));
        entry.validation_state = ValidationState::Invalid;
    }

    /// Mark the entry at `key` valid if it is still unvalidated, creating it when absent
    pub fn mark_field_valid(&mut self, key: &str) {
        let entry = self.get_or_insert(key);
        if entry.validation_state == ValidationState::Unvalidated {
            entry.validation_state = ValidationState::Valid;
        }
    }

    pub fn entry(&self, key: &str) -> Option<&ModelStateEntry> {
        self.entries.get(key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut ModelStateEntry> {
        self.entries.get_mut(key)
    }

    pub fn get_or_insert(&mut self, key: &str) -> &mut ModelStateEntry {
        self.entries.entry(key.to_string()).or_default()
    }

    /// State of the entry at `key`; absent entries are unvalidated
    pub fn field_state(&self, key: &str) -> ValidationState {
        self.entries
            .get(key)
            .map_or(ValidationState::Unvalidated, |entry| entry.validation_state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelStateEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut ModelStateEntry)> {
        self.entries.iter_mut()
    }

    /// Aggregate state: invalid wins over unvalidated, which wins over valid
    pub fn validation_state(&self) -> ValidationState {
        let mut state = ValidationState::Valid;
        for entry in self.entries.values() {
            match entry.validation_state {
                ValidationState::Invalid => return ValidationState::Invalid,
                ValidationState::Unvalidated => state = ValidationState::Unvalidated,
                ValidationState::Valid => {}
            }
        }
        state
    }

    pub fn is_valid(&self) -> bool {
        self.validation_state() == ValidationState::Valid
    }

    /// Total number of recorded errors
    pub fn error_count(&self) -> usize {
        self.entries.values().map(|entry| entry.errors.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path → messages for every invalid entry
    pub fn to_error_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .filter(|(_, entry)| {
                entry.validation_state == ValidationState::Invalid && !entry.errors.is_empty()
            })
            .map(|(key, entry)| {
                let messages = entry.errors.iter().map(|e| e.message.clone()).collect();
                (key.clone(), messages)
            })
            .collect()
    }
}
