//! Reconciliation of implicit required errors with engine results
//!
//! Before a validation pass the tagged "required" messages that binding put
//! into model state are taken out. The engine then gets a chance to report
//! its own error for the same path. Afterwards every deferred message whose
//! entry received nothing new is put back, untagged, at its original position.
//!
//! Copyright (c) 2025 Specgate Team
//! Licensed under the Apache-2.0 license

use crate::bridge::strip_tag;
use crate::model_state::{ModelError, ModelState, ValidationState};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// A tagged required message taken out of model state for one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredImplicitRequiredError {
    /// Model-state path
    pub key: String,
    /// Message with the tag already stripped
    pub message: String,
    /// Index in the entry's error list before extraction
    pub position: usize,
    /// Error count the entry was left with after extraction
    pub baseline_len: usize,
}

/// Take every tagged message out of invalid entries
///
/// Untagged messages stay where they are. An entry left without errors goes
/// back to [`ValidationState::Unvalidated`].
pub fn extract_implicit_required(
    model_state: &mut ModelState,
) -> Vec<DeferredImplicitRequiredError> {
    let mut deferred = Vec::new();

    for (key, entry) in model_state.iter_mut() {
        if entry.validation_state != ValidationState::Invalid {
            continue;
        }
        if !entry.errors.iter().any(|e| strip_tag(&e.message).is_some()) {
            continue;
        }

        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(entry.errors.len());
        for (position, error) in std::mem::take(&mut entry.errors).into_iter().enumerate() {
            match strip_tag(&error.message) {
                Some(stripped) => taken.push((position, stripped.to_string())),
                None => kept.push(error),
            }
        }

        entry.errors = kept;
        if entry.errors.is_empty() {
            entry.validation_state = ValidationState::Unvalidated;
        }

        let baseline_len = entry.errors.len();
        trace!(key = %key, count = taken.len(), "Deferred implicit required errors");
        deferred.extend(taken.into_iter().map(|(position, message)| DeferredImplicitRequiredError {
            key: key.clone(),
            message,
            position,
            baseline_len,
        }));
    }

    deferred
}

/// Put back deferred messages whose entry the pass left untouched
///
/// An entry counts as handled once it holds more errors than it was left
/// with; its deferred messages are then dropped. Returns how many messages
/// were restored.
pub fn restore_unhandled(
    model_state: &mut ModelState,
    deferred: Vec<DeferredImplicitRequiredError>,
) -> usize {
    let mut by_key: BTreeMap<String, Vec<DeferredImplicitRequiredError>> = BTreeMap::new();
    for record in deferred {
        by_key.entry(record.key.clone()).or_default().push(record);
    }

    let mut restored = 0;
    for (key, mut records) in by_key {
        records.sort_by_key(|record| record.position);
        let baseline_len = records.iter().map(|r| r.baseline_len).min().unwrap_or(0);

        let entry = model_state.get_or_insert(&key);
        if entry.errors.len() > baseline_len {
            debug!(
                key = %key,
                dropped = records.len(),
                "Engine reported its own error, dropping implicit required error"
            );
            continue;
        }

        for record in records {
            let at = record.position.min(entry.errors.len());
            entry.errors.insert(at, ModelError::new(record.message));
            restored += 1;
        }
        entry.validation_state = ValidationState::Invalid;
    }

    restored
}

/// Drop repeated messages within each invalid entry, keeping the first
///
/// Returns how many messages were removed.
pub fn dedupe(model_state: &mut ModelState) -> usize {
    let mut removed = 0;

    for (_, entry) in model_state.iter_mut() {
        if entry.validation_state != ValidationState::Invalid || entry.errors.len() < 2 {
            continue;
        }

        let before = entry.errors.len();
        let mut seen = HashSet::new();
        entry.errors.retain(|error| seen.insert(error.message.clone()));
        removed += before - entry.errors.len();
    }

    removed
}
