// Selection controller
//
// Tracks the single variant under detailed inspection. Stores the variant id
// only; the variant itself is always looked up in the current result set.

use crate::models::{DecorationVariant, ResultSet};
use crate::services::ExportDescriptor;
use std::sync::Arc;
use thiserror::Error;

/// Misuse of the selection API. A correct caller never triggers these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Variant {0} is not part of the current results")]
    UnknownVariant(String),

    #[error("No variant is selected")]
    NoSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `variant_id` for inspection.
    ///
    /// `results` must be the current job's successful result set; `None`
    /// (no job, pending, or failed) rejects every id. Selecting the already
    /// selected variant is a no-op.
    pub fn select(
        &mut self,
        results: Option<&ResultSet>,
        variant_id: &str,
    ) -> Result<(), SelectionError> {
        let known = results.is_some_and(|set| set.contains(variant_id));
        if !known {
            return Err(SelectionError::UnknownVariant(variant_id.to_string()));
        }

        self.selected = Some(variant_id.to_string());
        Ok(())
    }

    /// Drop the selection. Always safe.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolve the selected id against `results`
    pub fn resolve(&self, results: Option<&ResultSet>) -> Option<Arc<DecorationVariant>> {
        let id = self.selected.as_deref()?;
        results.and_then(|set| set.find(id)).cloned()
    }

    /// Describe the selected variant for the download collaborator.
    ///
    /// Leaves the selection untouched.
    pub fn export_selected(
        &self,
        results: Option<&ResultSet>,
    ) -> Result<ExportDescriptor, SelectionError> {
        let id = self.selected.as_deref().ok_or(SelectionError::NoSelection)?;
        let variant = results
            .and_then(|set| set.find(id))
            .ok_or_else(|| SelectionError::UnknownVariant(id.to_string()))?;

        Ok(ExportDescriptor::for_variant(variant))
    }
}
