//! Recompile SysML analysis results with original element IDs.
//!
//! This module restores original XMI element IDs when exporting a model
//! that was originally imported from XMI/JSON-LD. It uses either:
//!
//! - The companion metadata file created during import (`restore_element_ids`)
//! - The SymbolIndex directly (`restore_ids_from_symbols`)
//!
//! ## Usage
//!
//! ```ignore
//! use syster::interchange::{ImportMetadata, Model, recompile::restore_element_ids};
//!
//! // Option 1: From metadata file
//! let metadata: ImportMetadata = serde_json::from_str(&metadata_json)?;
//! let model_with_ids = restore_element_ids(model, &metadata);
//!
//! // Option 2: From SymbolIndex (element_ids already loaded into symbols)
//! let model_with_ids = restore_ids_from_symbols(model, analysis.symbol_index());
//! ```

use super::metadata::ImportMetadata;
use super::model::{ElementId, Model};
use crate::hir::SymbolIndex;
use std::collections::HashMap;

/// Restore original element IDs from metadata.
///
/// This takes a model (typically from analysis) and replaces generated IDs
/// with the original IDs from the import metadata. This ensures that
/// re-exported XMI preserves element IDs for version control stability.
pub fn restore_element_ids(mut model: Model, metadata: &ImportMetadata) -> Model {
    // Build a mapping from qualified name -> original element ID
    let qn_to_original_id: HashMap<&str, &str> = metadata
        .elements
        .iter()
        .filter_map(|(qn, meta)| meta.original_id.as_deref().map(|id| (qn.as_str(), id)))
        .collect();

    // Build a mapping from current ID -> original ID based on qualified names
    let id_mapping: HashMap<ElementId, ElementId> = model
        .elements
        .iter()
        .filter_map(|(current_id, _element)| {
            // Compute qualified name for this element
            let qn = compute_qualified_name(&model, current_id);

            // Look up original ID
            qn_to_original_id
                .get(qn.as_str())
                .map(|orig_id| (current_id.clone(), ElementId::new(*orig_id)))
        })
        .collect();

    // Apply the mapping
    apply_id_mapping(&mut model, &id_mapping);

    model
}

/// Restore element IDs from a SymbolIndex.
///
/// This reads element IDs directly from symbols, which is useful when
/// the metadata has already been loaded into the AnalysisHost via
/// `apply_metadata_to_host()`.
///
/// Use this instead of `restore_element_ids()` when you have an AnalysisHost
/// with metadata already applied.
pub fn restore_ids_from_symbols(mut model: Model, symbol_index: &SymbolIndex) -> Model {
    // Build a mapping from qualified name -> element ID from symbols
    let qn_to_id: HashMap<&str, &str> = symbol_index
        .all_symbols()
        .map(|sym| (sym.qualified_name.as_ref(), sym.element_id.as_ref()))
        .collect();

    // Build a mapping from current ID -> symbol's element ID
    let id_mapping: HashMap<ElementId, ElementId> = model
        .elements
        .iter()
        .filter_map(|(current_id, _element)| {
            // Compute qualified name for this element
            let qn = compute_qualified_name(&model, current_id);

            // Look up element ID from symbol
            qn_to_id
                .get(qn.as_str())
                .map(|sym_id| (current_id.clone(), ElementId::new(*sym_id)))
        })
        .collect();

    // Apply the mapping
    apply_id_mapping(&mut model, &id_mapping);

    model
}

/// Compute qualified name for an element by traversing ownership.
fn compute_qualified_name(model: &Model, id: &ElementId) -> String {
    let Some(element) = model.elements.get(id) else {
        return id.as_str().to_string();
    };

    let name = element.name.as_deref().unwrap_or_else(|| id.as_str());

    if let Some(owner_id) = &element.owner {
        let owner_qn = compute_qualified_name(model, owner_id);
        format!("{}::{}", owner_qn, name)
    } else {
        name.to_string()
    }
}

/// Apply ID mapping to all elements and relationships in the model.
fn apply_id_mapping(model: &mut Model, mapping: &HashMap<ElementId, ElementId>) {
    use indexmap::IndexMap;

    // Remap elements
    let old_elements = std::mem::take(&mut model.elements);
    let mut new_elements = IndexMap::with_capacity(old_elements.len());

    for (old_id, mut element) in old_elements {
        // Get new ID (or keep old if not in mapping)
        let new_id = mapping.get(&old_id).cloned().unwrap_or(old_id);

        // Update element's own ID
        element.id = new_id.clone();

        // Update owner reference
        if let Some(ref old_owner) = element.owner {
            if let Some(new_owner) = mapping.get(old_owner) {
                element.owner = Some(new_owner.clone());
            }
        }

        // Update owned element references
        element.owned_elements = element
            .owned_elements
            .iter()
            .map(|old_child| {
                mapping
                    .get(old_child)
                    .cloned()
                    .unwrap_or_else(|| old_child.clone())
            })
            .collect();

        new_elements.insert(new_id, element);
    }

    model.elements = new_elements;

    // Remap roots
    model.roots = model
        .roots
        .iter()
        .map(|old_id| {
            mapping
                .get(old_id)
                .cloned()
                .unwrap_or_else(|| old_id.clone())
        })
        .collect();

    // Remap relationships
    for rel in &mut model.relationships {
        if let Some(new_id) = mapping.get(&rel.id) {
            rel.id = new_id.clone();
        }
        if let Some(new_source) = mapping.get(&rel.source) {
            rel.source = new_source.clone();
        }
        if let Some(new_target) = mapping.get(&rel.target) {
            rel.target = new_target.clone();
        }
        if let Some(ref old_owner) = rel.owner {
            if let Some(new_owner) = mapping.get(old_owner) {
                rel.owner = Some(new_owner.clone());
            }
        }
    }
}
