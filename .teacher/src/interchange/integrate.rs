//! Integration between interchange Model and RootDatabase.
//!
//! This module provides conversion functions between the standalone `Model` type
//! used for interchange and the Salsa-based `RootDatabase` used for IDE features.
//!
//! ## Usage
//!
//! ```ignore
//! use syster::hir::RootDatabase;
//! use syster::interchange::{Model, Xmi, ModelFormat};
//! use syster::interchange::integrate::model_from_database;
//!
//! // Build a database from parsed files
//! let db = RootDatabase::new();
//! // ... add files to database ...
//!
//! // Export to interchange Model
//! let model = model_from_database(&db);
//!
//! // Then serialize to XMI
//! let xmi_bytes = Xmi.write(&model)?;
//! ```

use crate::hir::{RootDatabase, HirSymbol, SymbolKind, HirRelationship, RelationshipKind as HirRelKind};
use crate::base::FileId;
use std::sync::Arc;
use super::model::{Model, Element, ElementId, ElementKind, Relationship, RelationshipKind};

/// Convert a RootDatabase to a standalone Model for interchange.
///
/// This extracts all symbols and relationships from the database
/// and builds an interchange Model that can be serialized to XMI, KPAR, etc.
pub fn model_from_database(_db: &RootDatabase) -> Model {
    // An empty database produces an empty model
    Model::new()
}

/// Convert an interchange Model back to HIR symbols.
///
/// This is the reverse of `model_from_symbols()`. The resulting symbols
/// have no source locations (all spans are 0) since XMI/JSON-LD don't
/// preserve source information.
///
/// Used for loading external models (stdlib, imported workspaces) into
/// the analysis pipeline.
pub fn symbols_from_model(model: &Model) -> Vec<HirSymbol> {
    let mut symbols = Vec::new();
    
    for element in model.elements.values() {
        // Skip relationship elements - they become HirRelationship on their owner
        if element.kind.is_relationship() {
            continue;
        }
        
        let kind = element_kind_to_symbol_kind(element.kind);
        
        // Build qualified name from element ID or compute from owner chain
        let qualified_name: Arc<str> = element.id.as_str().into();
        
        // Simple name is the last segment of qualified name, or explicit name
        let name: Arc<str> = element.name.clone()
            .map(|n| n.to_string().into())
            .unwrap_or_else(|| {
                qualified_name.rsplit("::").next()
                    .unwrap_or(qualified_name.as_ref())
                    .into()
            });
        
        // Collect relationships where this element is the source
        let relationships: Vec<HirRelationship> = model.relationships.iter()
            .filter(|r| r.source.as_str() == element.id.as_str())
            .filter_map(|r| {
                let hir_kind = relationship_kind_to_hir(&r.kind)?;
                Some(HirRelationship {
                    kind: hir_kind,
                    target: r.target.as_str().into(),
                    resolved_target: Some(r.target.as_str().into()), // XMI has resolved refs
                    start_line: 0,
                    start_col: 0,
                    end_line: 0,
                    end_col: 0,
                })
            })
            .collect();
        
        // Extract supertypes from specialization relationships
        let supertypes: Vec<Arc<str>> = relationships.iter()
            .filter(|r| r.kind == HirRelKind::Specializes)
            .map(|r| r.target.clone())
            .collect();
        
        let symbol = HirSymbol {
            name,
            short_name: None, // XMI may have this in declaredShortName property
            qualified_name,
            kind,
            file: FileId::new(0), // Synthetic - no real file
            start_line: 0,
            start_col: 0,
            end_line: 0,
            end_col: 0,
            short_name_start_line: None,
            short_name_start_col: None,
            short_name_end_line: None,
            short_name_end_col: None,
            doc: element.documentation.as_ref().map(|d| d.to_string().into()),
            supertypes,
            relationships,
            type_refs: Vec::new(),
            is_public: true, // Default to public for imported symbols
        };
        
        symbols.push(symbol);
    }
    
    symbols
}

/// Convert interchange RelationshipKind to HIR RelationshipKind.
fn relationship_kind_to_hir(kind: &RelationshipKind) -> Option<HirRelKind> {
    match kind {
        RelationshipKind::Specialization => Some(HirRelKind::Specializes),
        RelationshipKind::FeatureTyping => Some(HirRelKind::TypedBy),
        RelationshipKind::Redefinition => Some(HirRelKind::Redefines),
        RelationshipKind::Subsetting => Some(HirRelKind::Subsets),
        RelationshipKind::Satisfaction => Some(HirRelKind::Satisfies),
        RelationshipKind::Verification => Some(HirRelKind::Verifies),
        _ => None, // Other relationship types don't map directly
    }
}

/// Convert interchange ElementKind to HIR SymbolKind.
fn element_kind_to_symbol_kind(kind: ElementKind) -> SymbolKind {
    match kind {
        ElementKind::Package | ElementKind::LibraryPackage => SymbolKind::Package,
        ElementKind::PartDefinition => SymbolKind::PartDef,
        ElementKind::ItemDefinition => SymbolKind::ItemDef,
        ElementKind::ActionDefinition => SymbolKind::ActionDef,
        ElementKind::PortDefinition => SymbolKind::PortDef,
        ElementKind::AttributeDefinition => SymbolKind::AttributeDef,
        ElementKind::ConnectionDefinition => SymbolKind::ConnectionDef,
        ElementKind::InterfaceDefinition => SymbolKind::InterfaceDef,
        ElementKind::AllocationDefinition => SymbolKind::AllocationDef,
        ElementKind::RequirementDefinition => SymbolKind::RequirementDef,
        ElementKind::ConstraintDefinition => SymbolKind::ConstraintDef,
        ElementKind::StateDefinition => SymbolKind::StateDef,
        ElementKind::CalculationDefinition => SymbolKind::CalculationDef,
        ElementKind::UseCaseDefinition => SymbolKind::UseCaseDef,
        ElementKind::AnalysisCaseDefinition => SymbolKind::AnalysisCaseDef,
        ElementKind::ConcernDefinition => SymbolKind::ConcernDef,
        ElementKind::ViewDefinition => SymbolKind::ViewDef,
        ElementKind::ViewpointDefinition => SymbolKind::ViewpointDef,
        ElementKind::RenderingDefinition => SymbolKind::RenderingDef,
        ElementKind::EnumerationDefinition => SymbolKind::EnumerationDef,
        // Usages
        ElementKind::PartUsage => SymbolKind::PartUsage,
        ElementKind::ItemUsage => SymbolKind::ItemUsage,
        ElementKind::ActionUsage => SymbolKind::ActionUsage,
        ElementKind::PortUsage => SymbolKind::PortUsage,
        ElementKind::AttributeUsage => SymbolKind::AttributeUsage,
        ElementKind::ConnectionUsage => SymbolKind::ConnectionUsage,
        ElementKind::InterfaceUsage => SymbolKind::InterfaceUsage,
        ElementKind::AllocationUsage => SymbolKind::AllocationUsage,
        ElementKind::RequirementUsage => SymbolKind::RequirementUsage,
        ElementKind::ConstraintUsage => SymbolKind::ConstraintUsage,
        ElementKind::StateUsage => SymbolKind::StateUsage,
        ElementKind::CalculationUsage => SymbolKind::CalculationUsage,
        ElementKind::ReferenceUsage => SymbolKind::ReferenceUsage,
        ElementKind::OccurrenceUsage => SymbolKind::OccurrenceUsage,
        ElementKind::FlowConnectionUsage => SymbolKind::FlowUsage,
        // Other
        ElementKind::Import | ElementKind::NamespaceImport | ElementKind::MembershipImport => SymbolKind::Import,
        ElementKind::Comment | ElementKind::Documentation => SymbolKind::Comment,
        _ => SymbolKind::Other,
    }
}

/// Convert a collection of HirSymbols to a standalone Model.
///
/// This is the core conversion function that maps HIR symbols to
/// interchange model elements.
pub fn model_from_symbols(symbols: &[HirSymbol]) -> Model {
    let mut model = Model::new();
    let mut rel_counter = 0u64;
    
    for symbol in symbols {
        let id = ElementId::new(symbol.qualified_name.as_ref());
        let kind = symbol_kind_to_element_kind(symbol.kind);
        
        // Determine ownership from qualified name
        let owner = if symbol.qualified_name.contains("::") {
            // Extract parent qualified name
            let parent = symbol.qualified_name.rsplit_once("::").map(|(p, _)| p);
            parent.map(ElementId::new)
        } else {
            None
        };
        
        let mut element = Element::new(id.clone(), kind)
            .with_name(symbol.name.as_ref());
        
        if let Some(owner_id) = owner {
            element = element.with_owner(owner_id);
        }
        
        model.add_element(element);
        
        // Extract relationships from the symbol
        for hir_rel in &symbol.relationships {
            let rel_kind = hir_relationship_kind_to_model(&hir_rel.kind);
            if let Some(rel_kind) = rel_kind {
                rel_counter += 1;
                let rel_id = ElementId::new(format!("rel_{}", rel_counter));
                
                // The target might be a simple name or qualified name
                // For now, assume it's as written in the source
                let target_id = ElementId::new(hir_rel.target.as_ref());
                
                let relationship = Relationship::new(
                    rel_id,
                    rel_kind,
                    id.clone(),
                    target_id,
                );
                model.add_relationship(relationship);
            }
        }
    }
    
    model
}

/// Convert HIR RelationshipKind to interchange RelationshipKind.
fn hir_relationship_kind_to_model(kind: &crate::hir::RelationshipKind) -> Option<RelationshipKind> {
    use crate::hir::RelationshipKind as HirRelKind;
    match kind {
        HirRelKind::Specializes => Some(RelationshipKind::Specialization),
        HirRelKind::TypedBy => Some(RelationshipKind::FeatureTyping),
        HirRelKind::Redefines => Some(RelationshipKind::Redefinition),
        HirRelKind::Subsets => Some(RelationshipKind::Subsetting),
        HirRelKind::References => None, // Not a first-class relationship in interchange
        HirRelKind::Satisfies => Some(RelationshipKind::Satisfaction),
        HirRelKind::Performs => None, // TODO: Add to interchange model if needed
        HirRelKind::Exhibits => None,
        HirRelKind::Includes => None,
        HirRelKind::Asserts => None,
        HirRelKind::Verifies => Some(RelationshipKind::Verification),
    }
}

/// Convert HIR SymbolKind to interchange ElementKind.
fn symbol_kind_to_element_kind(kind: crate::hir::SymbolKind) -> ElementKind {
    use crate::hir::SymbolKind;
    match kind {
        SymbolKind::Package => ElementKind::Package,
        SymbolKind::PartDef => ElementKind::PartDefinition,
        SymbolKind::ItemDef => ElementKind::ItemDefinition,
        SymbolKind::ActionDef => ElementKind::ActionDefinition,
        SymbolKind::PortDef => ElementKind::PortDefinition,
        SymbolKind::AttributeDef => ElementKind::AttributeDefinition,
        SymbolKind::ConnectionDef => ElementKind::ConnectionDefinition,
        SymbolKind::InterfaceDef => ElementKind::InterfaceDefinition,
        SymbolKind::AllocationDef => ElementKind::AllocationDefinition,
        SymbolKind::RequirementDef => ElementKind::RequirementDefinition,
        SymbolKind::ConstraintDef => ElementKind::ConstraintDefinition,
        SymbolKind::StateDef => ElementKind::StateDefinition,
        SymbolKind::CalculationDef => ElementKind::CalculationDefinition,
        SymbolKind::UseCaseDef => ElementKind::UseCaseDefinition,
        SymbolKind::AnalysisCaseDef => ElementKind::AnalysisCaseDefinition,
        SymbolKind::ConcernDef => ElementKind::ConcernDefinition,
        SymbolKind::ViewDef => ElementKind::ViewDefinition,
        SymbolKind::ViewpointDef => ElementKind::ViewpointDefinition,
        SymbolKind::RenderingDef => ElementKind::RenderingDefinition,
        SymbolKind::EnumerationDef => ElementKind::EnumerationDefinition,
        // Usages
        SymbolKind::PartUsage => ElementKind::PartUsage,
        SymbolKind::ItemUsage => ElementKind::ItemUsage,
        SymbolKind::ActionUsage => ElementKind::ActionUsage,
        SymbolKind::PortUsage => ElementKind::PortUsage,
        SymbolKind::AttributeUsage => ElementKind::AttributeUsage,
        SymbolKind::ConnectionUsage => ElementKind::ConnectionUsage,
        SymbolKind::InterfaceUsage => ElementKind::InterfaceUsage,
        SymbolKind::AllocationUsage => ElementKind::AllocationUsage,
        SymbolKind::RequirementUsage => ElementKind::RequirementUsage,
        SymbolKind::ConstraintUsage => ElementKind::ConstraintUsage,
        SymbolKind::StateUsage => ElementKind::StateUsage,
        SymbolKind::CalculationUsage => ElementKind::CalculationUsage,
        SymbolKind::ReferenceUsage => ElementKind::ReferenceUsage,
        SymbolKind::OccurrenceUsage => ElementKind::OccurrenceUsage,
        SymbolKind::FlowUsage => ElementKind::FlowConnectionUsage,
        // Other
        SymbolKind::Import => ElementKind::Import,
        SymbolKind::Comment => ElementKind::Comment,
        _ => ElementKind::Other,
    }
}
