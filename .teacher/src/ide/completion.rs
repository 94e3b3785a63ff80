//! Completion suggestions implementation.

use std::sync::Arc;

use crate::base::FileId;
use crate::hir::{HirSymbol, SymbolIndex, SymbolKind};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Package,
    Definition,
    Usage,
    Keyword,
    Snippet,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Package => 9,    // Module
            CompletionKind::Definition => 7, // Class
            CompletionKind::Usage => 5,      // Field
            CompletionKind::Keyword => 14,   // Keyword
            CompletionKind::Snippet => 15,   // Snippet
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a HirSymbol.
    pub fn from_symbol(symbol: &HirSymbol) -> Self {
        let kind = if symbol.kind.is_definition() {
            CompletionKind::Definition
        } else if symbol.kind == SymbolKind::Package {
            CompletionKind::Package
        } else {
            CompletionKind::Usage
        };

        let mut item = Self::new(symbol.name.clone(), kind);

        // Add type info as detail
        if !symbol.supertypes.is_empty() {
            item.detail = Some(Arc::from(format!(": {}", symbol.supertypes.join(", "))));
        } else {
            item.detail = Some(Arc::from(symbol.kind.display()));
        }

        // Add doc if available
        if let Some(ref doc) = symbol.doc {
            item.documentation = Some(doc.clone());
        }

        item
    }
}

/// Get completion suggestions at a position.
///
/// # Arguments
/// * `index` - The symbol index to search
/// * `file` - The file containing the cursor
/// * `line` - Cursor line (0-indexed)
/// * `col` - Cursor column (0-indexed)
/// * `trigger` - The trigger character (if any)
///
/// # Returns
/// List of completion suggestions.
pub fn completions(
    index: &SymbolIndex,
    file: FileId,
    line: u32,
    col: u32,
    trigger: Option<char>,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    // Determine context
    let context = determine_context(index, file, line, col, trigger);

    match context {
        CompletionContext::TypeReference => {
            // Suggest definitions (types)
            for symbol in index.all_definitions() {
                if symbol.kind.is_definition() {
                    let mut item = CompletionItem::from_symbol(symbol);
                    item.sort_priority = 10;
                    items.push(item);
                }
            }
        }
        CompletionContext::MemberAccess(scope) => {
            // Suggest members of the scope
            for symbol in index.all_symbols() {
                if symbol.qualified_name.starts_with(&format!("{}::", scope)) {
                    let depth = symbol.qualified_name.matches("::").count();
                    let scope_depth = scope.matches("::").count() + 1;
                    // Only direct children
                    if depth == scope_depth + 1 {
                        items.push(CompletionItem::from_symbol(symbol));
                    }
                }
            }
        }
        CompletionContext::General => {
            // Suggest keywords
            items.extend(keyword_completions());

            // Suggest all visible symbols
            for symbol in index.all_definitions() {
                let mut item = CompletionItem::from_symbol(symbol);
                item.sort_priority = 50;
                items.push(item);
            }

            // Suggest symbols in the same file with higher priority
            for symbol in index.symbols_in_file(file) {
                let mut item = CompletionItem::from_symbol(symbol);
                item.sort_priority = 20;
                items.push(item);
            }
        }
    }

    // Sort by priority
    items.sort_by_key(|item| item.sort_priority);

    // Deduplicate by label
    items.dedup_by(|a, b| a.label == b.label);

    items
}

/// Completion context.
#[derive(Debug)]
enum CompletionContext {
    /// After `:` or `:>` — expecting a type
    TypeReference,
    /// After `::` or `.` — expecting a member
    MemberAccess(String),
    /// General completion
    General,
}

fn determine_context(
    _index: &SymbolIndex,
    _file: FileId,
    _line: u32,
    _col: u32,
    trigger: Option<char>,
) -> CompletionContext {
    // Simple heuristic based on trigger character
    match trigger {
        Some(':') => CompletionContext::TypeReference,
        Some('.') => CompletionContext::MemberAccess(String::new()),
        _ => CompletionContext::General,
    }
}

/// Get keyword completions.
fn keyword_completions() -> Vec<CompletionItem> {
    let keywords = [
        ("part def", "part def ${1:Name} {\n\t$0\n}"),
        ("part", "part ${1:name} : ${2:Type};"),
        ("action def", "action def ${1:Name} {\n\t$0\n}"),
        ("action", "action ${1:name};"),
        ("item def", "item def ${1:Name} {\n\t$0\n}"),
        ("item", "item ${1:name} : ${2:Type};"),
        ("port def", "port def ${1:Name} {\n\t$0\n}"),
        ("port", "port ${1:name} : ${2:Type};"),
        ("attribute", "attribute ${1:name} : ${2:Type};"),
        ("requirement def", "requirement def ${1:Name} {\n\t$0\n}"),
        ("requirement", "requirement ${1:name} {\n\t$0\n}"),
        ("package", "package ${1:Name} {\n\t$0\n}"),
        ("import", "import ${1:path}::*;"),
        ("specializes", ":> ${1:Type}"),
        ("redefines", ":>> ${1:name}"),
        ("subsets", ":> ${1:name}"),
    ];

    keywords
        .iter()
        .enumerate()
        .map(|(i, (label, snippet))| {
            CompletionItem::new(*label, CompletionKind::Keyword)
                .with_insert_text(*snippet)
                .with_priority(i as u32)
        })
        .collect()
}
