//! Salsa database definition and queries.

use std::sync::Arc;

use crate::base::FileId;
use crate::syntax::SyntaxFile;
use crate::syntax::file::FileExtension;

use super::input::SourceRoot;
use super::symbols::{HirSymbol, extract_symbols_unified};

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a file.
///
/// Set this explicitly when a file is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub text: String,
}

/// Input: Configuration for the source root.
#[salsa::input]
pub struct SourceRootInput {
    #[return_ref]
    pub root: SourceRoot,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database for HIR operations.
///
/// This provides memoization for expensive operations like parsing and
/// symbol extraction. All queries are automatically invalidated when
/// their inputs change.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {
        // Default no-op implementation
    }
}

impl RootDatabase {
    /// Create a new, empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Parse result with optional AST and errors.
///
/// Uses our new SyntaxFile type from the rowan parser.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    /// The parse was successful (no fatal errors).
    pub success: bool,
    /// Parse errors (may be present even with partial success).
    pub errors: Vec<String>,
    /// The parsed syntax file (if successful).
    pub syntax_file: Option<Arc<SyntaxFile>>,
}

// Manual Eq impl for Salsa tracking
impl Eq for ParseResult {}

impl ParseResult {
    /// Create a successful parse result.
    pub fn ok(syntax_file: SyntaxFile) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            syntax_file: Some(Arc::new(syntax_file)),
        }
    }

    /// Create a successful parse result with errors (warnings).
    pub fn ok_with_errors(syntax_file: SyntaxFile, errors: Vec<String>) -> Self {
        Self {
            success: true,
            errors,
            syntax_file: Some(Arc::new(syntax_file)),
        }
    }

    /// Create a failed parse result with errors.
    pub fn err(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            syntax_file: None,
        }
    }

    /// Check if parsing succeeded.
    pub fn is_ok(&self) -> bool {
        self.success
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the syntax file if parsing succeeded.
    pub fn get_syntax_file(&self) -> Option<&SyntaxFile> {
        self.syntax_file.as_deref()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file and return whether it succeeded.
///
/// This is a tracked Salsa query - results are memoized and automatically
/// invalidated when the input `FileText` changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> ParseResult {
    let text = file_text.text(db);

    // Parse using the rowan parser via SyntaxFile
    let syntax_file = SyntaxFile::new(text, FileExtension::SysML);

    if syntax_file.has_errors() {
        let errors: Vec<String> = syntax_file
            .errors()
            .iter()
            .map(|e| e.message.clone())
            .collect();
        ParseResult::ok_with_errors(syntax_file, errors)
    } else {
        ParseResult::ok(syntax_file)
    }
}

/// Extract symbols from a parsed file.
///
/// This is a pure function that takes a FileId and SyntaxFile, then returns symbols.
/// It's designed to be composable with other queries.
pub fn file_symbols(file: FileId, syntax_file: &SyntaxFile) -> Vec<HirSymbol> {
    extract_symbols_unified(file, syntax_file)
}

/// Extract symbols from a file given its text.
///
/// This is a tracked Salsa query that combines parsing + symbol extraction.
/// Results are memoized per-file.
#[salsa::tracked]
pub fn file_symbols_from_text(db: &dyn salsa::Database, file_text: FileText) -> Vec<HirSymbol> {
    let file = file_text.file(db);
    let result = parse_file(db, file_text);
    match result.syntax_file {
        Some(ref syntax_file) => extract_symbols_unified(file, syntax_file),
        None => Vec::new(),
    }
}
