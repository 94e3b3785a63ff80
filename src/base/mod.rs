//! Foundation types for the apisig toolchain.
//!
//! This module provides the primitives used throughout the crate:
//! - [`LineIndex`] - byte offset to line number conversion for diagnostics
//!
//! This module has NO dependencies on other apisig modules.

mod line_index;

pub use line_index::LineIndex;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
