pub mod constants;
pub mod enums;
pub mod parsers;
pub mod types;
pub mod utils;

pub use constants::*;
pub use enums::*;
pub use types::*;

// Re-export parsers
pub use parsers::{
    ExtractedRef, ParseError, parse_alias, parse_comment, parse_definition, parse_element, parse_file,
    parse_import, parse_package, parse_usage,
};

#[cfg(test)]
mod tests;
