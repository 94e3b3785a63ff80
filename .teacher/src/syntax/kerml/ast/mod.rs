pub mod enums;
pub mod parsers;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

pub use enums::*;
pub use parsers::{
    ParseError, parse_classifier, parse_comment, parse_documentation, parse_element, parse_feature,
    parse_file, parse_import, parse_package,
};
pub use types::*;
