//! Annotation attachments.

use smol_str::SmolStr;

/// An annotation attached to a package, class, member, or type use.
///
/// Attribute values are verbatim source expressions; the model does not
/// evaluate them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationItem {
    /// Qualified annotation type name, without the `@`.
    pub name: SmolStr,
    /// Ordered attribute name → expression pairs.
    pub attributes: Vec<(SmolStr, SmolStr)>,
}

impl AnnotationItem {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Simple (unqualified) annotation name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}
