//! Class items: classes, interfaces, enums, annotation types, records.

use smol_str::SmolStr;

use super::annotation::AnnotationItem;
use super::member::MemberItem;
use super::modifiers::Modifiers;
use super::types::TypeReference;

/// The five class-like declaration kinds, as a tagged variant rather than a
/// class hierarchy, so diffing can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Record => "record",
        }
    }

    pub fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "enum" => Some(Self::Enum),
            "annotation" => Some(Self::Annotation),
            "record" => Some(Self::Record),
            _ => None,
        }
    }

    /// Kinds that can never be subclassed from outside, regardless of
    /// the `final` modifier.
    pub fn is_implicitly_final(self) -> bool {
        matches!(self, Self::Enum | Self::Record | Self::Annotation)
    }
}

/// A generic type parameter with its declared upper bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: SmolStr,
    /// Upper bounds; an implicit `extends java.lang.Object` is not stored.
    pub bounds: Vec<TypeReference>,
}

impl TypeParameter {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

/// A class, interface, enum, annotation type, or record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassItem {
    /// Package-relative name: `Foo` for a top-level class, `Foo.Bar` for a
    /// nested one. The qualified name is `<package>.<name>`.
    pub name: SmolStr,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    pub type_params: Vec<TypeParameter>,
    /// Absent for interfaces and for `java.lang.Object` itself.
    pub super_class: Option<TypeReference>,
    /// Implemented (or, for interfaces, extended) interfaces in declared order.
    pub interfaces: Vec<TypeReference>,
    /// Members in source declaration order; canonical ordering is applied by
    /// the ordering engine at render/diff time, never stored.
    pub members: Vec<MemberItem>,
    /// Nested classes, owned recursively.
    pub nested: Vec<ClassItem>,
}

impl ClassItem {
    pub fn new(name: impl Into<SmolStr>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Last dotted segment of the package-relative name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn qualified_name(&self, package: &str) -> String {
        if package.is_empty() {
            self.name.to_string()
        } else {
            format!("{package}.{}", self.name)
        }
    }

    /// Whether external code could subclass this: not final, not sealed, and
    /// a kind that permits subclassing at all.
    pub fn is_extensible(&self) -> bool {
        !self.modifiers.is_final && !self.modifiers.is_sealed && !self.kind.is_implicitly_final()
    }

    /// This class and all transitively nested classes, outer first.
    pub fn self_and_nested(&self) -> Box<dyn Iterator<Item = &ClassItem> + '_> {
        Box::new(std::iter::once(self).chain(self.nested.iter().flat_map(|c| c.self_and_nested())))
    }

    /// Find a transitively nested class by package-relative name.
    pub fn find_nested(&self, relative: &str) -> Option<&ClassItem> {
        for nested in &self.nested {
            if nested.name.as_str() == relative {
                return Some(nested);
            }
            if relative.starts_with(nested.name.as_str())
                && relative.as_bytes().get(nested.name.len()) == Some(&b'.')
            {
                if let Some(found) = nested.find_nested(relative) {
                    return Some(found);
                }
            }
        }
        None
    }
}
