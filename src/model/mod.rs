//! In-memory model of an API surface.
//!
//! A [`Codebase`] owns [`Package`]s, which own [`ClassItem`]s, which own
//! [`MemberItem`]s and nested classes. Cross-references (extends, implements,
//! parameter and thrown types) are name-based [`TypeReference`]s, never
//! pointers, so partial codebases can refer to classes defined in another
//! fragment or on the platform (open world).
//!
//! The tree is built once per operation and not mutated afterwards; the
//! merge engine clones nodes into a fresh tree instead of editing in place.

mod annotation;
mod class;
mod member;
mod modifiers;
pub mod surface;
mod types;

pub use annotation::AnnotationItem;
pub use class::{ClassItem, ClassKind, TypeParameter};
pub use member::{
    Constructor, DefaultValue, EnumConstant, Field, MemberItem, MemberKind, Method, Parameter,
    Property,
};
pub use modifiers::{Modifiers, Visibility};
pub use types::{Nullability, TypeArgument, TypeReference, Variance, WildcardBound};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::format::FileFormat;

/// Root container for an API surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Codebase {
    /// Format this codebase was parsed under / should be rendered under.
    pub format: FileFormat,
    /// Packages in declaration order, keyed by dotted package name.
    pub packages: IndexMap<SmolStr, Package>,
}

impl Codebase {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            packages: IndexMap::new(),
        }
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Look up a class by fully qualified name, descending into nested
    /// classes. Returns `None` for external/platform types (open world).
    pub fn find_class(&self, qualified: &str) -> Option<&ClassItem> {
        for (pkg_name, pkg) in &self.packages {
            let Some(rel) = qualified
                .strip_prefix(pkg_name.as_str())
                .and_then(|r| r.strip_prefix('.'))
            else {
                continue;
            };
            if let Some(found) = pkg.find_class(rel) {
                return Some(found);
            }
        }
        None
    }

    /// All classes in the codebase, outer before nested.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassItem> {
        self.packages.values().flat_map(|p| p.all_classes())
    }

    pub fn is_empty(&self) -> bool {
        self.packages.values().all(|p| p.classes.is_empty())
    }
}

/// A named package owning the classes declared in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Dotted package name, e.g. `test.pkg`.
    pub name: SmolStr,
    /// Package-level annotations (apply file-wide).
    pub annotations: Vec<AnnotationItem>,
    /// Top-level classes in declaration order, keyed by package-relative name.
    /// Nested classes live inside their enclosing [`ClassItem`].
    pub classes: IndexMap<SmolStr, ClassItem>,
}

impl Package {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            classes: IndexMap::new(),
        }
    }

    /// Look up a class by package-relative name (`Outer` or `Outer.Inner`).
    pub fn find_class(&self, relative: &str) -> Option<&ClassItem> {
        for class in self.classes.values() {
            if class.name.as_str() == relative {
                return Some(class);
            }
            if relative.starts_with(class.name.as_str())
                && relative.as_bytes().get(class.name.len()) == Some(&b'.')
            {
                if let Some(found) = class.find_nested(relative) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All classes in the package, outer before nested.
    pub fn all_classes(&self) -> impl Iterator<Item = &ClassItem> {
        self.classes.values().flat_map(|c| c.self_and_nested())
    }
}
