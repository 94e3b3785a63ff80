//! Structural type references.
//!
//! A [`TypeReference`] is a name-based descriptor of a possibly generic,
//! possibly array, possibly annotated type. It never points at a
//! [`ClassItem`](super::ClassItem); resolution against a codebase is a
//! separate, optional lookup so that dangling platform references stay legal.

use smol_str::SmolStr;

use super::annotation::AnnotationItem;

/// Nullability of a type reference.
///
/// Four states, not a boolean: "nothing was ever said" (legacy dialects)
/// must round-trip distinctly from both "explicitly nullable" and the
/// platform-type `!` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullability {
    /// Known non-null (the default in suffix-style dialects).
    NonNull,
    /// Explicitly nullable (`?` suffix).
    Nullable,
    /// Nullability unspecified by the source annotation system (`!` suffix).
    Platform,
    /// Legacy dialect: the format carries no nullability at all.
    #[default]
    Unspecified,
}

impl Nullability {
    /// Suffix in suffix-style dialects; empty for the other states.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Nullable => "?",
            Self::Platform => "!",
            Self::NonNull | Self::Unspecified => "",
        }
    }
}

/// Wildcard variance (`? extends T` vs `? super T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    Extends,
    Super,
}

/// The bound of a non-unbounded wildcard type argument.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardBound {
    pub variance: Variance,
    pub bound: TypeReference,
}

/// One type argument: a concrete type or a wildcard.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeArgument {
    Type(TypeReference),
    /// `?` when the bound is `None`.
    Wildcard(Option<WildcardBound>),
}

/// A structural, name-based reference to a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    /// Qualified base name (`java.util.List`, `int`, `T`).
    pub name: SmolStr,
    /// Ordered generic arguments.
    pub arguments: Vec<TypeArgument>,
    /// Number of array dimensions (`[]` pairs).
    pub array_dims: u8,
    pub nullability: Nullability,
    /// Type-use annotations, rendered only when the format asks for them.
    pub annotations: Vec<AnnotationItem>,
}

impl TypeReference {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            array_dims: 0,
            nullability: Nullability::Unspecified,
            annotations: Vec::new(),
        }
    }

    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }

    /// Primitive types never carry nullability or generics.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.name.as_str(),
            "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" | "void"
        )
    }

    /// Integral primitives get a trailing hex comment when used as constants.
    pub fn wants_hex_comment(&self) -> bool {
        self.array_dims == 0
            && matches!(self.name.as_str(), "byte" | "char" | "short" | "int" | "long")
    }

    pub fn is_java_lang_object(&self) -> bool {
        self.name == "java.lang.Object" && self.array_dims == 0
    }

    /// Identity used by the merge/subtract engine and overload matching:
    /// base name, array dimensions, nothing else.
    pub fn erased_signature(&self) -> String {
        let mut sig = self.name.to_string();
        for _ in 0..self.array_dims {
            sig.push_str("[]");
        }
        sig
    }
}
