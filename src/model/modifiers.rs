//! Modifier sets and visibility levels.

/// Visibility of a class or member.
///
/// Variants are ordered from narrowest to widest, so `old < new` means the
/// visibility was widened (compatible) and `old > new` means narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Visibility {
    Private,
    /// Java default visibility; has no keyword in the signature grammar.
    #[default]
    PackagePrivate,
    /// Kotlin module-internal visibility.
    Internal,
    Protected,
    Public,
}

impl Visibility {
    /// Signature-format keyword, `None` for package-private.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Private => Some("private"),
            Self::PackagePrivate => None,
            Self::Internal => Some("internal"),
            Self::Protected => Some("protected"),
            Self::Public => Some("public"),
        }
    }

    /// Part of the published API surface (rendered, diffed).
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

/// Flat modifier set attached to classes and members.
///
/// The signature grammar gives every modifier a fixed keyword and a fixed
/// position; this struct does not track source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    /// Interface method with a body (`default` keyword).
    pub is_default: bool,
    pub is_sealed: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    /// Deprecation is carried as a pseudo-modifier, last in the sequence.
    pub is_deprecated: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    /// Modifier combinations the grammar rejects.
    ///
    /// Returns the offending pair as a message fragment.
    pub fn conflict(&self) -> Option<&'static str> {
        if self.is_abstract && self.is_final {
            return Some("`abstract` and `final`");
        }
        if self.is_default && self.is_static {
            return Some("`default` and `static`");
        }
        if self.is_default && self.is_abstract {
            return Some("`default` and `abstract`");
        }
        if self.is_transient && self.is_volatile {
            return Some("`transient` and `volatile`");
        }
        None
    }
}
