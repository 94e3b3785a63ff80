//! Member items: constructors, methods, fields, properties, enum constants.

use smol_str::SmolStr;

use super::annotation::AnnotationItem;
use super::class::TypeParameter;
use super::modifiers::Modifiers;
use super::types::TypeReference;

/// Member kind, in the fixed group order the renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Constructor,
    Method,
    Field,
    Property,
    EnumConstant,
}

impl MemberKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Constructor => "ctor",
            Self::Method => "method",
            Self::Field => "field",
            Self::Property => "property",
            Self::EnumConstant => "enum_constant",
        }
    }
}

/// A parameter default value.
///
/// The concise dialect replaces literals with the `optional` keyword, so a
/// parsed default may be known to exist without its text surviving.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Verbatim source expression.
    Literal(SmolStr),
    /// A default exists but its expression was elided (`optional`).
    Unstated,
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub ty: TypeReference,
    /// Optional source name; significant for Kotlin named-argument callers.
    pub name: Option<SmolStr>,
    pub default_value: Option<DefaultValue>,
    pub is_vararg: bool,
}

impl Parameter {
    pub fn of(ty: TypeReference) -> Self {
        Self {
            ty,
            name: None,
            default_value: None,
            is_vararg: false,
        }
    }

    /// Erased identity: base type name, array dims, vararg marker.
    pub fn erased_signature(&self) -> String {
        let mut sig = self.ty.erased_signature();
        if self.is_vararg {
            sig.push_str("...");
        }
        sig
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    /// Package-relative class name, matching the enclosing class (`Foo.Bar`).
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    pub type_params: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    pub type_params: Vec<TypeParameter>,
    pub return_type: TypeReference,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    pub ty: TypeReference,
    /// Compile-time constant value, verbatim literal text.
    pub value: Option<SmolStr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    pub ty: TypeReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationItem>,
    /// The enum type itself.
    pub ty: TypeReference,
}

/// A class member, as a tagged variant over the five declaration kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberItem {
    Constructor(Constructor),
    Method(Method),
    Field(Field),
    Property(Property),
    EnumConstant(EnumConstant),
}

impl MemberItem {
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Constructor(_) => MemberKind::Constructor,
            Self::Method(_) => MemberKind::Method,
            Self::Field(_) => MemberKind::Field,
            Self::Property(_) => MemberKind::Property,
            Self::EnumConstant(_) => MemberKind::EnumConstant,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Constructor(c) => &c.name,
            Self::Method(m) => &m.name,
            Self::Field(f) => &f.name,
            Self::Property(p) => &p.name,
            Self::EnumConstant(e) => &e.name,
        }
    }

    pub fn modifiers(&self) -> &Modifiers {
        match self {
            Self::Constructor(c) => &c.modifiers,
            Self::Method(m) => &m.modifiers,
            Self::Field(f) => &f.modifiers,
            Self::Property(p) => &p.modifiers,
            Self::EnumConstant(e) => &e.modifiers,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        match self {
            Self::Constructor(c) => &c.parameters,
            Self::Method(m) => &m.parameters,
            _ => &[],
        }
    }

    pub fn throws(&self) -> &[TypeReference] {
        match self {
            Self::Constructor(c) => &c.throws,
            Self::Method(m) => &m.throws,
            _ => &[],
        }
    }

    /// Identity used for merge-join alignment, override-wins merging, and
    /// subtraction: kind + name + erased parameter signature. Modifiers,
    /// nullability, and generics are deliberately excluded.
    pub fn identity(&self) -> (MemberKind, &str, String) {
        let params = self
            .parameters()
            .iter()
            .map(Parameter::erased_signature)
            .collect::<Vec<_>>()
            .join(",");
        (self.kind(), self.name(), params)
    }
}
