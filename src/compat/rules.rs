//! Rule identifiers and severities.
//!
//! Rule names are part of the stable output contract: consumers match on
//! them to build baselines and suppressions, so they never change spelling.

/// Severity of a compatibility issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Stable identifier for one compatibility policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RemovedPackage,
    RemovedClass,
    RemovedMethod,
    RemovedField,
    ChangedVisibility,
    ChangedClassKind,
    ChangedStatic,
    AddedAbstract,
    AddedFinal,
    AddedAbstractMethod,
    ChangedThrows,
    ChangedSuperclass,
    ChangedInterfaces,
    ChangedType,
    ChangedValue,
    ChangedDefaultValue,
    InvalidNullConversion,
    ParameterNameChange,
    ChangedDeprecated,
    ChangedAnnotation,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemovedPackage => "RemovedPackage",
            Self::RemovedClass => "RemovedClass",
            Self::RemovedMethod => "RemovedMethod",
            Self::RemovedField => "RemovedField",
            Self::ChangedVisibility => "ChangedVisibility",
            Self::ChangedClassKind => "ChangedClassKind",
            Self::ChangedStatic => "ChangedStatic",
            Self::AddedAbstract => "AddedAbstract",
            Self::AddedFinal => "AddedFinal",
            Self::AddedAbstractMethod => "AddedAbstractMethod",
            Self::ChangedThrows => "ChangedThrows",
            Self::ChangedSuperclass => "ChangedSuperclass",
            Self::ChangedInterfaces => "ChangedInterfaces",
            Self::ChangedType => "ChangedType",
            Self::ChangedValue => "ChangedValue",
            Self::ChangedDefaultValue => "ChangedDefaultValue",
            Self::InvalidNullConversion => "InvalidNullConversion",
            Self::ParameterNameChange => "ParameterNameChange",
            Self::ChangedDeprecated => "ChangedDeprecated",
            Self::ChangedAnnotation => "ChangedAnnotation",
        }
    }

    /// Deprecation flips are advisory; everything else breaks callers.
    pub fn severity(self) -> Severity {
        match self {
            Self::ChangedDeprecated => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
