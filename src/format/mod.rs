//! Signature file format descriptor.
//!
//! Every parse and every render is parameterized by exactly one [`FileFormat`]:
//! a major.minor version plus orthogonal feature flags. Formats are threaded
//! explicitly through the parser, ordering engine, and renderer — there is no
//! ambient "current format" state.

use std::fmt;

/// How nullability is written on type references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullabilityStyle {
    /// Legacy dialect: no nullability markers at all.
    Omitted,
    /// Kotlin-style suffixes: `?` nullable, `!` platform, nothing non-null.
    Suffix,
}

/// Ordering policy for overloaded members sharing a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverloadOrder {
    /// Preserve source declaration order.
    Source,
    /// Order by parameter count, then pairwise parameter type names.
    Signature,
}

/// Version + feature-flag descriptor governing parse and render behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileFormat {
    pub major: u8,
    pub minor: u8,
    pub nullability: NullabilityStyle,
    /// Render/parse type-use annotations inside type references.
    pub include_type_use_annotations: bool,
    /// Swap name/type rendering order to `name: type` (Kotlin convention).
    pub kotlin_name_type_order: bool,
    /// Sort the whole implements/extends list lexicographically instead of
    /// preserving first-declared order.
    pub sort_whole_extends_list: bool,
    pub overload_order: OverloadOrder,
    /// Replace default-value literals with the `optional` keyword.
    pub concise_default_values: bool,
}

/// The newest major version this crate reads and writes.
pub const LATEST_MAJOR: u8 = 4;

impl FileFormat {
    /// Legacy dialect: no header line, no nullability, source order.
    pub fn v1() -> Self {
        Self {
            major: 1,
            minor: 0,
            nullability: NullabilityStyle::Omitted,
            include_type_use_annotations: false,
            kotlin_name_type_order: false,
            sort_whole_extends_list: false,
            overload_order: OverloadOrder::Source,
            concise_default_values: false,
        }
    }

    /// First headered dialect, with Kotlin-style nullability suffixes.
    pub fn v2() -> Self {
        Self {
            major: 2,
            nullability: NullabilityStyle::Suffix,
            ..Self::v1()
        }
    }

    /// v2 plus Kotlin name/type rendering order.
    pub fn v3() -> Self {
        Self {
            major: 3,
            kotlin_name_type_order: true,
            ..Self::v2()
        }
    }

    /// v3 plus concise default values, signature-ordered overloads, and a
    /// fully sorted extends list.
    pub fn v4() -> Self {
        Self {
            major: 4,
            concise_default_values: true,
            overload_order: OverloadOrder::Signature,
            sort_whole_extends_list: true,
            ..Self::v3()
        }
    }

    pub fn latest() -> Self {
        Self::v4()
    }

    fn preset(major: u8) -> Option<Self> {
        match major {
            1 => Some(Self::v1()),
            2 => Some(Self::v2()),
            3 => Some(Self::v3()),
            4 => Some(Self::v4()),
            _ => None,
        }
    }

    // Flag overrides. Presets are starting points; both values of every flag
    // stay reachable under any headered major version.

    pub fn with_overload_order(mut self, order: OverloadOrder) -> Self {
        self.overload_order = order;
        self
    }

    pub fn with_sorted_extends_list(mut self, sort: bool) -> Self {
        self.sort_whole_extends_list = sort;
        self
    }

    pub fn with_type_use_annotations(mut self, include: bool) -> Self {
        self.include_type_use_annotations = include;
        self
    }

    pub fn with_concise_default_values(mut self, concise: bool) -> Self {
        self.concise_default_values = concise;
        self
    }

    /// The header comment line, without trailing newline. `None` for the
    /// legacy dialect, which is header-less by definition.
    pub fn header(&self) -> Option<String> {
        if self.major == 1 {
            None
        } else {
            Some(format!("// Signature format: {}.{}", self.major, self.minor))
        }
    }

    /// Recognize a format header line.
    ///
    /// Returns `None` if the line is not a header at all, `Some(Err)` if it
    /// is a header naming an unsupported version.
    pub fn parse_header(line: &str) -> Option<Result<Self, UnsupportedFormat>> {
        let rest = line.trim().strip_prefix("// Signature format:")?;
        let version = rest.trim();
        let unsupported = || UnsupportedFormat {
            version: version.to_string(),
        };
        let Some((major_s, minor_s)) = version.split_once('.') else {
            return Some(Err(unsupported()));
        };
        let (Ok(major), Ok(minor)) = (major_s.parse::<u8>(), minor_s.parse::<u8>()) else {
            return Some(Err(unsupported()));
        };
        Some(match Self::preset(major) {
            Some(mut format) => {
                format.minor = minor;
                Ok(format)
            }
            None => Err(unsupported()),
        })
    }

    /// Reject feature combinations no dialect defines.
    ///
    /// The parser can only produce validated formats; the renderer panics on
    /// an invalid one, since constructing it means a caller bypassed the
    /// presets and builders incorrectly.
    pub fn validate(&self) -> Result<(), String> {
        if self.kotlin_name_type_order && self.nullability == NullabilityStyle::Omitted {
            return Err("kotlin name/type order requires suffix nullability".into());
        }
        if self.major == 1 && self.concise_default_values {
            return Err("concise default values are not part of the legacy dialect".into());
        }
        if self.major == 1 && self.nullability == NullabilityStyle::Suffix {
            return Err("the legacy dialect carries no nullability markers".into());
        }
        Ok(())
    }
}

impl Default for FileFormat {
    fn default() -> Self {
        Self::v2()
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A header named a format version this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signature format version: {version}")]
pub struct UnsupportedFormat {
    pub version: String,
}
