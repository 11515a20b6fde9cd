//! Validation outcomes reported by every validator in the crate.

use std::fmt;

/// Category of a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The value was empty but the rule does not allow empty paths.
    EmptyPath,
    /// The value or the rule configuration contains characters that are illegal in paths.
    InvalidCharacters,
    /// The composed path contains more than one wildcard marker.
    AmbiguousWildcard,
    /// The composed path is absolute or climbs out of the resource roots with `..`.
    OutsideRoot,
    /// No matching file or folder exists under any resource root.
    NotFound,
    /// A numeric or vector value violates its constraint.
    OutOfRange,
    /// The rule cannot be applied to this kind of value.
    UnsupportedValue,
}

impl ValidationErrorKind {
    /// Stable snake_case identifier, used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPath => "empty_path",
            Self::InvalidCharacters => "invalid_characters",
            Self::AmbiguousWildcard => "ambiguous_wildcard",
            Self::OutsideRoot => "outside_root",
            Self::NotFound => "not_found",
            Self::OutOfRange => "out_of_range",
            Self::UnsupportedValue => "unsupported_value",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating a single value against a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value satisfies the rule.
    Valid,
    /// The rule chose not to inspect the value. Treated as valid.
    Skipped,
    /// The value violates the rule.
    Error {
        /// Failure category.
        kind: ValidationErrorKind,
        /// Human readable description.
        message: String,
    },
}

impl ValidationResult {
    /// Build an error result.
    pub fn error(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Returns `true` for [`ValidationResult::Valid`] and [`ValidationResult::Skipped`].
    pub fn is_valid(&self) -> bool {
        !self.is_error()
    }

    /// Returns `true` when the value violates the rule.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Failure category, if any.
    pub fn kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("ok"),
            Self::Skipped => f.write_str("skipped"),
            Self::Error { kind, message } => write!(f, "error ({kind}): {message}"),
        }
    }
}
