//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use enum_as_inner::EnumAsInner;
use tracing::warn;
use yangir_util::path::PathError;

/// IR generation errors. Every variant carries the YANG path of the
/// offending entry (or the reference that failed to resolve) so batch
/// reports stay actionable.
#[derive(Clone, Debug, EnumAsInner, Eq, PartialEq)]
pub enum Error {
    // Schema violations.
    DuplicateSchemaPath(String),
    IdentityNameConflict(String),
    TypedefNameConflict(String, String),
    MultipleEnumsInUnion(String),
    EmptyUnion(String),
    MissingAstNode(String),
    MissingIdentityBase(String),
    InvalidNamespace(String),
    DuplicateField(String),
    ShadowTypeMismatch(String),
    // Resolution failures.
    UnresolvedLeafref(String, String),
    UnknownListKey(String, String),
    PathAboveRoot(String, String),
    MissingContextEntry(String),
    MissingListKey(String),
    // Type mapping.
    UnsupportedType(String, String),
    InvalidDefault(String, String),
    // Internal invariants: a name lookup before the two-pass resolution ran.
    MissingEnumName(String),
}

/// Coarse error classes, used to group batch reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    SchemaViolation,
    ResolutionFailure,
    TypeMappingUnsupported,
    InternalInvariant,
}

/// Aggregate of every error collected during one compiler run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Errors(pub Vec<Error>);

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        warn!(error = %self, "IR generation error");
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::DuplicateSchemaPath(..)
            | Error::IdentityNameConflict(..)
            | Error::TypedefNameConflict(..)
            | Error::MultipleEnumsInUnion(..)
            | Error::EmptyUnion(..)
            | Error::MissingAstNode(..)
            | Error::MissingIdentityBase(..)
            | Error::InvalidNamespace(..)
            | Error::DuplicateField(..)
            | Error::ShadowTypeMismatch(..) => ErrorCategory::SchemaViolation,
            Error::UnresolvedLeafref(..)
            | Error::UnknownListKey(..)
            | Error::PathAboveRoot(..)
            | Error::MissingContextEntry(..)
            | Error::MissingListKey(..) => ErrorCategory::ResolutionFailure,
            Error::UnsupportedType(..) | Error::InvalidDefault(..) => {
                ErrorCategory::TypeMappingUnsupported
            }
            Error::MissingEnumName(..) => ErrorCategory::InternalInvariant,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateSchemaPath(path) => {
                write!(f, "{path}: duplicate path in schema tree")
            }
            Error::IdentityNameConflict(name) => {
                write!(f, "identity name conflict for \"{name}\"")
            }
            Error::TypedefNameConflict(key, name) => {
                write!(
                    f,
                    "enumerated typedef name conflict: {key} proposes \
                     existing name \"{name}\""
                )
            }
            Error::MultipleEnumsInUnion(path) => {
                write!(
                    f,
                    "{path}: union typedef contains more than one enumeration"
                )
            }
            Error::EmptyUnion(path) => {
                write!(f, "{path}: union with no member types")
            }
            Error::MissingAstNode(path) => {
                write!(f, "{path}: enumeration entry has no AST node")
            }
            Error::MissingIdentityBase(path) => {
                write!(f, "{path}: identityref without a resolved base")
            }
            Error::InvalidNamespace(segment) => {
                write!(f, "invalid namespace specifier in \"{segment}\"")
            }
            Error::DuplicateField(path) => {
                write!(f, "{path}: duplicate field after compression")
            }
            Error::ShadowTypeMismatch(path) => {
                write!(
                    f,
                    "{path}: config and state twins have incompatible types"
                )
            }
            Error::UnresolvedLeafref(path, target) => {
                write!(f, "{path}: cannot resolve leafref \"{target}\"")
            }
            Error::UnknownListKey(path, key) => {
                write!(f, "{path}: list key \"{key}\" is not a child leaf")
            }
            Error::PathAboveRoot(path, caller) => {
                write!(
                    f,
                    "relative path \"{path}\" recurses above the root of \
                     \"{caller}\""
                )
            }
            Error::MissingContextEntry(path) => {
                write!(f, "no context entry for \"{path}\"")
            }
            Error::MissingListKey(path) => {
                write!(f, "{path}: config list without a key statement")
            }
            Error::UnsupportedType(path, name) => {
                write!(f, "{path}: unsupported type \"{name}\"")
            }
            Error::InvalidDefault(path, value) => {
                write!(f, "{path}: default \"{value}\" does not match type")
            }
            Error::MissingEnumName(key) => {
                write!(f, "no name computed for enumeration \"{key}\"")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<PathError> for Error {
    fn from(error: PathError) -> Error {
        match error {
            PathError::InvalidNamespace(segment) => {
                Error::InvalidNamespace(segment)
            }
        }
    }
}

// ===== impl Errors =====

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    pub fn extend(&mut self, errors: Errors) {
        self.0.extend(errors.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Wraps the accumulated errors, if any.
    pub fn into_result<T>(self, value: T) -> Result<T, Errors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl From<Error> for Errors {
    fn from(error: Error) -> Errors {
        Errors(vec![error])
    }
}
