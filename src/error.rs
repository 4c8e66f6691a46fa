//! Error types for cfstruct.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Every validation failure surfaces synchronously from the constructor that
//! detected it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cfstruct operations.
pub type Result<T> = std::result::Result<T, CfStructError>;

/// Errors that can occur while assembling CF datasets.
#[derive(Debug, Error)]
pub enum CfStructError {
    /// A required constructor argument was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// A variable id or dimension name is not a valid identifier.
    #[error("Invalid identifier: {value:?} ({reason})")]
    InvalidIdentifier { value: String, reason: String },

    /// A variable name is blank or otherwise unusable.
    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),

    /// The number of dimension labels does not match the array rank.
    #[error("Variable '{name}' has {ndim} axes but {ndims} dimension labels {dims:?}")]
    DimensionMismatch {
        name: String,
        ndim: usize,
        ndims: usize,
        dims: Vec<String>,
    },

    /// An attribute record failed validation.
    #[error("Invalid attribute `{attribute}`: {message}")]
    InvalidAttribute { attribute: String, message: String },

    /// A variable refers to a dimension the dataset does not declare.
    #[error("Variable '{variable}' uses undeclared dimension '{dimension}'")]
    UnknownDimension { variable: String, dimension: String },

    /// A variable axis length differs from the declared dimension size.
    #[error("Variable '{variable}' has length {actual} along '{dimension}', dataset declares {expected}")]
    ShapeMismatch {
        variable: String,
        dimension: String,
        expected: usize,
        actual: usize,
    },

    /// A redeclaration would resize a dimension that variables still use.
    #[error("Dimension '{dimension}' is used by '{variable}' and cannot change size from {size} to {requested}")]
    DimensionInUse {
        dimension: String,
        variable: String,
        size: usize,
        requested: usize,
    },

    /// A dimension, variable name or variable id is already taken.
    #[error("Duplicate {kind}: {name}")]
    Duplicate { kind: &'static str, name: String },

    /// No entry with the given name exists.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Unknown dataset data type or variable type.
    #[error("Invalid {kind} {value:?}, expected one of {expected:?}")]
    InvalidType {
        kind: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// Failed to parse a dataset template.
    #[error("Template error in {origin}: {source}")]
    Template {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to open a template file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CfStructError {
    /// Create an InvalidIdentifier error.
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidAttribute error.
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create a Duplicate error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
        }
    }

    /// Create a NotFound error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }
}
