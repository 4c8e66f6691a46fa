//! Dimension labels of variables and declared dataset dimensions.

use super::ident::check_identifier;
use crate::error::{CfStructError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered dimension names of a variable.
///
/// A single string is taken as a one-element tuple, so `"time"` and
/// `["time"]` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DimsRepr", into = "Vec<String>")]
pub struct Dims(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum DimsRepr {
    One(String),
    Many(Vec<String>),
}

impl From<DimsRepr> for Dims {
    fn from(repr: DimsRepr) -> Self {
        match repr {
            DimsRepr::One(name) => Dims(vec![name]),
            DimsRepr::Many(names) => Dims(names),
        }
    }
}

impl From<Dims> for Vec<String> {
    fn from(dims: Dims) -> Self {
        dims.0
    }
}

impl Dims {
    /// Dimensions of a scalar.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no dimensions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over dimension names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of a dimension.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|d| d == name)
    }

    /// Whether the variable spans `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Dimension names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Check that all names are identifiers and none repeats.
    pub fn validate(&self) -> Result<()> {
        for (i, name) in self.0.iter().enumerate() {
            check_identifier(name)?;
            if self.0[..i].contains(name) {
                return Err(CfStructError::duplicate("dimension label", name.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl From<&str> for Dims {
    fn from(name: &str) -> Self {
        Dims(vec![name.to_string()])
    }
}

impl From<String> for Dims {
    fn from(name: String) -> Self {
        Dims(vec![name])
    }
}

impl From<&String> for Dims {
    fn from(name: &String) -> Self {
        Dims(vec![name.clone()])
    }
}

impl From<Vec<String>> for Dims {
    fn from(names: Vec<String>) -> Self {
        Dims(names)
    }
}

impl From<Vec<&str>> for Dims {
    fn from(names: Vec<&str>) -> Self {
        Dims(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Dims {
    fn from(names: &[&str]) -> Self {
        Dims(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for Dims {
    fn from(names: &[String]) -> Self {
        Dims(names.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Dims {
    fn from(names: [&str; N]) -> Self {
        Dims(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a Dims {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A dimension declared on a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Current length.
    pub size: usize,
    /// Unlimited (record) dimension.
    pub unlimited: bool,
}

impl Dimension {
    /// A fixed-size dimension.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            unlimited: false,
        }
    }

    /// An unlimited dimension with its current length.
    pub fn unlimited(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            unlimited: true,
        }
    }

    /// Whether a variable axis of length `len` fits this dimension.
    pub fn accepts(&self, len: usize) -> bool {
        self.unlimited || self.size == len
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unlimited {
            write!(f, "{} = {} (unlimited)", self.name, self.size)
        } else {
            write!(f, "{} = {}", self.name, self.size)
        }
    }
}
