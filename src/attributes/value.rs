//! Loosely typed attribute values.

use netcdf::AttributeValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single attribute value as found in templates or extra attributes.
///
/// Integers that fit into 32 bits are handed to netCDF as `int`, larger ones
/// as `int64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Text value.
    Str(String),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar.
    Double(f64),
    /// List of text values.
    Strs(Vec<String>),
    /// List of integers.
    Ints(Vec<i64>),
    /// List of floating point values.
    Doubles(Vec<f64>),
}

impl AttrValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Str(_) => "string",
            AttrValue::Int(_) => "integer",
            AttrValue::Double(_) => "float",
            AttrValue::Strs(_) => "string list",
            AttrValue::Ints(_) => "integer list",
            AttrValue::Doubles(_) => "float list",
        }
    }

    /// Borrow the value as text, if it is a single string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a float scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a list of floats. Scalars become one-element lists.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            AttrValue::Int(v) => Some(vec![*v as f64]),
            AttrValue::Double(v) => Some(vec![*v]),
            AttrValue::Ints(v) => Some(v.iter().map(|&x| x as f64).collect()),
            AttrValue::Doubles(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(v) => write!(f, "{}", v),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Double(v) => write!(f, "{}", v),
            AttrValue::Strs(v) => write!(f, "{}", v.join(", ")),
            AttrValue::Ints(v) => write!(f, "{:?}", v),
            AttrValue::Doubles(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Double(v)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(v: Vec<f64>) -> Self {
        AttrValue::Doubles(v)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        AttrValue::Ints(v)
    }
}

impl From<&AttrValue> for AttributeValue {
    fn from(value: &AttrValue) -> Self {
        match value {
            AttrValue::Str(v) => AttributeValue::Str(v.clone()),
            AttrValue::Strs(v) => AttributeValue::Strs(v.clone()),
            AttrValue::Int(v) => match i32::try_from(*v) {
                Ok(small) => AttributeValue::Int(small),
                Err(_) => AttributeValue::Longlong(*v),
            },
            AttrValue::Ints(v) => {
                let small: Option<Vec<i32>> = v.iter().map(|&x| i32::try_from(x).ok()).collect();
                match small {
                    Some(small) => AttributeValue::Ints(small),
                    None => AttributeValue::Longlongs(v.clone()),
                }
            }
            AttrValue::Double(v) => AttributeValue::Double(*v),
            AttrValue::Doubles(v) => AttributeValue::Doubles(v.clone()),
        }
    }
}

impl From<AttrValue> for AttributeValue {
    fn from(value: AttrValue) -> Self {
        AttributeValue::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_scalars_pick_the_narrowest_kind() {
        let v: AttrValue = serde_yaml::from_str("5").unwrap();
        assert_eq!(v, AttrValue::Int(5));
        let v: AttrValue = serde_yaml::from_str("5.5").unwrap();
        assert_eq!(v, AttrValue::Double(5.5));
        let v: AttrValue = serde_yaml::from_str("[0, 1.5]").unwrap();
        assert_eq!(v, AttrValue::Doubles(vec![0.0, 1.5]));
        let v: AttrValue = serde_yaml::from_str("kelvin").unwrap();
        assert_eq!(v.as_str(), Some("kelvin"));
    }

    #[test]
    fn large_integers_become_int64() {
        let v = AttributeValue::from(AttrValue::Int(i64::from(i32::MAX) + 1));
        assert!(matches!(v, AttributeValue::Longlong(_)));
        let v = AttributeValue::from(AttrValue::Ints(vec![1, 2]));
        assert!(matches!(v, AttributeValue::Ints(ref xs) if xs == &vec![1, 2]));
    }
}
