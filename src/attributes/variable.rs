//! Variable attribute records.
//!
//! A [`VariableAttributes`] record carries the CF/ACDD attributes of one
//! variable. Field-level rules are checked by [`VariableAttributes::validate`],
//! the cross-field rules of flag and grid variables by
//! [`VariableAttributes::validate_as`].

use super::AttrValue;
use crate::error::{CfStructError, Result};
use netcdf::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// ISO 19115-1 coverage content type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoverageContentType {
    /// Image data.
    Image,
    /// Classified (thematic) values.
    ThematicClassification,
    /// Measured physical quantity.
    PhysicalMeasurement,
    /// Auxiliary information.
    AuxiliaryInformation,
    /// Quality information (uncertainties, flags).
    QualityInformation,
    /// Reference information.
    ReferenceInformation,
    /// Model output.
    ModelResult,
    /// Coordinate values.
    Coordinate,
}

impl CoverageContentType {
    /// All valid codes in their attribute spelling.
    pub const NAMES: &'static [&'static str] = &[
        "image",
        "thematicClassification",
        "physicalMeasurement",
        "auxiliaryInformation",
        "qualityInformation",
        "referenceInformation",
        "modelResult",
        "coordinate",
    ];

    /// The attribute spelling of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            CoverageContentType::Image => "image",
            CoverageContentType::ThematicClassification => "thematicClassification",
            CoverageContentType::PhysicalMeasurement => "physicalMeasurement",
            CoverageContentType::AuxiliaryInformation => "auxiliaryInformation",
            CoverageContentType::QualityInformation => "qualityInformation",
            CoverageContentType::ReferenceInformation => "referenceInformation",
            CoverageContentType::ModelResult => "modelResult",
            CoverageContentType::Coordinate => "coordinate",
        }
    }
}

impl fmt::Display for CoverageContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageContentType {
    type Err = CfStructError;

    fn from_str(s: &str) -> Result<Self> {
        let code = match s {
            "image" => CoverageContentType::Image,
            "thematicClassification" => CoverageContentType::ThematicClassification,
            "physicalMeasurement" => CoverageContentType::PhysicalMeasurement,
            "auxiliaryInformation" => CoverageContentType::AuxiliaryInformation,
            "qualityInformation" => CoverageContentType::QualityInformation,
            "referenceInformation" => CoverageContentType::ReferenceInformation,
            "modelResult" => CoverageContentType::ModelResult,
            "coordinate" => CoverageContentType::Coordinate,
            other => {
                return Err(CfStructError::invalid_attribute(
                    "coverage_content_type",
                    format!("{:?} not in {:?}", other, Self::NAMES),
                ))
            }
        };
        Ok(code)
    }
}

/// Validation profile applied on top of the field-level rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeProfile {
    /// Field-level rules only.
    #[default]
    Standard,
    /// Requires `flag_values` and `flag_meanings` of equal length.
    Flag,
    /// Requires `grid_mapping`.
    Grid,
}

/// Names of the typed fields, in the order they are emitted.
const TYPED_FIELDS: &[&str] = &[
    "long_name",
    "standard_name",
    "units",
    "comment",
    "ancillary_variables",
    "coverage_content_type",
    "flag_values",
    "flag_meanings",
    "valid_min",
    "valid_max",
    "grid_mapping",
];

/// CF attributes of a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAttributes {
    /// Descriptive name (required).
    pub long_name: String,
    /// CF standard name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_name: Option<String>,
    /// Physical units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Free text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Space separated ids of ancillary variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancillary_variables: Option<String>,
    /// ISO 19115-1 content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_content_type: Option<CoverageContentType>,
    /// Flag values, one per word in `flag_meanings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_values: Option<Vec<f64>>,
    /// Space separated flag meanings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_meanings: Option<String>,
    /// Smallest valid value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_min: Option<f64>,
    /// Largest valid value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_max: Option<f64>,
    /// Id of the grid mapping variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_mapping: Option<String>,
    /// Any further attributes (`_FillValue`, `axis`, ...).
    #[serde(flatten)]
    pub other: BTreeMap<String, AttrValue>,
}

impl VariableAttributes {
    /// Create a record with only `long_name` set.
    pub fn new(long_name: impl Into<String>) -> Result<Self> {
        let attrs = Self::for_variable(long_name);
        attrs.validate()?;
        Ok(attrs)
    }

    /// The minimal record used when a variable is created without attributes.
    pub fn for_variable(name: impl Into<String>) -> Self {
        Self {
            long_name: name.into(),
            standard_name: None,
            units: None,
            comment: None,
            ancillary_variables: None,
            coverage_content_type: None,
            flag_values: None,
            flag_meanings: None,
            valid_min: None,
            valid_max: None,
            grid_mapping: None,
            other: BTreeMap::new(),
        }
    }

    /// Build a record from a loosely typed attribute map.
    ///
    /// Keys that are not typed fields end up in [`VariableAttributes::other`].
    pub fn from_map(map: &BTreeMap<String, AttrValue>) -> Result<Self> {
        let long_name = match map.get("long_name") {
            Some(v) => expect_str("long_name", v)?,
            None => {
                return Err(CfStructError::invalid_attribute(
                    "long_name",
                    "required attribute is missing",
                ))
            }
        };

        let mut attrs = Self::for_variable(long_name);
        for (key, value) in map {
            match key.as_str() {
                "long_name" => {}
                "standard_name" => attrs.standard_name = Some(expect_str(key, value)?),
                "units" => attrs.units = Some(expect_str(key, value)?),
                "comment" => attrs.comment = Some(expect_str(key, value)?),
                "ancillary_variables" => {
                    attrs.ancillary_variables = Some(expect_str(key, value)?)
                }
                "coverage_content_type" => {
                    attrs.coverage_content_type = Some(expect_str(key, value)?.parse()?)
                }
                "flag_meanings" => attrs.flag_meanings = Some(expect_str(key, value)?),
                "flag_values" => {
                    attrs.flag_values = Some(value.to_f64_vec().ok_or_else(|| {
                        wrong_kind(key, "numeric list", value)
                    })?)
                }
                "valid_min" => attrs.valid_min = Some(expect_f64(key, value)?),
                "valid_max" => attrs.valid_max = Some(expect_f64(key, value)?),
                "grid_mapping" => attrs.grid_mapping = Some(expect_str(key, value)?),
                _ => {
                    attrs.other.insert(key.clone(), value.clone());
                }
            }
        }

        attrs.validate()?;
        Ok(attrs)
    }

    /// Set the units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Set the CF standard name.
    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.standard_name = Some(standard_name.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the coverage content type.
    pub fn with_coverage_content_type(mut self, code: CoverageContentType) -> Self {
        self.coverage_content_type = Some(code);
        self
    }

    /// Set flag values and meanings.
    pub fn with_flags(mut self, values: Vec<f64>, meanings: impl Into<String>) -> Self {
        self.flag_values = Some(values);
        self.flag_meanings = Some(meanings.into());
        self
    }

    /// Set the valid range.
    pub fn with_valid_range(mut self, min: f64, max: f64) -> Self {
        self.valid_min = Some(min);
        self.valid_max = Some(max);
        self
    }

    /// Set the grid mapping variable id.
    pub fn with_grid_mapping(mut self, grid_mapping: impl Into<String>) -> Self {
        self.grid_mapping = Some(grid_mapping.into());
        self
    }

    /// Add a free-form attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.other.insert(name.into(), value.into());
        self
    }

    /// Check the field-level rules.
    pub fn validate(&self) -> Result<()> {
        if self.long_name.trim().is_empty() {
            return Err(CfStructError::invalid_attribute(
                "long_name",
                "must not be blank",
            ));
        }

        if let (Some(min), Some(max)) = (self.valid_min, self.valid_max) {
            if min > max {
                return Err(CfStructError::invalid_attribute(
                    "valid_min",
                    format!("valid_min={} exceeds valid_max={}", min, max),
                ));
            }
        }

        if let Some(key) = self.other.keys().find(|k| TYPED_FIELDS.contains(&k.as_str())) {
            return Err(CfStructError::invalid_attribute(
                key.clone(),
                "typed attribute must not be set as a free-form attribute",
            ));
        }

        Ok(())
    }

    /// Check the field-level rules plus the rules of `profile`.
    pub fn validate_as(&self, profile: AttributeProfile) -> Result<()> {
        self.validate()?;

        match profile {
            AttributeProfile::Standard => Ok(()),
            AttributeProfile::Flag => self.check_flags(),
            AttributeProfile::Grid => match self.grid_mapping.as_deref() {
                Some(gm) if !gm.trim().is_empty() => Ok(()),
                _ => Err(CfStructError::invalid_attribute(
                    "grid_mapping",
                    "grid variables require attribute `grid_mapping`",
                )),
            },
        }
    }

    fn check_flags(&self) -> Result<()> {
        let values = self.flag_values.as_ref().ok_or_else(|| {
            CfStructError::invalid_attribute(
                "flag_values",
                "flag variables require attribute `flag_values`",
            )
        })?;
        let meanings = self.flag_meanings.as_ref().ok_or_else(|| {
            CfStructError::invalid_attribute(
                "flag_meanings",
                "flag variables require attribute `flag_meanings`",
            )
        })?;

        let n_meanings = meanings.split_whitespace().count();
        if values.len() != n_meanings {
            return Err(CfStructError::invalid_attribute(
                "flag_values",
                format!(
                    "{} flag values {:?} do not match {} flag meanings {:?}",
                    values.len(),
                    values,
                    n_meanings,
                    meanings
                ),
            ));
        }
        Ok(())
    }

    /// All set attributes in netCDF form, typed fields first.
    pub fn to_netcdf(&self) -> Vec<(String, AttributeValue)> {
        let mut out = vec![(
            "long_name".to_string(),
            AttributeValue::Str(self.long_name.clone()),
        )];

        let mut push_str = |name: &str, value: &Option<String>| {
            if let Some(v) = value {
                out.push((name.to_string(), AttributeValue::Str(v.clone())));
            }
        };
        push_str("standard_name", &self.standard_name);
        push_str("units", &self.units);
        push_str("comment", &self.comment);
        push_str("ancillary_variables", &self.ancillary_variables);

        if let Some(code) = self.coverage_content_type {
            out.push((
                "coverage_content_type".to_string(),
                AttributeValue::Str(code.as_str().to_string()),
            ));
        }
        if let Some(values) = &self.flag_values {
            out.push(("flag_values".to_string(), AttributeValue::Doubles(values.clone())));
        }
        if let Some(meanings) = &self.flag_meanings {
            out.push(("flag_meanings".to_string(), AttributeValue::Str(meanings.clone())));
        }
        if let Some(v) = self.valid_min {
            out.push(("valid_min".to_string(), AttributeValue::Double(v)));
        }
        if let Some(v) = self.valid_max {
            out.push(("valid_max".to_string(), AttributeValue::Double(v)));
        }
        if let Some(gm) = &self.grid_mapping {
            out.push(("grid_mapping".to_string(), AttributeValue::Str(gm.clone())));
        }

        out.extend(
            self.other
                .iter()
                .map(|(name, value)| (name.clone(), AttributeValue::from(value))),
        );
        out
    }
}

fn wrong_kind(key: &str, expected: &str, value: &AttrValue) -> CfStructError {
    CfStructError::invalid_attribute(
        key,
        format!("expected {}, got {} ({})", expected, value.kind(), value),
    )
}

fn expect_str(key: &str, value: &AttrValue) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_kind(key, "string", value))
}

fn expect_f64(key: &str, value: &AttrValue) -> Result<f64> {
    value.as_f64().ok_or_else(|| wrong_kind(key, "number", value))
}

macro_rules! profiled_attributes {
    ($(#[$meta:meta])* $name:ident, $profile:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(VariableAttributes);

        impl $name {
            /// Unwrap the validated record.
            pub fn into_inner(self) -> VariableAttributes {
                self.0
            }
        }

        impl TryFrom<VariableAttributes> for $name {
            type Error = CfStructError;

            fn try_from(attrs: VariableAttributes) -> Result<Self> {
                attrs.validate_as($profile)?;
                Ok(Self(attrs))
            }
        }

        impl Deref for $name {
            type Target = VariableAttributes;

            fn deref(&self) -> &VariableAttributes {
                &self.0
            }
        }

        impl From<$name> for VariableAttributes {
            fn from(attrs: $name) -> Self {
                attrs.0
            }
        }
    };
}

profiled_attributes!(
    /// Attributes of a flag variable: `flag_values` and `flag_meanings` are
    /// present and of equal length.
    FlagVariableAttributes,
    AttributeProfile::Flag
);

profiled_attributes!(
    /// Attributes of a gridded variable: `grid_mapping` is present.
    GridVariableAttributes,
    AttributeProfile::Grid
);
