//! Variable container.
//!
//! A [`Variable`] bundles an array with its dimension labels, a short id and
//! its attribute record. Every constructor validates the bundle, so a
//! `Variable` value is always consistent.

use super::dims::Dims;
use super::ident::{abbreviate, check_identifier};
use crate::attributes::{AttributeProfile, VariableAttributes};
use crate::error::{CfStructError, Result};
use ndarray::{Array, ArrayD};
use netcdf::AttributeValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a variable in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum VariableType {
    /// Regular data variable.
    #[default]
    Standard,
    /// Flag variable with `flag_values` and `flag_meanings`.
    Flag,
    /// Gridded variable with a `grid_mapping`.
    Grid,
    /// Uncertainty of another variable.
    Uncertainty,
}

impl VariableType {
    /// Accepted names.
    pub const NAMES: &'static [&'static str] = &["standard", "flag", "grid", "uncertainty"];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            VariableType::Standard => "standard",
            VariableType::Flag => "flag",
            VariableType::Grid => "grid",
            VariableType::Uncertainty => "uncertainty",
        }
    }

    /// Attribute rules that apply to this type.
    pub fn profile(self) -> AttributeProfile {
        match self {
            VariableType::Flag => AttributeProfile::Flag,
            VariableType::Grid => AttributeProfile::Grid,
            VariableType::Standard | VariableType::Uncertainty => AttributeProfile::Standard,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VariableType {
    type Err = CfStructError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(VariableType::Standard),
            "flag" => Ok(VariableType::Flag),
            "grid" => Ok(VariableType::Grid),
            "uncertainty" => Ok(VariableType::Uncertainty),
            _ => Err(CfStructError::InvalidType {
                kind: "variable type",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl TryFrom<String> for VariableType {
    type Error = CfStructError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A named array with dimension labels and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    id: String,
    value: ArrayD<f64>,
    dims: Dims,
    variable_type: VariableType,
    attributes: VariableAttributes,
}

impl Variable {
    /// Create a standard variable with default attributes and a derived id.
    pub fn new<D: ndarray::Dimension>(
        name: impl Into<String>,
        value: Array<f64, D>,
        dims: impl Into<Dims>,
    ) -> Result<Self> {
        Self::builder().name(name).value(value).dims(dims).build()
    }

    /// Start building a variable.
    pub fn builder() -> VariableBuilder {
        VariableBuilder::default()
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Data array.
    pub fn value(&self) -> &ArrayD<f64> {
        &self.value
    }

    /// Dimension labels.
    pub fn dims(&self) -> &Dims {
        &self.dims
    }

    /// Variable role.
    pub fn variable_type(&self) -> VariableType {
        self.variable_type
    }

    /// Attribute record.
    pub fn attributes(&self) -> &VariableAttributes {
        &self.attributes
    }

    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.value.ndim()
    }

    /// Dimension names paired with their lengths, in axis order.
    pub fn dim_sizes(&self) -> Vec<(&str, usize)> {
        self.dims.iter().zip(self.value.shape().iter().copied()).collect()
    }

    /// Length along the named dimension.
    pub fn dim_size(&self, dim: &str) -> Option<usize> {
        self.dims.position(dim).map(|axis| self.value.shape()[axis])
    }

    /// Replace the attribute record.
    pub fn set_attributes(&mut self, attributes: VariableAttributes) -> Result<()> {
        attributes.validate_as(self.variable_type.profile())?;
        self.attributes = attributes;
        Ok(())
    }

    /// Replace the data array. The rank must stay the same.
    pub fn set_value<D: ndarray::Dimension>(&mut self, value: Array<f64, D>) -> Result<()> {
        let value = value.into_dyn();
        check_rank(&self.name, &value, &self.dims)?;
        self.value = value;
        Ok(())
    }

    /// Attributes in netCDF form.
    pub fn netcdf_attributes(&self) -> Vec<(String, AttributeValue)> {
        self.attributes.to_netcdf()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self
            .dim_sizes()
            .iter()
            .map(|(d, n)| format!("{}={}", d, n))
            .collect();
        write!(
            f,
            "{} [{}] ({}) {}",
            self.id,
            self.variable_type,
            sizes.join(", "),
            self.name
        )
    }
}

/// Step-wise construction of a [`Variable`].
#[derive(Debug, Default, Clone)]
pub struct VariableBuilder {
    name: Option<String>,
    value: Option<ArrayD<f64>>,
    dims: Option<Dims>,
    var_id: Option<String>,
    variable_type: VariableType,
    attributes: Option<VariableAttributes>,
}

impl VariableBuilder {
    /// Variable name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Data array of any dimensionality (required).
    pub fn value<D: ndarray::Dimension>(mut self, value: Array<f64, D>) -> Self {
        self.value = Some(value.into_dyn());
        self
    }

    /// Dimension labels (required). A single string is one dimension.
    pub fn dims(mut self, dims: impl Into<Dims>) -> Self {
        self.dims = Some(dims.into());
        self
    }

    /// Explicit id instead of one derived from the name.
    pub fn var_id(mut self, var_id: impl Into<String>) -> Self {
        self.var_id = Some(var_id.into());
        self
    }

    /// Variable role, standard by default.
    pub fn variable_type(mut self, variable_type: VariableType) -> Self {
        self.variable_type = variable_type;
        self
    }

    /// Attribute record; defaults to one derived from the name.
    pub fn attributes(mut self, attributes: impl Into<VariableAttributes>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    /// Validate and build the variable.
    pub fn build(self) -> Result<Variable> {
        let name = self.name.ok_or(CfStructError::MissingArgument("name"))?;
        let value = self.value.ok_or(CfStructError::MissingArgument("value"))?;
        let dims = self.dims.ok_or(CfStructError::MissingArgument("dims"))?;

        if name.trim().is_empty() {
            return Err(CfStructError::InvalidName(name));
        }

        dims.validate()?;
        check_rank(&name, &value, &dims)?;

        let id = match self.var_id {
            Some(id) => check_identifier(&id)?.to_string(),
            None => abbreviate(&name)?,
        };

        let attributes = self
            .attributes
            .unwrap_or_else(|| VariableAttributes::for_variable(name.clone()));
        attributes.validate_as(self.variable_type.profile())?;

        tracing::debug!(
            name = %name,
            id = %id,
            dims = %dims,
            shape = ?value.shape(),
            "Created variable"
        );

        Ok(Variable {
            name,
            id,
            value,
            dims,
            variable_type: self.variable_type,
            attributes,
        })
    }
}

fn check_rank(name: &str, value: &ArrayD<f64>, dims: &Dims) -> Result<()> {
    if value.ndim() != dims.len() {
        return Err(CfStructError::DimensionMismatch {
            name: name.to_string(),
            ndim: value.ndim(),
            ndims: dims.len(),
            dims: dims.as_slice().to_vec(),
        });
    }
    Ok(())
}
