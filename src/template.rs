//! YAML dataset templates.
//!
//! A template fixes everything about a dataset except the data itself:
//! feature type, global attributes, declared dimensions and the metadata of
//! each variable, keyed by variable id.
//!
//! ```yaml
//! datatype: Grid
//! global_attributes:
//!   title: Sea ice concentration
//! dimensions:
//!   - { name: time, size: 1, unlimited: true }
//!   - { name: yc, size: 432 }
//!   - { name: xc, size: 432 }
//! variables:
//!   sic:
//!     name: sea_ice_concentration
//!     type: grid
//!     dims: [time, yc, xc]
//!     attributes:
//!       long_name: Sea ice concentration
//!       units: "%"
//!       grid_mapping: crs
//! ```

use crate::attributes::{AttrValue, GlobalAttributes, VariableAttributes};
use crate::data::{check_identifier, CfDataset, DataType, Dimension, Dims, Variable, VariableType};
use crate::error::{CfStructError, Result};
use ndarray::Array;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Declared dimension in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionTemplate {
    /// Dimension name.
    pub name: String,
    /// Length (current length for unlimited dimensions).
    pub size: usize,
    /// Unlimited (record) dimension.
    #[serde(default)]
    pub unlimited: bool,
}

impl From<&DimensionTemplate> for Dimension {
    fn from(t: &DimensionTemplate) -> Self {
        Dimension {
            name: t.name.clone(),
            size: t.size,
            unlimited: t.unlimited,
        }
    }
}

/// Metadata of one variable in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableTemplate {
    /// Variable name.
    pub name: String,
    /// Variable role.
    #[serde(rename = "type", default)]
    pub variable_type: VariableType,
    /// Dimension labels.
    pub dims: Dims,
    /// Attributes; a record derived from the name is used when empty.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
}

impl VariableTemplate {
    /// Parse and validate the attribute map.
    pub fn attribute_record(&self) -> Result<VariableAttributes> {
        let attrs = if self.attributes.is_empty() {
            VariableAttributes::for_variable(self.name.clone())
        } else {
            VariableAttributes::from_map(&self.attributes)?
        };
        attrs.validate_as(self.variable_type.profile())?;
        Ok(attrs)
    }
}

/// A parsed dataset template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetTemplate {
    /// Feature type.
    pub datatype: DataType,
    /// Global attributes.
    #[serde(default)]
    pub global_attributes: GlobalAttributes,
    /// Declared dimensions, in order.
    #[serde(default)]
    pub dimensions: Vec<DimensionTemplate>,
    /// Variable metadata keyed by variable id.
    #[serde(default)]
    pub variables: BTreeMap<String, VariableTemplate>,
}

impl DatasetTemplate {
    /// Read and validate a template file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CfStructError::file_open(path.to_path_buf(), e))?;
        let template = Self::parse(&text, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            variables = template.variables.len(),
            "Loaded template"
        );
        Ok(template)
    }

    /// Parse and validate a template from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(text, "<string>")
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let template: Self =
            serde_yaml::from_str(text).map_err(|source| CfStructError::Template {
                origin: origin.to_string(),
                source,
            })?;
        template.validate()?;
        Ok(template)
    }

    /// Check that dimensions and variable entries are consistent.
    pub fn validate(&self) -> Result<()> {
        for (i, dim) in self.dimensions.iter().enumerate() {
            check_identifier(&dim.name)?;
            if self.dimensions[..i].iter().any(|d| d.name == dim.name) {
                return Err(CfStructError::duplicate("dimension", dim.name.clone()));
            }
        }

        let mut names: BTreeMap<&str, &str> = BTreeMap::new();
        for (id, var) in &self.variables {
            check_identifier(id)?;
            if var.name.trim().is_empty() {
                return Err(CfStructError::InvalidName(var.name.clone()));
            }
            if let Some(other) = names.insert(var.name.as_str(), id.as_str()) {
                return Err(CfStructError::duplicate(
                    "variable",
                    format!("{} (ids '{}' and '{}')", var.name, other, id),
                ));
            }

            var.dims.validate()?;
            if let Some(dim) = var.dims.iter().find(|d| self.dimension(d).is_none()) {
                return Err(CfStructError::UnknownDimension {
                    variable: var.name.clone(),
                    dimension: dim.to_string(),
                });
            }
            var.attribute_record()?;
        }
        Ok(())
    }

    fn dimension(&self, name: &str) -> Option<&DimensionTemplate> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Create an empty dataset with the template's attributes and dimensions.
    pub fn build_dataset(&self) -> Result<CfDataset> {
        let mut dataset = CfDataset::new(self.datatype, self.global_attributes.clone());
        for dim in &self.dimensions {
            if dim.unlimited {
                dataset.add_unlimited_dimension(dim.name.clone(), dim.size)?;
            } else {
                dataset.add_dimension(dim.name.clone(), dim.size)?;
            }
        }
        Ok(dataset)
    }

    /// Build the variable `id` from its template entry and `value`.
    pub fn variable<D: ndarray::Dimension>(&self, id: &str, value: Array<f64, D>) -> Result<Variable> {
        let entry = self
            .variables
            .get(id)
            .ok_or_else(|| CfStructError::not_found("template variable", id))?;

        Variable::builder()
            .name(entry.name.clone())
            .var_id(id)
            .value(value)
            .dims(entry.dims.clone())
            .variable_type(entry.variable_type)
            .attributes(entry.attribute_record()?)
            .build()
    }

    /// Build the variable `id` and put it into `dataset`, replacing an
    /// earlier version.
    pub fn set_variable<D: ndarray::Dimension>(
        &self,
        dataset: &mut CfDataset,
        id: &str,
        value: Array<f64, D>,
    ) -> Result<()> {
        let variable = self.variable(id, value)?;
        dataset.add_variable_overwrite(variable)
    }
}
