//! Dataset container.
//!
//! A [`CfDataset`] collects declared dimensions and variables under one set
//! of global attributes. Variables are checked against the declared
//! dimensions when they are added.

use super::dims::Dimension;
use super::ident::check_identifier;
use super::variable::Variable;
use crate::attributes::{acdd, AcddReport, GlobalAttributes};
use crate::error::{CfStructError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Feature type of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Gridded fields.
    Grid,
    /// Along-track data.
    Trajectory,
}

impl DataType {
    /// Accepted names.
    pub const NAMES: &'static [&'static str] = &["Grid", "Trajectory"];

    /// Name of the data type.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Grid => "Grid",
            DataType::Trajectory => "Trajectory",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = CfStructError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Grid" => Ok(DataType::Grid),
            "Trajectory" => Ok(DataType::Trajectory),
            _ => Err(CfStructError::InvalidType {
                kind: "data type",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Dimensions, variables and global attributes of one dataset.
#[derive(Debug, Clone)]
pub struct CfDataset {
    datatype: DataType,
    global_attributes: GlobalAttributes,
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,
    /// Variable id -> variable name.
    ids: HashMap<String, String>,
}

impl CfDataset {
    /// Create an empty dataset.
    pub fn new(datatype: DataType, global_attributes: GlobalAttributes) -> Self {
        Self {
            datatype,
            global_attributes,
            dimensions: Vec::new(),
            variables: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Create an empty gridded dataset.
    pub fn grid(global_attributes: GlobalAttributes) -> Self {
        Self::new(DataType::Grid, global_attributes)
    }

    /// Create an empty trajectory dataset.
    pub fn trajectory(global_attributes: GlobalAttributes) -> Self {
        Self::new(DataType::Trajectory, global_attributes)
    }

    /// Feature type.
    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    /// Global attributes.
    pub fn global_attributes(&self) -> &GlobalAttributes {
        &self.global_attributes
    }

    /// Mutable global attributes. They carry no cross-field rules.
    pub fn global_attributes_mut(&mut self) -> &mut GlobalAttributes {
        &mut self.global_attributes
    }

    /// Replace the global attributes.
    pub fn set_global_attributes(&mut self, global_attributes: GlobalAttributes) {
        self.global_attributes = global_attributes;
    }

    /// Declared dimensions in declaration order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Look up a declared dimension.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Look up a variable by id.
    pub fn variable_by_id(&self, id: &str) -> Option<&Variable> {
        self.ids.get(id).and_then(|name| self.variable(name))
    }

    /// The id -> name mapping.
    pub fn ids(&self) -> &HashMap<String, String> {
        &self.ids
    }

    /// Declare a fixed-size dimension.
    pub fn add_dimension(&mut self, name: impl Into<String>, size: usize) -> Result<()> {
        self.declare(Dimension::new(name, size), false)
    }

    /// Declare an unlimited dimension with its current length.
    pub fn add_unlimited_dimension(&mut self, name: impl Into<String>, size: usize) -> Result<()> {
        self.declare(Dimension::unlimited(name, size), false)
    }

    /// Declare or redeclare a dimension.
    ///
    /// A dimension used by variables can only be redeclared if all of them
    /// still fit and its size stays the same. Switching between fixed and
    /// unlimited is allowed at that size.
    pub fn add_dimension_overwrite(&mut self, dimension: Dimension) -> Result<()> {
        self.declare(dimension, true)
    }

    fn declare(&mut self, dimension: Dimension, overwrite: bool) -> Result<()> {
        check_identifier(&dimension.name)?;

        let Some(pos) = self.dimensions.iter().position(|d| d.name == dimension.name) else {
            tracing::debug!(dimension = %dimension, "Declared dimension");
            self.dimensions.push(dimension);
            return Ok(());
        };

        if !overwrite {
            return Err(CfStructError::duplicate("dimension", dimension.name));
        }

        let current = self.dimensions[pos].size;
        for var in &self.variables {
            if let Some(len) = var.dim_size(&dimension.name) {
                if !dimension.accepts(len) {
                    return Err(CfStructError::ShapeMismatch {
                        variable: var.name().to_string(),
                        dimension: dimension.name,
                        expected: dimension.size,
                        actual: len,
                    });
                }
                if dimension.size != current {
                    return Err(CfStructError::DimensionInUse {
                        dimension: dimension.name,
                        variable: var.name().to_string(),
                        size: current,
                        requested: dimension.size,
                    });
                }
            }
        }

        tracing::warn!(
            old = %self.dimensions[pos],
            new = %dimension,
            "Overwriting dimension"
        );
        self.dimensions[pos] = dimension;
        Ok(())
    }

    /// Add a variable. Its name and id must not be in use.
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        self.insert(variable, false)
    }

    /// Add a variable, replacing any variable with the same name or id.
    pub fn add_variable_overwrite(&mut self, variable: Variable) -> Result<()> {
        self.insert(variable, true)
    }

    fn insert(&mut self, variable: Variable, overwrite: bool) -> Result<()> {
        self.check_fits(&variable)?;

        let name_taken = self.variable(variable.name()).is_some();
        let id_owner = self.ids.get(variable.id()).cloned();

        if !overwrite {
            if name_taken {
                return Err(CfStructError::duplicate("variable", variable.name()));
            }
            if let Some(owner) = id_owner {
                return Err(CfStructError::duplicate(
                    "variable id",
                    format!("{} (used by '{}')", variable.id(), owner),
                ));
            }
        } else {
            if name_taken {
                tracing::warn!(name = variable.name(), "Overwriting variable");
                self.remove_variable(variable.name())?;
            }
            if let Some(owner) = id_owner.filter(|owner| owner != variable.name()) {
                tracing::warn!(id = variable.id(), replaced = %owner, "Overwriting variable id");
                self.remove_variable(&owner)?;
            }
        }

        for (dim, len) in variable.dim_sizes() {
            if let Some(d) = self.dimensions.iter_mut().find(|d| d.name == dim) {
                if d.unlimited && len > d.size {
                    d.size = len;
                }
            }
        }

        tracing::debug!(name = variable.name(), id = variable.id(), "Added variable");
        self.ids
            .insert(variable.id().to_string(), variable.name().to_string());
        self.variables.push(variable);
        Ok(())
    }

    fn check_fits(&self, variable: &Variable) -> Result<()> {
        for (dim, len) in variable.dim_sizes() {
            let declared = self
                .dimension(dim)
                .ok_or_else(|| CfStructError::UnknownDimension {
                    variable: variable.name().to_string(),
                    dimension: dim.to_string(),
                })?;
            if !declared.accepts(len) {
                return Err(CfStructError::ShapeMismatch {
                    variable: variable.name().to_string(),
                    dimension: dim.to_string(),
                    expected: declared.size,
                    actual: len,
                });
            }
        }
        Ok(())
    }

    /// Remove a variable by name.
    pub fn remove_variable(&mut self, name: &str) -> Result<Variable> {
        let pos = self
            .variables
            .iter()
            .position(|v| v.name() == name)
            .ok_or_else(|| CfStructError::not_found("variable", name))?;
        let variable = self.variables.remove(pos);
        self.ids.remove(variable.id());
        Ok(variable)
    }

    /// Re-check every invariant of the dataset.
    pub fn validate(&self) -> Result<()> {
        for (i, dim) in self.dimensions.iter().enumerate() {
            check_identifier(&dim.name)?;
            if self.dimensions[..i].iter().any(|d| d.name == dim.name) {
                return Err(CfStructError::duplicate("dimension", dim.name.clone()));
            }
        }

        let mut seen_ids: HashMap<&str, &str> = HashMap::new();
        for (i, var) in self.variables.iter().enumerate() {
            self.check_fits(var)?;
            if self.variables[..i].iter().any(|v| v.name() == var.name()) {
                return Err(CfStructError::duplicate("variable", var.name()));
            }
            if let Some(owner) = seen_ids.insert(var.id(), var.name()) {
                return Err(CfStructError::duplicate(
                    "variable id",
                    format!("{} (used by '{}')", var.id(), owner),
                ));
            }
            var.attributes()
                .validate_as(var.variable_type().profile())?;
        }
        Ok(())
    }

    /// Check the global attributes against ACDD 1.3.
    pub fn acdd_report(&self) -> AcddReport {
        acdd::check(&self.global_attributes)
    }

    /// Tree view of the dataset structure.
    pub fn summary(&self) -> String {
        let mut text = format!("{} dataset\n", self.datatype);
        text.push_str(&"=".repeat(40));
        text.push('\n');

        if let Some(title) = &self.global_attributes.title {
            text.push_str(&format!("title: {}\n", title));
        }

        text.push_str("dimensions\n");
        text.push_str(&tree_lines(self.dimensions.iter().map(|d| d.to_string())));
        text.push_str("variables\n");
        text.push_str(&tree_lines(self.variables.iter().map(|v| v.to_string())));
        text
    }
}

fn tree_lines(items: impl ExactSizeIterator<Item = String>) -> String {
    let n = items.len();
    if n == 0 {
        return "└── (none)\n".to_string();
    }

    let mut result = String::new();
    for (i, item) in items.enumerate() {
        let connector = if i == n - 1 { "└── " } else { "├── " };
        result.push_str(connector);
        result.push_str(&item);
        result.push('\n');
    }
    result
}
