//! cfstruct - CF/ACDD compliant dataset assembly.
//!
//! cfstruct provides validated metadata records and a small in-memory
//! structure for climate and ocean datasets that are later written to netCDF
//! by a separate writer.
//!
//! # Features
//!
//! - Variable attribute records with flag and grid variants
//! - Global attributes and an ACDD 1.3 completeness check
//! - Variables that check name, id, dimensions and shape on construction
//! - A dataset container that checks variables against declared dimensions
//! - YAML dataset templates
//!
//! # Example
//!
//! ```ignore
//! use cfstruct::{CfDataset, GlobalAttributes, Variable};
//! use ndarray::Array1;
//!
//! let mut dataset = CfDataset::grid(GlobalAttributes::new());
//! dataset.add_dimension("time", 10)?;
//!
//! let time = Variable::new("time", Array1::zeros(10), "time")?;
//! dataset.add_variable(time)?;
//! println!("{}", dataset.summary());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod attributes;
pub mod data;
pub mod error;
pub mod template;

pub use attributes::{
    AttrValue, AttributeProfile, CoverageContentType, FlagVariableAttributes, GlobalAttributes,
    GridVariableAttributes, VariableAttributes,
};
pub use data::{CfDataset, DataType, Dimension, Dims, Variable, VariableType};
pub use error::{CfStructError, Result};
pub use template::DatasetTemplate;
