//! Validated CF and ACDD attribute records.
//!
//! This module defines the attribute schemas of a dataset: the variable
//! level record with its flag and grid variants, the global record, and the
//! ACDD 1.3 catalogue used to check global attributes for completeness.

pub mod acdd;
mod global;
mod value;
mod variable;

pub use acdd::{AcddLevel, AcddReport};
pub use global::{GlobalAttributes, DEFAULT_CONVENTIONS};
pub use value::AttrValue;
pub use variable::{
    AttributeProfile, CoverageContentType, FlagVariableAttributes, GridVariableAttributes,
    VariableAttributes,
};
