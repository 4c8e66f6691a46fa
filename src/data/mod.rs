//! In-memory dataset structure.
//!
//! This module holds variables, their dimension labels and the dataset
//! container that checks variables against declared dimensions.

mod dataset;
mod dims;
mod ident;
mod variable;

pub use dataset::{CfDataset, DataType};
pub use dims::{Dimension, Dims};
pub use ident::{abbreviate, check_identifier, is_identifier};
pub use variable::{Variable, VariableBuilder, VariableType};
