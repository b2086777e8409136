//! Check implementations.
//!
//! The schema match compares column lists; the row checks walk one column.

mod schema;
mod values;

pub(crate) use schema::schema_match;
pub(crate) use values::{in_set, lower_bound, range};
