//! The relational row format.
//!
//! A [`RowMapper`] turns a record into a [`Row`] of named [`SqlValue`]s for
//! a write, and fills a record from a [`Row`] read back from a store. Column
//! names are the flattened names of the record's properties; generated
//! columns are left out of writes, see [`select`](crate::select).

// -----------------------------------------------------------------------------
// Modules

mod column;
mod mapper;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use column::{Column, ColumnReader, ColumnWriter};
pub use mapper::{RowMapper, decode, encode};
pub use value::{Row, SqlValue};
