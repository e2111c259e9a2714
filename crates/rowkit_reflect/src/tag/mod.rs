//! The field annotation mini-language.
//!
//! An annotation reads `name[,flag][,key=value]...`:
//!
//! - the first segment is the external name; when empty it is derived from
//!   the Rust field name through a [`NameFormat`];
//! - the following segments are options, either bare flags (empty value) or
//!   `key=value` pairs split on the first `=`;
//! - the name `-` excludes the field.
//!
//! Parsing never fails; malformed segments degrade to empty values.

// -----------------------------------------------------------------------------
// Modules

mod name_format;
mod struct_tag;

// -----------------------------------------------------------------------------
// Exports

pub use name_format::NameFormat;
pub use struct_tag::{EXCLUDED, StructTag, parse_tag};
