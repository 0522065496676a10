//! SQL side of the schema: DDL rendering and column type mapping.

mod ddl;
pub mod types;

pub use ddl::{format_default, quote_ident, quote_literal, render_sql};
pub use types::{map_type, BaseType, MappedType, TypeFormat};
