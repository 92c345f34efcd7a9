//! Purpose: Define the stable public Rust API boundary for dyndoc.
//! Exports: Document types, conversion traits, errors, and the codec entrypoints.
//! Role: Public, additive-only surface used by the CLI and the server.
//! Invariants: Callers reach documents and errors through this module.

pub use crate::core::convert::{DocumentType, JsonType, value_type_name};
pub use crate::core::document::Document;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::json::codec::{self, ParseFailureCategory};
