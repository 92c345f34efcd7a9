// Core modules implementing the document container, typed conversion, and error modeling.
pub mod convert;
pub mod document;
pub mod error;
pub(crate) mod number;
