//! Purpose: Library crate behind the `dyndoc` CLI, HTTP endpoint and tests.
//! Exports: `api` (public surface), `core` (document, conversion, errors), `json` (codec).
//! Role: Ordered dynamic JSON documents with typed, checked accessors.
//! Invariants: Documents never store explicit nulls; writing null removes the key.
//! Invariants: Accessors return `Result` with typed error kinds; nothing panics on bad input.
pub mod api;
pub mod core;
pub mod json;
pub mod sample;
