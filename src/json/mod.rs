//! Purpose: JSON codec boundary shared by the document type, CLI and server.
//! Exports: `codec` module with parse/serialize helpers and failure categories.
//! Role: Single seam for serde_json usage so callsites avoid ad hoc decode logic.
//! Invariants: Document text decoding and encoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod codec;
