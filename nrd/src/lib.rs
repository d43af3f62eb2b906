//! Expose NRD's driver internals for use in integration tests. The rendering
//! API lives in `nrd_docbook`; prefer that crate in other code.
pub mod cli;
pub mod docbook;
pub mod error;
pub mod layout;
