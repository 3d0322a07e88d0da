//! Textual rendering of expression trees for diagnostics and logs.

pub mod core;
