//! CLI operation handlers.
//!
//! [`scan`] runs a scan for the resolved configuration; output formatting
//! lives in [`output`].

pub mod output;
pub mod scan;
