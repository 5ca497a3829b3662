//! Shared helpers used by the RTF reader.

pub mod encoding;
