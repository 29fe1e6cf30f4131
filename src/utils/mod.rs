//! Shared helpers: external commands, content types, path handling.

pub mod exec;
pub mod mime;
pub mod path;
