// src/config/mod.rs
pub mod consts;
pub mod options;

pub use options::{AppOptions, ClientId, ExportFormat, ExportOptions, FetchOptions, IndexColumn, TableSelector};
