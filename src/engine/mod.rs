// src/engine/mod.rs
//! Table shaping: span expansion (`grid`) and header recovery (`headers`).
//! Pure functions over `types`; no I/O happens here.

pub mod grid;
pub mod headers;
pub mod types;

pub use grid::normalize;
pub use headers::{data_start, resolve, HeaderStrategy, Resolved};
pub use types::{Cell, CellKind, Grid, HeaderSet, RawRow, RawTable};
