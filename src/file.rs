// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::config::options::ExportOptions;
use crate::csv::{write_table, ExportTable};
use crate::error::Result;

/// Write the table to `export.out_path()`, creating the directory if needed
/// and overwriting an existing file. Returns the path written to.
pub fn write_export(export: &ExportOptions, table: &ExportTable) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let file = File::create(&path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_table(&mut out, table, export.index, export.format.delim())?;
    out.flush()?;

    info!("wrote {} rows to {}", table.rows().len(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
