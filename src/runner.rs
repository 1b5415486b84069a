// src/runner.rs
use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::{
    config::options::{AppOptions, FetchOptions},
    core::{html, net, html::TableSummary},
    csv::ExportTable,
    engine::{self, headers, HeaderStrategy},
    error::Result,
    file::write_export,
    progress::Progress,
};

const STEPS: [&str; 4] = ["fetch", "locate", "normalize", "export"];

/// Summary of what was produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub header_strategy: HeaderStrategy,
}

/// Fetch, locate, normalize, resolve headers, export.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &AppOptions, mut progress: Option<&mut (dyn Progress + '_)>) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(STEPS.len());
    }
    let res = run_steps(opts, progress.as_deref_mut());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    res
}

fn run_steps(opts: &AppOptions, mut progress: Option<&mut (dyn Progress + '_)>) -> Result<RunSummary> {
    let mut done = |step: &str| {
        if let Some(p) = progress.as_deref_mut() {
            p.step_done(step);
        }
    };

    let html = load_html(&opts.fetch)?;
    done(STEPS[0]);

    let raw = html::locate_table(&html, &opts.select)?;
    info!(
        "table #{} located: {} raw rows{}",
        opts.select.ordinal,
        raw.rows.len(),
        raw.caption.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
    );
    done(STEPS[1]);

    let (table, header_strategy) = build_table(&raw, opts.export.transliterate)?;
    done(STEPS[2]);

    let path = write_export(&opts.export, &table)?;
    done(STEPS[3]);

    Ok(RunSummary {
        path,
        rows: table.rows().len(),
        columns: table.headers().len(),
        header_strategy,
    })
}

/// Grid + headers for an already located table.
pub fn build_table(raw: &engine::RawTable, transliterate: bool) -> Result<(ExportTable, HeaderStrategy)> {
    let (header_rows, data_rows) = headers::split_rows(raw);
    debug!("{} header rows, {} data rows", header_rows.len(), data_rows.len());
    if data_rows.is_empty() {
        warn!("table has no data rows");
    }

    let grid = engine::normalize(data_rows)?;
    let resolved = engine::resolve(raw, &grid)?;
    let table = ExportTable::new(&resolved.headers, grid)?;
    let table = if transliterate { table.transliterated() } else { table };
    Ok((table, resolved.strategy))
}

/// Page HTML from the API, or from a saved file when one is configured.
pub fn load_html(fetch: &FetchOptions) -> Result<String> {
    match &fetch.from_file {
        Some(path) => {
            info!("reading saved page {}", path.display());
            net::html_from_saved(&fs::read_to_string(path)?)
        }
        None => net::fetch_page_html(fetch),
    }
}

/// Every table matching the class filter, for `--list`.
pub fn list_tables(opts: &AppOptions) -> Result<Vec<TableSummary>> {
    let html = load_html(&opts.fetch)?;
    Ok(html::list_tables(&html, &opts.select))
}
