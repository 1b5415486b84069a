// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::options::{AppOptions, ClientId, ExportFormat, IndexColumn};
use crate::config::consts::{DEFAULT_OUT_DIR, USER_AGENT_FALLBACK_APP};
use crate::error::Result;
use crate::progress::Progress;
use crate::runner;

/// Pull one table out of a Wikipedia page and save it as CSV,
/// with rowspan/colspan cells expanded.
#[derive(Debug, Parser)]
#[command(name = "wiki_tables", version, about)]
pub struct Args {
    /// Page title, e.g. "Wikipedia:Statistics" (spaces become underscores)
    pub page: String,

    /// Contact email sent in the User-Agent header (required by the API)
    #[arg(long)]
    pub email: String,

    /// Application name/version for the User-Agent header
    #[arg(long, default_value = USER_AGENT_FALLBACK_APP)]
    pub app: String,

    /// Which matching table to extract: 1 = first
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub table: u32,

    /// Table class to match (repeatable; any match counts)
    #[arg(long = "class", default_values_t = [String::from("wikitable")])]
    pub classes: Vec<String>,

    /// Output file name without extension (default: page title)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Output directory
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = IndexArg::Zero)]
    pub index: IndexArg,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Keep accented characters instead of folding to ASCII
    #[arg(long)]
    pub keep_unicode: bool,

    /// Drop footnote markers ([1]) and hidden sort keys from cells
    #[arg(long)]
    pub strip_refs: bool,

    /// List matching tables and exit
    #[arg(long)]
    pub list: bool,

    /// Read a saved API response or HTML file instead of fetching
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// MediaWiki API endpoint
    #[arg(long, default_value = crate::config::consts::API_URL)]
    pub api_url: String,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IndexArg {
    None,
    Zero,
    One,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        opts.fetch.page = self.page.clone();
        opts.fetch.api_url = self.api_url.clone();
        opts.fetch.client = ClientId { app: self.app.clone(), email: self.email.clone() };
        opts.fetch.from_file = self.from_file.clone();

        opts.select.ordinal = self.table as usize;
        opts.select.classes = self.classes.clone();
        opts.select.strip_references = self.strip_refs;

        opts.export.format = match self.format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        };
        opts.export.index = match self.index {
            IndexArg::None => IndexColumn::None,
            IndexArg::Zero => IndexColumn::ZeroBased,
            IndexArg::One => IndexColumn::OneBased,
        };
        opts.export.transliterate = !self.keep_unicode;
        opts.export.set_out_dir(&self.out_dir);
        opts.export.set_file_stem(self.out.as_deref().unwrap_or(&self.page));
        opts
    }
}

/// Step lines on stderr: `[2/4] locate`.
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn step_done(&mut self, step: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {}", self.done, self.total, step);
    }
}

pub fn run(args: Args) -> Result<()> {
    crate::log::init(args.verbose);
    let opts = args.to_options();

    if args.list {
        for t in runner::list_tables(&opts)? {
            println!(
                "{}\t{} rows x {} cols\t[{}]\t{}",
                t.ordinal,
                t.rows,
                t.width,
                t.classes.join(" "),
                t.caption.unwrap_or_default()
            );
        }
        return Ok(());
    }

    let mut progress = StderrProgress { total: 0, done: 0 };
    let summary = runner::run(&opts, Some(&mut progress))?;
    progress.log(&format!(
        "{} rows x {} columns (headers: {})",
        summary.rows,
        summary.columns,
        summary.header_strategy.name()
    ));
    println!("Saving to: {}", summary.path.display());
    Ok(())
}
