// src/config/options.rs
use std::ffi::OsString;
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub select: TableSelector,
    pub export: ExportOptions,
}

/// Who we are, for the `User-Agent` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId {
    pub app: String,   // "name/version"
    pub email: String, // contact address, required by the API etiquette
}

impl Default for ClientId {
    fn default() -> Self {
        Self { app: s!(USER_AGENT_FALLBACK_APP), email: s!() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub api_url: String,
    pub page: String,
    pub client: ClientId,
    /// Read a saved API response / HTML file instead of fetching.
    pub from_file: Option<PathBuf>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_url: s!(API_URL),
            page: s!(),
            client: ClientId::default(),
            from_file: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSelector {
    /// A table matches if it has any of these classes. Empty = every table.
    pub classes: Vec<String>,
    /// 1-based, document order among matches.
    pub ordinal: usize,
    /// Skip `<sup class="reference">` and `display:none` text in cells.
    pub strip_references: bool,
}

impl Default for TableSelector {
    fn default() -> Self {
        Self {
            classes: DEFAULT_TABLE_CLASSES.iter().map(|c| s!(*c)).collect(),
            ordinal: DEFAULT_TABLE_ORDINAL,
            strip_references: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

/// Leading row-index column in the export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexColumn {
    None,
    ZeroBased,
    OneBased,
}

impl IndexColumn {
    pub fn start(&self) -> Option<usize> {
        match self {
            IndexColumn::None => None,
            IndexColumn::ZeroBased => Some(0),
            IndexColumn::OneBased => Some(1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub index: IndexColumn,
    /// Fold accented / typographic characters to ASCII.
    pub transliterate: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            index: IndexColumn::ZeroBased,
            transliterate: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the format decides the extension.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(&*stem, ".", self.format.ext()));
        path
    }

    pub fn set_out_dir(&mut self, dir: impl Into<PathBuf>) {
        self.out_path.dir = dir.into();
    }

    /// Base filename without extension. A typed `.csv`/`.tsv` is dropped;
    /// format controls it.
    pub fn set_file_stem(&mut self, stem: &str) {
        let stem = stem.trim();
        let lc = stem.to_ascii_lowercase();
        let stem = if lc.ends_with(".csv") || lc.ends_with(".tsv") { &stem[..stem.len() - 4] } else { stem };
        self.out_path.file_stem = OsString::from(crate::core::sanitize::sanitize_file_stem(stem, DEFAULT_FILE));
    }

    pub fn file_stem(&self) -> String {
        self.out_path.file_stem.to_string_lossy().into_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
