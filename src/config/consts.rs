// src/config/consts.rs

// Net config
pub const API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT_FALLBACK_APP: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Table selection
pub const DEFAULT_TABLE_CLASSES: &[&str] = &["wikitable"];
pub const DEFAULT_TABLE_ORDINAL: usize = 1;

// Export
pub const DEFAULT_OUT_DIR: &str = "output_table";
pub const DEFAULT_FILE: &str = "table";
