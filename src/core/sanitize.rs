// src/core/sanitize.rs

use deunicode::deunicode;

/// Collapse whitespace runs (including NBSP) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Page titles go to the API with underscores instead of spaces.
pub fn page_title(s: &str) -> String {
    normalize_ws(s).replace(' ', "_")
}

/// Closest ASCII rendering of `s`: accents dropped, other scripts
/// romanized (`Москва` -> `Moskva`). Output is always ASCII.
pub fn transliterate(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }
    deunicode(s)
}

/// Output stem from user text: ASCII alphanumerics, `-`, `_` and `.` survive,
/// whitespace becomes a single `_`, everything else is dropped.
/// Falls back to `fallback` when nothing is left.
pub fn sanitize_file_stem(name: &str, fallback: &str) -> String {
    let name = transliterate(name);
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); last_us = false; }
        else if ch.is_whitespace() || ch == '_' { if !last_us { out.push('_'); last_us = true; } }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { fallback.to_string() } else { out }
}
