// tests/export_e2e.rs
//
// HTML in, file out: locate, normalize, resolve headers, export.
//
use std::fs;

use wiki_tables::config::{AppOptions, ExportFormat, ExportOptions, IndexColumn, TableSelector};
use wiki_tables::core::html::locate_table;
use wiki_tables::csv::{parse_rows, to_export_string, ExportTable};
use wiki_tables::engine::{normalize, Cell, HeaderSet, HeaderStrategy};
use wiki_tables::file::{ensure_directory, write_export};
use wiki_tables::progress::{NullProgress, Progress};
use wiki_tables::runner::{build_table, run};
use wiki_tables::{raw_row, Error, Malformed};

const SPAN_TABLE: &str = r#"<table><tr><th>A</th><th>B</th></tr><tr><td rowspan="2">x</td><td>1</td></tr><tr><td>2</td></tr></table>"#;

fn any_table() -> TableSelector {
    TableSelector { classes: vec![], ..TableSelector::default() }
}

#[test]
fn rowspan_table_end_to_end() {
    let raw = locate_table(SPAN_TABLE, &any_table()).unwrap();
    let (table, strategy) = build_table(&raw, false).unwrap();

    assert_eq!(strategy, HeaderStrategy::FirstRow);
    assert_eq!(table.headers(), ["A", "B"]);
    assert_eq!(table.rows(), [vec!["x", "1"], vec!["x", "2"]]);

    let out = to_export_string(&table, IndexColumn::None, b',').unwrap();
    assert_eq!(out, "A,B\nx,1\nx,2\n");
    let data = parse_rows(&out, b',').unwrap();
    assert_eq!(data.len(), 3);
    assert!(data[1..].iter().all(|r| r[0] == "x"));
}

#[test]
fn index_column_base_is_configurable() {
    let raw = locate_table(SPAN_TABLE, &any_table()).unwrap();
    let (table, _) = build_table(&raw, false).unwrap();

    let zero = to_export_string(&table, IndexColumn::ZeroBased, b',').unwrap();
    assert_eq!(zero, ",A,B\n0,x,1\n1,x,2\n");

    let one = to_export_string(&table, IndexColumn::OneBased, b',').unwrap();
    assert_eq!(one, ",A,B\n1,x,1\n2,x,2\n");
}

#[test]
fn tsv_uses_tabs() {
    let raw = locate_table(SPAN_TABLE, &any_table()).unwrap();
    let (table, _) = build_table(&raw, false).unwrap();
    let out = to_export_string(&table, IndexColumn::None, ExportFormat::Tsv.delim()).unwrap();
    assert_eq!(out, "A\tB\nx\t1\nx\t2\n");
}

#[test]
fn accents_are_folded_when_asked() {
    let html = "<table><tr><th>Café</th><th>Città</th></tr><tr><td>Zürich</td><td>São Paulo</td></tr></table>";
    let raw = locate_table(html, &any_table()).unwrap();

    let (ascii, _) = build_table(&raw, true).unwrap();
    assert_eq!(ascii.headers(), ["Cafe", "Citta"]);
    assert_eq!(ascii.rows(), [vec!["Zurich", "Sao Paulo"]]);

    let (kept, _) = build_table(&raw, false).unwrap();
    assert_eq!(kept.rows(), [vec!["Zürich", "São Paulo"]]);
}

#[test]
fn non_latin_scripts_fold_to_ascii() {
    let html = "<table><tr><th>Город</th><th>Name</th></tr>\
                <tr><td>Москва</td><td>東京 Ελλάδα</td></tr></table>";
    let raw = locate_table(html, &any_table()).unwrap();

    let (table, _) = build_table(&raw, true).unwrap();
    let out = to_export_string(&table, IndexColumn::None, b',').unwrap();
    assert!(out.is_ascii(), "{out:?}");
    assert_eq!(table.headers(), ["Gorod", "Name"]);
    assert_eq!(table.rows()[0][0], "Moskva");
}

#[test]
fn malformed_tables_fail_the_build() {
    let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr><tr><td>3</td></tr></table>";
    let raw = locate_table(html, &any_table()).unwrap();
    assert!(matches!(
        build_table(&raw, false),
        Err(Error::MalformedTable(Malformed::RaggedRow { row: 1, .. }))
    ));
}

#[test]
fn header_width_must_match_grid() {
    let grid = normalize(&[raw_row![Cell::data("a"), Cell::data("b")]]).unwrap();
    let err = ExportTable::new(&HeaderSet::Positional(3), grid).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { width: 2, .. }));
}

#[test]
fn csv_round_trip_keeps_cell_values() {
    let rows = vec![
        raw_row![Cell::data("plain"), Cell::data("with, comma")],
        raw_row![Cell::data("quote \"q\""), Cell::data("line\nbreak")],
    ];
    let grid = normalize(&rows).unwrap();
    let expected = grid.rows().to_vec();
    let table = ExportTable::new(&HeaderSet::Positional(2), grid).unwrap();

    let out = to_export_string(&table, IndexColumn::None, b',').unwrap();
    let back = parse_rows(&out, b',').unwrap();
    assert_eq!(back[0], vec!["0", "1"]);
    assert_eq!(back[1..].to_vec(), expected);
}

#[test]
fn export_creates_directory_and_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let mut export = ExportOptions::default();
    export.index = IndexColumn::None;
    export.set_out_dir(tmp.path().join("output_table").join("nested"));
    export.set_file_stem("wiki");

    let grid = normalize(&[raw_row![Cell::data("1"), Cell::data("2")]]).unwrap();
    let first = ExportTable::new(&HeaderSet::Positional(2), grid).unwrap();
    let path = write_export(&export, &first).unwrap();
    assert!(path.ends_with("output_table/nested/wiki.csv"));

    let grid = normalize(&[raw_row![Cell::data("3"), Cell::data("4")]]).unwrap();
    let second = ExportTable::new(&HeaderSet::Positional(2), grid).unwrap();
    let again = write_export(&export, &second).unwrap();
    assert_eq!(path, again);
    assert_eq!(fs::read_to_string(&path).unwrap(), "0,1\n3,4\n");
}

#[test]
fn file_in_place_of_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("output_table");
    fs::write(&blocker, "not a dir").unwrap();
    assert!(matches!(ensure_directory(&blocker), Err(Error::Io(_))));
}

#[derive(Default)]
struct Steps(Vec<String>, bool);

impl Progress for Steps {
    fn step_done(&mut self, step: &str) { self.0.push(step.to_string()); }
    fn finish(&mut self) { self.1 = true; }
}

#[test]
fn runner_reads_saved_envelope_and_writes_file() {
    let tmp = tempfile::tempdir().unwrap();
    let saved = tmp.path().join("page.json");
    let envelope = serde_json_envelope(&format!(
        "<div><table class=\"wikitable\"><tr><th>Year</th><th></th><th>Edits</th></tr>\
         <tr><td>2001</td><td>{}</td></tr><tr><td>2002</td><td>{}</td></tr></table></div>",
        "1 000", "2 000"
    ));
    fs::write(&saved, envelope).unwrap();

    let mut opts = AppOptions::default();
    opts.fetch.page = "Wikipedia:Statistics".into();
    opts.fetch.from_file = Some(saved);
    opts.export.set_out_dir(tmp.path().join("output_table"));
    opts.export.set_file_stem("Wikipedia_Statistics");
    opts.export.index = IndexColumn::OneBased;

    let mut steps = Steps::default();
    let summary = run(&opts, Some(&mut steps)).unwrap();

    assert_eq!((summary.rows, summary.columns), (2, 2));
    assert_eq!(summary.header_strategy, HeaderStrategy::FirstRow);
    assert!(summary.path.ends_with("Wikipedia_Statistics.csv"));
    assert_eq!(steps.0, vec!["fetch", "locate", "normalize", "export"]);
    assert!(steps.1);

    let text = fs::read_to_string(&summary.path).unwrap();
    assert_eq!(text, ",Year,Edits\n1,2001,1 000\n2,2002,2 000\n");
}

#[test]
fn runner_reports_missing_table() {
    let tmp = tempfile::tempdir().unwrap();
    let saved = tmp.path().join("page.html");
    fs::write(&saved, "<table class=\"wikitable\"><tr><th>A</th></tr></table>").unwrap();

    let mut opts = AppOptions::default();
    opts.fetch.from_file = Some(saved);
    opts.select.ordinal = 3;
    opts.export.set_out_dir(tmp.path());

    let mut steps = Steps::default();
    let err = run(&opts, Some(&mut steps)).unwrap_err();
    assert!(matches!(err, Error::NotFound { ordinal: 3, found: 1 }));
    assert_eq!(steps.0, vec!["fetch"]);
    assert!(steps.1, "finish runs on failure too");
}

#[test]
fn runner_accepts_a_silent_progress_sink() {
    let tmp = tempfile::tempdir().unwrap();
    let saved = tmp.path().join("page.html");
    fs::write(&saved, SPAN_TABLE).unwrap();

    let mut opts = AppOptions::default();
    opts.fetch.from_file = Some(saved);
    opts.select = any_table();
    opts.export.set_out_dir(tmp.path());
    opts.export.set_file_stem("spans");
    opts.export.index = IndexColumn::None;

    let mut sink = NullProgress;
    let summary = run(&opts, Some(&mut sink)).unwrap();
    assert_eq!(fs::read_to_string(&summary.path).unwrap(), "A,B\nx,1\nx,2\n");

    // No sink at all is fine too; the file is simply rewritten.
    let again = run(&opts, None).unwrap();
    assert_eq!(again.path, summary.path);
}

fn serde_json_envelope(html: &str) -> String {
    let escaped: String = html
        .chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            c => vec![c],
        })
        .collect();
    format!("{{\"parse\":{{\"title\":\"Wikipedia:Statistics\",\"text\":{{\"*\":\"{escaped}\"}}}}}}")
}
