// tests/export_files.rs
//
// Tables written to disk from a live tracker.

mod common;

use std::fs;

use common::*;
use scholar_watch::{
    config::{ExportFormat, ExportOptions},
    export::{authors_table, papers_table},
    file::resolve_out_path,
    notify::RecordingNotifier,
};

fn tracked(dir: &std::path::Path, clock: &TestClock) -> scholar_watch::Tracker {
    let client = FnClient::new(|url| {
        let list = if url.contains("user=u2") {
            papers(&[("On Computable Numbers", 40)])
        } else {
            papers(&[("Notes, with commentary", 7), ("A \"quoted\" title", 2)])
        };
        let name = if url.contains("user=u2") { "Alan Turing" } else { "Ada Lovelace" };
        let total = list.iter().map(|(_, c)| c).sum();
        Ok(profile_html(name, total, &list, false))
    });
    let t = tracker(dir, client, clock);
    t.add_author("https://scholar.google.com/citations?user=u1").unwrap();
    t.add_author("https://scholar.google.com/citations?user=u2").unwrap();
    t
}

#[test]
fn authors_csv_into_directory_hint() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let t = tracked(dir.path(), &clock);
    let opts = ExportOptions::default();

    let hint = format!("{}/exports/", dir.path().display());
    let path = resolve_out_path(&hint, "authors.csv").unwrap();
    let written = authors_table(&t.authors().unwrap(), t.now()).write(&path, &opts).unwrap();

    assert!(written.ends_with("exports/authors.csv"));
    let text = fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("User ID,Name,Affiliation,Citations,Change,"));
    assert!(lines[1].starts_with("u1,Ada Lovelace,Test University,9,,3,2,"));
    assert!(lines[2].starts_with("u2,Alan Turing,Test University,40,"));
}

#[test]
fn papers_tsv_without_headers_keeps_change_column() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let t = tracked(dir.path(), &clock);
    t.refresh_all(None, &RecordingNotifier::default()).unwrap();

    let opts = ExportOptions { format: ExportFormat::Tsv, include_headers: false, ..ExportOptions::default() };
    let path = dir.path().join("papers.tsv");
    papers_table(&t.author("u1").unwrap()).write(&path, &opts).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let rows: Vec<Vec<&str>> = text.lines().map(|l| l.split('\t').collect()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][..4], ["Notes, with commentary", "2020", "7", ""]);
    assert_eq!(rows[1][0], "\"A \"\"quoted\"\" title\"");
    assert_eq!(rows[1][4], "A Author");
    assert_eq!(rows[1][5], "Journal 1");
    assert!(rows[1][6].starts_with("https://scholar.google.com/citations?view_op=view_citation"));
}

#[test]
fn csv_quotes_commas_in_titles() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let t = tracked(dir.path(), &clock);

    let out = papers_table(&t.author("u1").unwrap()).render(&ExportOptions::default());
    assert!(out.contains("\"Notes, with commentary\",2020,7,"));
}
