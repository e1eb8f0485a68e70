//! Read-only command specs: show, get, check

use crate::prelude::*;

#[test]
fn show_lists_each_line() {
    ConfFile::updatedb().cm("show", &[]).passes().stdout_eq(
        "   1  assignment  PRUNE_BIND_MOUNTS=\"yes\"
   2  comment     # PRUNENAMES=\".git .bzr .hg .svn\"
   3  assignment  PRUNEPATHS=\"/tmp /var/spool /media\"
   4  assignment  PRUNEFS=\"NFS nfs afs\"
",
    );
}

#[test]
fn show_json_tags_entries_by_kind() {
    let run = ConfFile::updatedb().cm("show", &["-o", "json"]).passes();
    let json = run.json();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["kind"], "assignment");
    assert_eq!(entries[1]["kind"], "comment");
    assert_eq!(json["final_newline"], true);
}

#[test]
fn get_prints_composed_value() {
    ConfFile::updatedb()
        .cm("get", &["PRUNEFS"])
        .passes()
        .stdout_eq("\"NFS nfs afs\"\n");
}

#[test]
fn get_uses_last_assignment() {
    ConfFile::with("A=1\nA=2\n")
        .cm("get", &["A"])
        .passes()
        .stdout_eq("2\n");
}

#[test]
fn get_json_lists_items() {
    let run = ConfFile::updatedb()
        .cm("get", &["PRUNEPATHS", "-o", "json"])
        .passes();
    let json = run.json();
    assert_eq!(json["key"], "PRUNEPATHS");
    assert_eq!(
        json["items"],
        serde_json::json!(["/tmp", "/var/spool", "/media"])
    );
}

#[test]
fn get_missing_key_exits_one() {
    ConfFile::updatedb()
        .cm("get", &["PRUNENAMES"])
        .fails()
        .code(1)
        .stderr_has("key 'PRUNENAMES' not found");
}

#[test]
fn check_reports_identical_round_trip() {
    ConfFile::updatedb()
        .cm("check", &[])
        .passes()
        .stdout_has("ok (4 entries, 4 lines, round trip identical)");
}

#[test]
fn check_reports_normalized_lines() {
    ConfFile::with("PRUNEFS='NFS  nfs'\n")
        .cm("check", &[])
        .passes()
        .stdout_has("ok (1 entries, 1 lines, 1 line normalized)");
}

#[test]
fn key_value_grammar_keeps_quoted_strings() {
    let run = ConfFile::with("NAME='a b'\n")
        .cm("get", &["NAME", "-o", "json"])
        .env("CM_GRAMMAR", "key-value")
        .passes();
    assert_eq!(run.json()["items"], serde_json::json!(["a b"]));
}
