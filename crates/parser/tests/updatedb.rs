// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integration tests against real `updatedb.conf` content.

#![allow(clippy::unwrap_used, clippy::panic)]

use cm_parser::{
    compose_document, load_document, parse_document, platform_is_linux, read_text,
    save_document, Document, Entry, Grammar, SetOptions, Value, Word,
};
use similar_asserts::assert_eq;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture() -> (String, Document) {
    let text = read_text(&fixture("updatedb.conf")).unwrap();
    let doc = parse_document(&text).unwrap();
    (text, doc)
}

#[test]
fn fixture_round_trips_byte_for_byte() {
    let (text, doc) = load_fixture();
    assert_eq!(compose_document(&doc), text);
}

#[test]
fn fixture_values() {
    let (_, doc) = load_fixture();
    assert_eq!(
        doc.keys(),
        ["PRUNE_BIND_MOUNTS", "PRUNEPATHS", "PRUNEFS"]
    );
    assert_eq!(doc.get("PRUNE_BIND_MOUNTS").unwrap().items(), ["yes"]);

    let paths = doc.get("PRUNEPATHS").unwrap().items();
    assert_eq!(paths.first(), Some(&"/tmp"));
    assert!(paths.contains(&"/var/lib/os-prober"));

    let fs = doc.get("PRUNEFS").unwrap().as_list().unwrap();
    assert!(fs.contains("fuse.gvfsd-fuse"));
    assert_eq!(fs.iter().next().map(Word::as_str), Some("NFS"));

    // The commented-out setting stays a comment
    assert!(doc.find_assignment("PRUNENAMES").is_none());
    assert!(matches!(doc.entries[1], Entry::Comment(_)));
}

#[test]
fn fixture_edit_changes_one_line() {
    let (text, mut doc) = load_fixture();
    doc.find_assignment_mut("PRUNEPATHS")
        .and_then(|a| a.value.as_list_mut())
        .unwrap()
        .push(Word::new("/mnt").unwrap());
    doc.set_value_with(
        "PRUNENAMES",
        Value::list([".git", ".hg"]).unwrap(),
        SetOptions {
            insert_if_missing: true,
        },
    )
    .unwrap();

    let composed = compose_document(&doc);
    let before: Vec<&str> = text.lines().collect();
    let after: Vec<&str> = composed.lines().collect();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[2], format!("{} /mnt\"", before[2].trim_end_matches('"')));
    assert_eq!(after[3], before[3]);
    assert_eq!(after[4], "PRUNENAMES=\".git .hg\"");
}

#[test]
fn save_and_reload() {
    let (_, doc) = load_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("updatedb.conf");
    save_document(&path, &doc).unwrap();
    let reloaded = load_document(&path, Grammar::updatedb()).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn live_system_file_round_trips() {
    let path = Path::new("/etc/updatedb.conf");
    if !platform_is_linux() || !path.exists() {
        return;
    }
    // The live file may use single quotes or uneven blanks in word lists,
    // so only the recomposed text is required to be stable.
    let Ok(text) = read_text(path) else {
        return;
    };
    let doc = parse_document(&text).unwrap();
    let once = compose_document(&doc);
    let again = compose_document(&parse_document(&once).unwrap());
    assert_eq!(again, once);
}
