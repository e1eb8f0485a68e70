//! Editing specs: set, unset

use crate::prelude::*;

#[test]
fn set_replaces_list_in_place() {
    let conf = ConfFile::updatedb();
    conf.cm("set", &["PRUNEFS", "NFS", "nfs", "afs", "tmpfs"])
        .passes()
        .stdout_has("Set PRUNEFS in");
    similar_asserts::assert_eq!(
        conf.read(),
        UPDATEDB_CONF.replace("\"NFS nfs afs\"", "\"NFS nfs afs tmpfs\"")
    );
}

#[test]
fn set_single_value_keeps_list_shape() {
    let conf = ConfFile::updatedb();
    conf.cm("set", &["PRUNE_BIND_MOUNTS", "no"]).passes();
    assert!(conf.read().starts_with("PRUNE_BIND_MOUNTS=\"no\"\n"));
}

#[test]
fn set_dry_run_leaves_file_alone() {
    let conf = ConfFile::with("A=1 # one\n");
    conf.cm("set", &["A", "2", "--dry-run"])
        .passes()
        .stdout_eq("A=2 # one\n");
    assert_eq!(conf.read(), "A=1 # one\n");
}

#[test]
fn set_missing_key_exits_one() {
    let conf = ConfFile::with("A=1\n");
    conf.cm("set", &["B", "2"])
        .fails()
        .code(1)
        .stderr_has("key 'B' not found");
    assert_eq!(conf.read(), "A=1\n");
}

#[test]
fn set_insert_appends_key() {
    let conf = ConfFile::with("A=1\n");
    conf.cm("set", &["B", "x y", "--insert"]).passes();
    assert_eq!(conf.read(), "A=1\nB=\"x y\"\n");
}

#[test]
fn set_json_reports_action() {
    let conf = ConfFile::with("A=1\n");
    let run = conf.cm("set", &["A", "2", "-o", "json"]).passes();
    let json = run.json();
    assert_eq!(json["action"], "set");
    assert_eq!(json["key"], "A");
}

#[test]
fn unset_removes_the_line() {
    let conf = ConfFile::updatedb();
    conf.cm("unset", &["PRUNEPATHS"])
        .passes()
        .stdout_has("Unset PRUNEPATHS in");
    assert!(!conf.read().contains("PRUNEPATHS"));
    assert!(conf.read().contains("# PRUNENAMES"));
}

#[test]
fn unset_missing_key_exits_one() {
    ConfFile::with("A=1\n")
        .cm("unset", &["B"])
        .fails()
        .code(1);
}
