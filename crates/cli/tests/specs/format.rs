//! Formatting specs: fmt

use crate::prelude::*;

#[test]
fn fmt_prints_normalized_file() {
    ConfFile::with("# lists\nPRUNEFS='NFS   nfs'\nA = 1\n")
        .cm("fmt", &[])
        .passes()
        .stdout_eq("# lists\nPRUNEFS=\"NFS nfs\"\nA = 1\n");
}

#[test]
fn fmt_write_rewrites_changed_file() {
    let conf = ConfFile::with("PRUNEFS='NFS nfs'\n");
    conf.cm("fmt", &["--write"])
        .passes()
        .stdout_has("Formatted");
    assert_eq!(conf.read(), "PRUNEFS=\"NFS nfs\"\n");
}

#[test]
fn fmt_write_reports_unchanged_file() {
    let conf = ConfFile::updatedb();
    conf.cm("fmt", &["--write"])
        .passes()
        .stdout_has("Unchanged");
    assert_eq!(conf.read(), UPDATEDB_CONF);
}

#[test]
fn fmt_keeps_missing_final_newline() {
    ConfFile::with("A=1")
        .cm("fmt", &[])
        .passes()
        .stdout_eq("A=1");
}
