//! Tests for the download subcommand.

use super::parse;
use crate::cli::CliCommand;
use std::path::PathBuf;

#[test]
fn cli_parse_download_defaults() {
    match parse(&["dbxsum", "download", "/Backups/a.tar"]) {
        CliCommand::Download {
            remote_path,
            dest,
            rev,
            token,
        } => {
            assert_eq!(remote_path, "/Backups/a.tar");
            assert!(dest.is_none());
            assert!(rev.is_none());
            assert!(token.is_none());
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_options() {
    match parse(&[
        "dbxsum",
        "download",
        "/Backups/a.tar",
        "--dest",
        "/tmp/a.tar",
        "--rev",
        "015f",
        "--token",
        "sl.xyz",
    ]) {
        CliCommand::Download {
            remote_path,
            dest,
            rev,
            token,
        } => {
            assert_eq!(remote_path, "/Backups/a.tar");
            assert_eq!(dest, Some(PathBuf::from("/tmp/a.tar")));
            assert_eq!(rev.as_deref(), Some("015f"));
            assert_eq!(token.as_deref(), Some("sl.xyz"));
        }
        _ => panic!("expected Download"),
    }
}
