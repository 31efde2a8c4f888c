//! Tests for the `xmlnav` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn xmlnav() -> Command {
    let mut cmd = Command::cargo_bin("xmlnav").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_count_groups() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["count", ".", "group"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_contents_by_path() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["contents", "group/subcycle/scheme"])
        .assert()
        .success()
        .stdout("GFS_time_vary_pre\n");
}

#[test]
fn test_attribute() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["attribute", ".", "version"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_missing_attribute_exits_with_one() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["attribute", ".", "missing"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("no attribute"));
}

#[test]
fn test_list_schemes() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["list", "group/subcycle", "scheme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GFS_rrtmg_setup"))
        .stdout(predicate::str::contains("GFS_rad_time_vary"));
}

#[test]
fn test_truncation_warning() {
    xmlnav()
        .arg(fixture("suite.xml"))
        .args(["--max-text-len", "3", "contents", "finalize"])
        .assert()
        .success()
        .stdout("GFS\n")
        .stderr(predicate::str::contains("truncated"));
}

#[test]
fn test_malformed_file_fails() {
    xmlnav()
        .arg(fixture("malformed.xml"))
        .args(["count", ".", "group"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parsing failed"));
}

#[test]
fn test_missing_file_fails() {
    xmlnav()
        .arg(fixture("nope.xml"))
        .args(["count", ".", "group"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
