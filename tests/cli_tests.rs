//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn review_board() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("review-board"))
}

#[test]
fn test_cli_version() {
    let mut cmd = review_board();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("review-board"));
}

#[test]
fn test_cli_help() {
    let mut cmd = review_board();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Audit review workbooks"))
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_audit_requires_roots() {
    let cwd = TempDir::new().expect("tmp");
    let mut cmd = review_board();
    cmd.current_dir(cwd.path()).args(["audit", "--no-open"]);
    cmd.assert().failure().stderr(predicate::str::contains("No repository roots configured"));
}

#[test]
fn test_audit_rejects_explicit_bad_config() {
    let cwd = TempDir::new().expect("tmp");
    let config = cwd.path().join("bad.toml");
    std::fs::write(&config, "worker_count = 'lots'\n").expect("write config");

    let mut cmd = review_board();
    cmd.current_dir(cwd.path()).args([
        "audit",
        "-c",
        config.to_str().expect("utf8"),
        "https://svn/r",
    ]);
    cmd.assert().failure().stderr(predicate::str::contains("Invalid TOML config"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = review_board();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("review-board"));
}

#[cfg(unix)]
mod fake_svn {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use rust_xlsxwriter::Workbook;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Serves `list`, `cat` and `info` from a local directory tree. Info output
    /// comes from `<file>.info` sidecar files.
    const FAKE_SVN: &str = r#"#!/bin/sh
cmd="$1"
path=$(printf '%s' "${2#file://}" | sed 's/%20/ /g')
case "$cmd" in
  list)
    [ -d "$path" ] || { echo "svn: E200009: '$2' not found" >&2; exit 1; }
    for entry in "$path"/*; do
      [ -e "$entry" ] || continue
      name=$(basename "$entry")
      if [ -d "$entry" ]; then echo "$name/"; else echo "$name"; fi
    done
    ;;
  cat)
    [ -f "$path" ] || { echo "svn: E200009: '$2' not found" >&2; exit 1; }
    cat "$path"
    ;;
  info)
    [ -f "$path.info" ] || { echo "svn: E200009: '$2' not found" >&2; exit 1; }
    cat "$path.info"
    ;;
  *)
    exit 1
    ;;
esac
"#;

    fn install_fake_svn(dir: &Path) -> PathBuf {
        let script = dir.join("fake-svn");
        fs::write(&script, FAKE_SVN).expect("write script");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        script
    }

    fn write_review(path: &Path, score: f64, version: &str, changed: &str) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("DR-SW").expect("name");
        sheet.write_number(1, 9, score).expect("score");
        sheet.write_string(6, 10, version).expect("version");
        workbook.save(path).expect("save");

        let info = format!(
            "Path: {name}\nRevision: 120\nNode Kind: file\nLast Changed Rev: 118\nLast Changed Date: {changed} 10:00:00 +0100 (Fri, 01 Mar 2024)\n",
            name = path.file_name().and_then(|n| n.to_str()).expect("name"),
        );
        fs::write(format!("{}.info", path.display()), info).expect("info");
    }

    fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
        range.get_value((row, col)).map(|v| v.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_audit_end_to_end_against_fake_svn() {
        let tmp = TempDir::new().expect("tmp");
        let repo = tmp.path().join("repo");
        let dspa = repo.join("01_ComController DSPA");
        let dspb = repo.join("02_ObcController DSPB");

        write_review(&dspa.join("Module A").join("old.xlsx"), 0.70, "V1.0", "2024-01-01");
        write_review(&dspb.join("new.xlsx"), 0.97, "V2.0", "2024-03-01");
        fs::write(dspb.join("broken.xlsx"), b"not a workbook").expect("broken");
        fs::write(dspb.join("notes.txt"), b"ignored").expect("notes");

        let svn = install_fake_svn(tmp.path());
        let out_dir = tmp.path().join("out");
        let report = out_dir.join("board.xlsx");
        let summary = out_dir.join("summary.json");

        let dspa_url = format!("file://{}", dspa.display());
        let dspb_url = format!("file://{}", dspb.display());

        let mut cmd = review_board();
        cmd.current_dir(tmp.path()).args([
            "audit",
            dspa_url.as_str(),
            dspb_url.as_str(),
            "--svn",
            svn.to_str().expect("utf8"),
            "-o",
            report.to_str().expect("utf8"),
            "-j",
            "2",
            "--no-open",
            "--no-timestamp",
            "--summary-json",
            summary.to_str().expect("utf8"),
        ]);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Audit complete!"))
            .stdout(predicate::str::contains("Documents found: 3"))
            .stdout(predicate::str::contains("Failed:          1"));

        let mut workbook: Xlsx<_> = open_workbook(&report).expect("open report");
        let detail = workbook.worksheet_range("Review Board").expect("detail");
        assert_eq!(cell(&detail, 1, 3), "new.xlsx");
        assert_eq!(cell(&detail, 1, 2), "2024-03-01");
        assert_eq!(cell(&detail, 1, 5), "ObcController DSPB");
        assert_eq!(cell(&detail, 1, 7), "97.00%");
        assert_eq!(cell(&detail, 2, 3), "old.xlsx");
        assert_eq!(cell(&detail, 2, 4), "Module A");
        assert_eq!(cell(&detail, 2, 5), "ComController DSPA");
        assert_eq!(cell(&detail, 2, 6), "118");
        assert_eq!(cell(&detail, 2, 7), "70.00%");

        let overview = workbook.worksheet_range("Overview").expect("overview");
        assert_eq!(cell(&overview, 1, 1), "1");
        assert_eq!(cell(&overview, 2, 1), "0");
        assert_eq!(cell(&overview, 3, 1), "1");
        assert_eq!(cell(&overview, 1, 2), "50.00%");
        assert_eq!(cell(&overview, 2, 2), "0.00%");
        assert_eq!(cell(&overview, 3, 2), "50.00%");
        assert_eq!(cell(&overview, 4, 0), "Unscored");
        assert_eq!(cell(&overview, 4, 2), "0.00%");
        assert_eq!(cell(&overview, 5, 1), "1");

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary).expect("summary")).expect("json");
        assert_eq!(parsed["totals"]["records"], serde_json::json!(2));
        assert_eq!(parsed["failures"][0]["stage"], serde_json::json!("extract"));
    }

    #[test]
    fn test_list_prints_documents() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("repo");
        write_review(&root.join("A").join("a.xlsx"), 0.9, "V1", "2024-01-01");
        write_review(&root.join("b.xlsx"), 0.9, "V1", "2024-01-01");
        let svn = install_fake_svn(tmp.path());

        let root_url = format!("file://{}", root.display());

        let mut cmd = review_board();
        cmd.current_dir(tmp.path()).args([
            "list",
            root_url.as_str(),
            "--svn",
            svn.to_str().expect("utf8"),
        ]);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("/A/a.xlsx"))
            .stdout(predicate::str::contains("/b.xlsx"))
            .stdout(predicate::str::contains(".info").not())
            .stderr(predicate::str::contains("Total: 2 documents"));
    }
}
