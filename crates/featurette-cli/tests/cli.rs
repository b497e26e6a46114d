//! Smoke tests for the `featurette` binary.

use std::path::{Path, PathBuf};
use std::str;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const OUTLINE: &str = "\
Feature: Mountains

  Scenario: warm up
    Given boots

  Scenario Outline: climb
    Given I am a <mountain>

    Examples:
      | mountain |
      | etna     |
      | fuji     |
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, text).unwrap_or_else(|err| panic!("write {name}: {err}"));
        path
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}")),
    }
}

fn featurette() -> Command {
    let mut cmd =
        Command::cargo_bin("featurette").unwrap_or_else(|err| panic!("binary exists: {err}"));
    cmd.env_remove("FEATURETTE_LOG_LEVEL")
        .env_remove("FEATURETTE_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> (Option<i32>, String, String) {
    let output = cmd.output().unwrap_or_else(|err| panic!("runs: {err}"));
    let stdout = str::from_utf8(&output.stdout)
        .unwrap_or_else(|err| panic!("stdout is UTF-8: {err}"))
        .to_owned();
    let stderr = str::from_utf8(&output.stderr)
        .unwrap_or_else(|err| panic!("stderr is UTF-8: {err}"))
        .to_owned();
    (output.status.code(), stdout, stderr)
}

fn parse(path: &Path) -> Command {
    let mut cmd = featurette();
    cmd.arg("parse").arg(path);
    cmd
}

#[rstest]
fn parse_prints_summary_by_default(workspace: Workspace) {
    let path = workspace.write("mountains.feature", OUTLINE);
    let (code, stdout, _) = run(&mut parse(&path));
    assert_eq!(code, Some(0));
    assert_eq!(
        stdout,
        "Feature: Mountains (2 scenarios)\n  Scenario: warm up (1 steps)\n  Scenario Outline: climb (1 steps, 2 examples)\n"
    );
}

#[rstest]
#[case::flag(&["--format", "json"], None)]
#[case::environment(&[], Some("json"))]
#[case::flag_beats_environment(&["--format", "pretty-json"], Some("summary"))]
fn parse_emits_json(
    workspace: Workspace,
    #[case] flags: &[&str],
    #[case] env_format: Option<&str>,
) {
    let path = workspace.write("mountains.feature", OUTLINE);
    let mut cmd = parse(&path);
    cmd.args(flags);
    if let Some(format) = env_format {
        cmd.env("FEATURETTE_FORMAT", format);
    }
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, Some(0));
    let value: serde_json::Value =
        serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("JSON output: {err}\n{stdout}"));
    assert_eq!(
        value.pointer("/scenarios/1/examples/1/mountain"),
        Some(&serde_json::json!("fuji"))
    );
}

#[rstest]
fn expand_prints_concrete_steps(workspace: Workspace) {
    let path = workspace.write("mountains.feature", OUTLINE);
    let (code, stdout, _) = run(featurette().arg("expand").arg(&path));
    assert_eq!(code, Some(0));
    assert_eq!(
        stdout,
        "climb [mountain=etna]\n  Given I am a etna\nclimb [mountain=fuji]\n  Given I am a fuji\n"
    );
}

#[rstest]
fn parse_failure_reports_line_and_exits_one(workspace: Workspace) {
    let path = workspace.write(
        "broken.feature",
        "Feature: F\nScenario Outline: s\nGiven a <x>\n",
    );
    let (code, stdout, stderr) = run(&mut parse(&path));
    assert_eq!(code, Some(1));
    assert!(stdout.is_empty(), "unexpected stdout: {stdout}");
    assert!(stderr.contains("line 2: missing examples"), "stderr: {stderr}");
}

#[rstest]
fn missing_file_exits_one(workspace: Workspace) {
    let path = workspace.dir.path().join("absent.feature");
    let (code, _, stderr) = run(&mut parse(&path));
    assert_eq!(code, Some(1));
    assert!(stderr.contains("failed to load"), "stderr: {stderr}");
}

#[rstest]
fn invalid_environment_exits_two(workspace: Workspace) {
    let path = workspace.write("mountains.feature", OUTLINE);
    let mut cmd = parse(&path);
    cmd.env("FEATURETTE_FORMAT", "xml");
    let (code, stdout, stderr) = run(&mut cmd);
    assert_eq!(code, Some(2));
    assert!(stdout.is_empty());
    assert!(stderr.contains("unknown output format"), "stderr: {stderr}");
}

#[rstest]
fn debug_level_surfaces_library_logs(workspace: Workspace) {
    let path = workspace.write("mountains.feature", OUTLINE);
    let mut cmd = parse(&path);
    cmd.args(["--log-level", "debug"]);
    let (code, _, stderr) = run(&mut cmd);
    assert_eq!(code, Some(0));
    assert!(stderr.contains("parsed feature 'Mountains'"), "stderr: {stderr}");
}
