//! CLI integration tests.
//!
//! Only flows that need no git repository or real build are exercised
//! here; the transactional paths are covered by the pipeline tests with a
//! fake oracle.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn ngsweep() -> Command {
    Command::cargo_bin("ngsweep").expect("binary builds")
}

fn scaffold(root: &Path) {
    let app = root.join("src/app");
    std::fs::create_dir_all(app.join("login")).unwrap();
    std::fs::write(
        app.join("app.module.ts"),
        "import { LoginComponent } from './login/login.component';\n\
         @NgModule({ declarations: [LoginComponent] })\nexport class AppModule {}\n",
    )
    .unwrap();
    std::fs::write(
        app.join("login/login.component.ts"),
        "@Component({})\nexport class LoginComponent {\n  lonely(): void {}\n}\n",
    )
    .unwrap();
    std::fs::write(
        app.join("app.component.ts"),
        "@Component({})\nexport class AppComponent {}\n",
    )
    .unwrap();
}

#[test]
fn test_help_lists_both_passes() {
    ngsweep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("artifacts"))
        .stdout(predicate::str::contains("methods"));
}

#[test]
fn test_version() {
    ngsweep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ngsweep"));
}

#[test]
fn test_artifacts_dry_run_lists_candidates_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    ngsweep()
        .args(["artifacts", "--dry-run", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("login.component.ts"));

    // Nothing was touched
    assert!(dir.path().join("src/app/login/login.component.ts").exists());
    let module = std::fs::read_to_string(dir.path().join("src/app/app.module.ts")).unwrap();
    assert!(module.contains("LoginComponent"));
}

#[test]
fn test_artifacts_dry_run_skips_root_component() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    ngsweep()
        .args(["artifacts", "--dry-run", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("app.component.ts").not());
}

#[test]
fn test_methods_pass_removes_lonely_method() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    ngsweep()
        .args(["methods", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed methods"))
        .stdout(predicate::str::contains("lonely"));

    let unit =
        std::fs::read_to_string(dir.path().join("src/app/login/login.component.ts")).unwrap();
    assert!(!unit.contains("lonely"));
}

#[test]
fn test_methods_dry_run_reports_but_preserves() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    ngsweep()
        .args(["methods", "--dry-run", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lonely"));

    let unit =
        std::fs::read_to_string(dir.path().join("src/app/login/login.component.ts")).unwrap();
    assert!(unit.contains("lonely"));
}

#[test]
fn test_empty_directory_is_handled_gracefully() {
    let dir = tempfile::tempdir().unwrap();

    ngsweep()
        .args(["artifacts", "--dry-run", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No artifact candidates"));

    ngsweep()
        .args(["methods", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 component file(s)"));
}
