//! Artifact pipeline integration tests.
//!
//! The oracle is faked with a snapshot of the tree standing in for git
//! history: commit re-snapshots, reset restores, so the transactional
//! invariants can be checked byte for byte without a real repository.

use ngsweep::config::Config;
use ngsweep::discovery::ArtifactFinder;
use ngsweep::registry::RegistryIndex;
use ngsweep::remover::{RemovalStatus, Remover};
use ngsweep::verify::{Oracle, OracleError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Fake oracle whose "history" is an in-memory snapshot of the tree.
/// Clones share state, so tests can inspect the commit log after the
/// remover has consumed its copy.
#[derive(Clone)]
struct SnapshotOracle {
    inner: Rc<OracleState>,
}

struct OracleState {
    root: PathBuf,
    build_results: RefCell<Vec<bool>>,
    snapshot: RefCell<BTreeMap<PathBuf, String>>,
    commits: RefCell<Vec<String>>,
}

impl SnapshotOracle {
    /// `build_results` are consumed front to back; the last entry repeats
    fn new(root: &Path, build_results: &[bool]) -> Self {
        Self {
            inner: Rc::new(OracleState {
                root: root.to_path_buf(),
                build_results: RefCell::new(build_results.to_vec()),
                snapshot: RefCell::new(take_snapshot(root)),
                commits: RefCell::new(Vec::new()),
            }),
        }
    }

    fn commits(&self) -> Vec<String> {
        self.inner.commits.borrow().clone()
    }
}

impl Oracle for SnapshotOracle {
    fn build(&self) -> Result<bool, OracleError> {
        let mut results = self.inner.build_results.borrow_mut();
        let result = if results.len() > 1 {
            results.remove(0)
        } else {
            results[0]
        };
        Ok(result)
    }

    fn commit(&self, message: &str) -> Result<(), OracleError> {
        *self.inner.snapshot.borrow_mut() = take_snapshot(&self.inner.root);
        self.inner.commits.borrow_mut().push(message.to_string());
        Ok(())
    }

    fn reset(&self) -> Result<(), OracleError> {
        clear_tree(&self.inner.root);
        for (path, contents) in self.inner.snapshot.borrow().iter() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, contents).unwrap();
        }
        Ok(())
    }
}

fn take_snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    let mut snapshot = BTreeMap::new();
    collect_files(root, &mut snapshot);
    snapshot
}

fn collect_files(dir: &Path, into: &mut BTreeMap<PathBuf, String>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(&path, into);
        } else {
            into.insert(path.clone(), std::fs::read_to_string(&path).unwrap());
        }
    }
}

fn clear_tree(root: &Path) {
    for entry in std::fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path).unwrap();
        } else {
            std::fs::remove_file(&path).unwrap();
        }
    }
}

const MODULE: &str = r#"import { NgModule } from '@angular/core';
import { LoginComponent } from './login/login.component';
import { AuthService } from './auth/auth.service';

@NgModule({
  declarations: [LoginComponent],
  providers: [AuthService],
})
export class AppModule {}
"#;

/// Lay out a minimal project: one module, one component, one service
fn scaffold(root: &Path) {
    let app = root.join("src/app");
    std::fs::create_dir_all(app.join("login")).unwrap();
    std::fs::create_dir_all(app.join("auth")).unwrap();

    std::fs::write(app.join("app.module.ts"), MODULE).unwrap();
    std::fs::write(
        app.join("login/login.component.ts"),
        "@Component({})\nexport class LoginComponent {}\n",
    )
    .unwrap();
    std::fs::write(app.join("login/login.component.html"), "<p>login</p>\n").unwrap();
    std::fs::write(
        app.join("auth/auth.service.ts"),
        "@Injectable()\nexport class AuthService {}\n",
    )
    .unwrap();
}

fn run_pass(root: &Path, config: &Config, oracle: SnapshotOracle) -> Vec<ngsweep::RemovalResult> {
    let registries = RegistryIndex::discover(root, config).unwrap();
    let artifacts = ArtifactFinder::new(config).find_artifacts(root).unwrap();

    let mut remover = Remover::new(config, root, registries, oracle);
    for artifact in &artifacts {
        remover.process(artifact);
    }
    remover.into_results()
}

#[test]
fn test_successful_removal_purges_registry_and_commits() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[true]);
    let results = run_pass(dir.path(), &config, oracle.clone());

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status == RemovalStatus::Deleted));
    assert_eq!(oracle.commits().len(), 2);

    // Artifacts are gone: the service file, the whole component directory
    let app = dir.path().join("src/app");
    assert!(!app.join("auth/auth.service.ts").exists());
    assert!(!app.join("login").exists());

    // The registry no longer references either symbol
    let module = std::fs::read_to_string(app.join("app.module.ts")).unwrap();
    assert!(!module.contains("LoginComponent"));
    assert!(!module.contains("AuthService"));
    assert!(!module.contains("./login/login.component"));
    assert!(module.contains("NgModule"));
}

#[test]
fn test_commit_messages_encode_kind_symbol_and_source_path() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[true]);
    run_pass(dir.path(), &config, oracle.clone());

    let commits = oracle.commits();
    assert!(commits.iter().any(|m| {
        m == "chore: Removed unused Angular Service (AuthService) at src/app/auth/auth.service.ts"
    }));
    assert!(commits.iter().any(|m| {
        m == "chore: Removed unused Angular Component (LoginComponent) at src/app/login"
    }));
}

#[test]
fn test_build_failure_restores_tree_exactly() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    let before = take_snapshot(dir.path());

    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[false]);
    let results = run_pass(dir.path(), &config, oracle);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status == RemovalStatus::Kept));

    // Byte-for-byte restoration, registry edits included
    let after = take_snapshot(dir.path());
    assert_eq!(before, after);
}

#[test]
fn test_second_artifact_in_deleted_directory_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let widget = dir.path().join("src/app/widget");
    std::fs::create_dir_all(&widget).unwrap();
    std::fs::write(
        widget.join("widget.component.ts"),
        "@Component({})\nexport class WidgetComponent {}\n",
    )
    .unwrap();
    std::fs::write(
        widget.join("widget-list.component.ts"),
        "@Component({})\nexport class WidgetListComponent {}\n",
    )
    .unwrap();

    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[true]);
    let results = run_pass(dir.path(), &config, oracle);

    // One deletion, one skip: a single report entry, directory gone once
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, RemovalStatus::Deleted);
    assert!(!widget.exists());
}

#[test]
fn test_artifact_without_symbol_is_still_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("src/app");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::write(
        app.join("roles.enum.ts"),
        "export enum Role { Admin, User }\n",
    )
    .unwrap();

    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[true]);
    let results = run_pass(dir.path(), &config, oracle.clone());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, RemovalStatus::Deleted);
    assert!(!app.join("roles.enum.ts").exists());

    // No symbol means the commit message carries "unknown"
    assert!(oracle.commits()[0].contains("(unknown)"));
}

#[test]
fn test_mixed_outcomes_keep_report_order() {
    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path());

    // First build fails, second passes; artifacts process in path order:
    // auth.service.ts before login/
    let config = Config::default();
    let oracle = SnapshotOracle::new(dir.path(), &[false, true]);
    let results = run_pass(dir.path(), &config, oracle);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, RemovalStatus::Kept);
    assert_eq!(results[1].status, RemovalStatus::Deleted);
    assert!(dir.path().join("src/app/auth/auth.service.ts").exists());
    assert!(!dir.path().join("src/app/login").exists());
}
