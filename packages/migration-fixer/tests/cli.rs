//! End-to-end tests running the `migration-fixer` binary in a temp repo.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BAD: &str = "2025-01-24$broken-migration";
const TARGET: &str = "20250124020000_add_produtos_intencoes_loja";

fn fixer(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("migration-fixer").expect("migration-fixer binary");
    cmd.current_dir(cwd);
    cmd
}

/// Temp repo with an empty `prisma/migrations`
fn create_temp_repo() -> (TempDir, PathBuf) {
    let td = tempfile::tempdir().expect("tempdir");
    let migrations = td.path().join("prisma").join("migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("migration_lock.toml"),
        "provider = \"postgresql\"\n",
    )
    .unwrap();
    (td, migrations)
}

fn write_migration(dir: &Path, sql: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("migration.sql"), sql).unwrap();
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_missing_root_exits_nonzero() {
    let td = tempfile::tempdir().unwrap();

    fixer(td.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_nothing_to_do() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join("20240101000000_init"), "CREATE TABLE a ();");
    let before = entries(&migrations);

    fixer(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));

    assert_eq!(entries(&migrations), before);
}

#[test]
fn test_renames_bad_directory() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join(BAD), "ALTER TABLE produtos ADD COLUMN loja_id TEXT;");

    fixer(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Renaming"))
        .stdout(predicate::str::contains("renamed successfully"));

    assert!(!migrations.join(BAD).exists());
    assert_eq!(
        fs::read_to_string(migrations.join(TARGET).join("migration.sql")).unwrap(),
        "ALTER TABLE produtos ADD COLUMN loja_id TEXT;"
    );
}

#[test]
fn test_deletes_bad_directory_when_target_exists() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join(BAD), "-- stale");
    write_migration(&migrations.join(BAD).join("nested"), "-- nested");
    write_migration(&migrations.join(TARGET), "-- canonical");

    fixer(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert!(!migrations.join(BAD).exists());
    assert_eq!(
        fs::read_to_string(migrations.join(TARGET).join("migration.sql")).unwrap(),
        "-- canonical"
    );
}

#[test]
fn test_second_run_is_noop() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join(BAD), "-- x");

    fixer(td.path()).assert().success();
    let after_first = entries(&migrations);

    fixer(td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));

    assert_eq!(entries(&migrations), after_first);
}

#[test]
fn test_token_match_ignores_case() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join("20250124_Add_DATE_Column"), "-- y");

    fixer(td.path()).assert().success();

    assert!(migrations.join(TARGET).is_dir());
    assert!(!migrations.join("20250124_Add_DATE_Column").exists());
}

#[test]
fn test_quiet_prints_nothing() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join(BAD), "-- z");

    fixer(td.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(migrations.join(TARGET).is_dir());
}

#[test]
fn test_config_file_and_overrides() {
    let (td, migrations) = create_temp_repo();
    let dev = td.path().join(".dev");
    fs::create_dir_all(&dev).unwrap();
    fs::write(
        dev.join("migration-fixer.toml"),
        "[migrations]\ntarget_name = \"20250101000000_from_config\"\nbad_tokens = [\"tmp\"]\n",
    )
    .unwrap();
    write_migration(&migrations.join("001_TMP_copy"), "-- a");

    fixer(td.path()).assert().success();
    assert!(migrations.join("20250101000000_from_config").is_dir());

    write_migration(&migrations.join("002_tmp_again"), "-- b");
    fixer(td.path())
        .args(["--target", "20250102000000_from_flag"])
        .assert()
        .success();
    assert!(migrations.join("20250102000000_from_flag").is_dir());
}

#[test]
fn test_invalid_target_rejected() {
    let (td, _migrations) = create_temp_repo();

    fixer(td.path())
        .args(["--target", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target_name"));
}

#[test]
fn test_rename_failure_exits_nonzero() {
    let (td, migrations) = create_temp_repo();
    write_migration(&migrations.join("a$bad"), "-- a");
    fs::write(migrations.join(TARGET), "not a directory").unwrap();

    fixer(td.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to rename"));

    assert!(migrations.join("a$bad").is_dir());
    assert!(migrations.join(TARGET).is_file());
}
