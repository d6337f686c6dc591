use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn vitae(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vitae").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn stored_document(data_dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join("cv-data.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn naked_invocation_prints_overview_of_sample() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Doe, Senior Frontend Developer"))
        .stdout(predicate::str::contains("skill-1"))
        .stdout(predicate::str::contains("React (95)"));
    assert!(!dir.path().join("cv-data.json").exists());
}

#[test]
fn set_summary_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["set", "summary", "Builds reliable systems."])
        .assert()
        .success()
        .stdout(predicate::str::contains("summary updated"));

    vitae(dir.path())
        .args(["show", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Builds reliable systems.\""));

    let doc = stored_document(dir.path());
    assert_eq!(doc["summary"], "Builds reliable systems.");
    assert_eq!(doc["personal"]["name"], "Alex Doe");
}

#[test]
fn set_reads_value_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("langs.json");
    std::fs::write(&file, r#"[{"id":"l1","name":"Dutch","proficiency":"Beginner"}]"#).unwrap();

    vitae(dir.path())
        .args(["set", "languages"])
        .arg(format!("@{}", file.display()))
        .assert()
        .success();

    let doc = stored_document(dir.path());
    assert_eq!(doc["languages"].as_array().unwrap().len(), 1);
    assert_eq!(doc["languages"][0]["name"], "Dutch");
}

#[test]
fn malformed_import_is_reported_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{not json").unwrap();

    vitae(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Import failed"));

    assert!(!dir.path().join("cv-data.json").exists());
    vitae(dir.path())
        .args(["show", "personal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Doe"));
}

#[test]
fn import_clamps_out_of_range_skill_level() {
    let dir = TempDir::new().unwrap();
    let exported = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["export", "json", "-o"])
        .arg(exported.path())
        .assert()
        .success();

    let path = exported.path().join("cv-data.json");
    let mut doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    doc["skills"][0]["level"] = serde_json::json!(150);
    std::fs::write(&path, doc.to_string()).unwrap();

    vitae(dir.path())
        .arg("import")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported CV data"));

    assert_eq!(stored_document(dir.path())["skills"][0]["level"], 100);
}

#[test]
fn add_edit_remove_entries() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["add", "skill", "-f", "name=Rust", "-f", "level=70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added skill Rust (70)"));

    vitae(dir.path())
        .args(["edit", "skills", "skill-1", "-f", "level=10"])
        .assert()
        .success();

    vitae(dir.path())
        .args(["rm", "languages", "lang-2"])
        .assert()
        .success();

    let doc = stored_document(dir.path());
    let skills = doc["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 6);
    assert_eq!(skills[0]["level"], 10);
    assert_eq!(skills[5]["name"], "Rust");
    assert_eq!(doc["languages"].as_array().unwrap().len(), 1);
}

#[test]
fn unknown_entry_id_is_an_error() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["remove", "skills", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: No entry with id missing"));
}

#[test]
fn reset_without_terminal_is_declined() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["set", "summary", "Mine"])
        .assert()
        .success();

    vitae(dir.path())
        .arg("reset")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset cancelled"));
    assert_eq!(stored_document(dir.path())["summary"], "Mine");

    vitae(dir.path())
        .args(["reset", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to the sample"));
    assert_ne!(stored_document(dir.path())["summary"], "Mine");
}

#[test]
fn template_switch_changes_render_not_document() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["theme", "--template", "classic", "--palette", "forest green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("template    = classic"))
        .stdout(predicate::str::contains("#166534"));

    assert!(dir.path().join("cv-theme.json").exists());
    assert!(!dir.path().join("cv-data.json").exists());

    vitae(dir.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("cv-classic"))
        .stdout(predicate::str::contains("#166534"));

    vitae(dir.path())
        .args(["render", "--template", "modern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cv-modern"));
}

#[test]
fn invalid_theme_color_is_rejected() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["theme", "--color", "primary=#nothex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(!dir.path().join("cv-theme.json").exists());
}

#[test]
fn pdf_export_failure_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["config", "rasterizer", "vitae-missing-rasterizer"])
        .assert()
        .success();

    vitae(dir.path())
        .args(["export", "pdf", "-o"])
        .arg(out.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Export failed"));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown config key: colour"));

    vitae(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("rasterizer = wkhtmltoimage"));
}

#[test]
fn help_is_grouped() {
    let dir = TempDir::new().unwrap();
    vitae(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document Commands:"))
        .stdout(predicate::str::contains("Data Commands:"));
}
