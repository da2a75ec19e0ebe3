use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO_A: &str =
    "MonShop\nÀ propos :\n42\nAbonnés\n4.8\n(120)\nalice il y a 2 jours\nTrès bien";

/// Binary with its config directory isolated in `home`.
fn vintalyze(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vintalyze").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn analyze_stdin_prints_json() {
    let home = TempDir::new().unwrap();
    let output = vintalyze(&home)
        .arg("analyze")
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["shopName"], "MonShop");
    assert_eq!(json["followerCount"], 42);
    assert_eq!(json["estimatedSalesLow"], 108);
    assert_eq!(json["comments"][0]["relativeTime"], "2 jours");
    assert!(json.get("followingCount").is_none());
}

#[test]
fn analyze_following_policy_override() {
    let home = TempDir::new().unwrap();
    vintalyze(&home)
        .args(["analyze", "--following-policy", "zero_when_absent"])
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"followingCount\": 0"));
}

#[test]
fn analyze_missing_shop_reports_user_message() {
    let home = TempDir::new().unwrap();
    vintalyze(&home)
        .arg("analyze")
        .write_stdin("42\nAbonnés\n4.8\n(120)")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Impossible de trouver le nom de la boutique",
        ));
}

#[test]
fn analyze_logs_cause_of_bad_label() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.json");
    fs::write(&config, r#"{"extraction":{"labels":{"followers":"  "}}}"#).unwrap();

    vintalyze(&home)
        .arg("-v")
        .arg("-c")
        .arg(&config)
        .arg("analyze")
        .write_stdin(SCENARIO_A)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty layout label: followers"))
        .stderr(predicate::str::contains(
            "Erreur lors de l'analyse du profil. Veuillez réessayer.",
        ));
}

#[test]
fn analyze_logs_character_count() {
    let home = TempDir::new().unwrap();
    // 73 bytes but 70 characters
    vintalyze(&home)
        .args(["-v", "analyze"])
        .write_stdin(SCENARIO_A)
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzing 70 characters"))
        .stderr(predicate::str::contains("Parsing profile from 70 characters"));
}

#[test]
fn analyze_rejects_empty_input() {
    let home = TempDir::new().unwrap();
    vintalyze(&home)
        .arg("analyze")
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Veuillez coller le contenu de la page du profil Vinted",
        ));
}

#[test]
fn analyze_file_with_export() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = work.path().join("page.txt");
    fs::write(&input, SCENARIO_A).unwrap();
    let export_dir = work.path().join("exports");

    vintalyze(&home)
        .arg("analyze")
        .arg(&input)
        .args(["-f", "text", "--export-dir"])
        .arg(&export_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Boutique: MonShop"));

    let export = fs::read_to_string(export_dir.join("vintalyze_MonShop.csv")).unwrap();
    assert!(export.starts_with("Champ,Valeur\n"));
    assert!(export.contains("alice,2 jours,Très bien"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let pages = work.path().join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("good.txt"), SCENARIO_A).unwrap();
    fs::write(pages.join("bad.txt"), "42\nAbonnés").unwrap();
    let out = work.path().join("out");

    vintalyze(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", pages.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success();

    assert!(out.join("good.json").exists());
    assert!(!out.join("bad.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("good.txt,success,MonShop,42,"));
    assert!(summary.contains("bad.txt,error,"));
}

#[test]
fn config_init_then_get() {
    let home = TempDir::new().unwrap();
    vintalyze(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    vintalyze(&home)
        .args(["config", "set", "extraction.comment_cap", "3"])
        .assert()
        .success();

    vintalyze(&home)
        .args(["config", "get", "extraction.comment_cap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));

    vintalyze(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn config_set_rejects_invalid_value() {
    let home = TempDir::new().unwrap();
    vintalyze(&home)
        .args(["config", "set", "extraction.comment_cap", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}
