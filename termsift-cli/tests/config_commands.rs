mod common;

use assert_cmd::Command;
use crate::common::{SET1_FASTA, SET2_FASTA, Workspace};

fn show_config(workspace: &Workspace) -> String {
    let output = workspace.termsift().arg("show-config").output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn define_commands_persist() {
    let workspace = Workspace::new();
    workspace.add_set("glyma", SET1_FASTA);
    workspace.add_set("medtr", SET2_FASTA);
    let summary = workspace.summary_dir();
    workspace.run(&[
        "define-summary",
        summary.to_str().unwrap(),
        "--label",
        "legumes",
    ]);
    workspace.run(&["define-simplicity", "runlength"]);

    let shown = show_config(&workspace);
    assert!(shown.contains("simplicity: runlength"));
    assert!(shown.contains(&format!("summary: {} (legumes)", summary.display())));
    let glyma = shown.find("glyma").unwrap();
    let medtr = shown.find("medtr").unwrap();
    assert!(glyma < medtr);

    let yaml = std::fs::read_to_string(workspace.config_path()).unwrap();
    assert!(yaml.contains("simplicity: runlength"));
}

#[test]
fn redefining_a_set_replaces_it() {
    let workspace = Workspace::new();
    workspace.add_set("glyma", SET1_FASTA);
    let other = workspace.path().join("elsewhere");
    workspace.run(&[
        "define-set",
        "glyma",
        other.to_str().unwrap(),
        "--label",
        "Glycine max",
    ]);

    let shown = show_config(&workspace);
    assert_eq!(shown.matches("glyma").count(), 1);
    assert!(shown.contains(other.to_str().unwrap()));
    assert!(shown.contains("Glycine max"));
}

#[test]
fn all_is_reserved() {
    let workspace = Workspace::new();
    let stderr = workspace.run_failing(&["define-set", "all", "data/all"]);
    assert!(stderr.contains("reserved"));
}

#[test]
fn unknown_simplicity_is_rejected() {
    let workspace = Workspace::new();
    workspace.run_failing(&["define-simplicity", "seg"]);
    assert!(!workspace.config_path().exists());
}

#[test]
fn config_from_environment() {
    let workspace = Workspace::new();
    let config = workspace.path().join("env").join("config.yaml");

    Command::cargo_bin("termsift")
        .unwrap()
        .env("TERMSIFT_CONFIG", &config)
        .args(["define-set", "glyma", "data/glyma"])
        .assert()
        .success();

    assert!(config.is_file());
    assert!(!workspace.config_path().exists());
}

#[test]
fn show_config_requires_file() {
    let workspace = Workspace::new();
    let stderr = workspace.run_failing(&["show-config"]);
    assert!(stderr.contains("does not exist"));
}
