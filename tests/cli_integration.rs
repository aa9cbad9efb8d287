//! CLI integration tests for Blueprint
//!
//! These tests build a model through the library, save it as a document and
//! drive the binary against it, verifying the commands work together
//! correctly in both text and JSON modes.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use blueprint_cli::export::{ModelDocument, SCHEMA_VERSION};
use blueprint_cli::model::{
    ActionOptions, BehaviorOptions, BusinessInitiativeOptions, Declare, Element, ElementId,
    ExpectationOptions, InteractionOptions, JourneyOptions, Kind, MilestoneOptions, PersonaOptions,
    Ref, StepOptions, StrategyOptions, TestOptions, VerificationLevel,
};
use blueprint_cli::Registry;

/// Get a command instance for the blueprint binary
fn blueprint_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("blueprint"))
}

/// A twelve-element deposit model: one strategy down to an automated test
fn deposit_model() -> Registry {
    let mut registry = Registry::new();
    let persona = registry
        .declare(PersonaOptions::new("Retail customer").goal("Save without friction"))
        .unwrap();
    let interaction = registry
        .declare(InteractionOptions::new("Mobile tap").channel("mobile_app"))
        .unwrap();
    let action = registry
        .declare(ActionOptions::new("Confirm deposit").interaction(interaction))
        .unwrap();
    let enter = registry
        .declare(StepOptions::new("Enter amount").action(action.clone()))
        .unwrap();
    let confirm = registry
        .declare(StepOptions::new("Review and confirm").action(action))
        .unwrap();
    let test = registry
        .declare(TestOptions::new("Deposit end to end").scenario("deposit 50, balance reflects it"))
        .unwrap();
    let behavior = registry
        .declare(
            BehaviorOptions::new("Deposit settles")
                .precondition("account is open")
                .postcondition("balance increased by the deposited amount")
                .test(test),
        )
        .unwrap();
    let expectation = registry
        .declare(
            ExpectationOptions::new("Deposit confirmed within seconds")
                .verification(VerificationLevel::Automated)
                .behavior(behavior),
        )
        .unwrap();
    let milestone = registry
        .declare(
            MilestoneOptions::new("Funds deposited")
                .step(enter, 1)
                .step(confirm, 2)
                .expectation(expectation),
        )
        .unwrap();
    let journey = registry
        .declare(
            JourneyOptions::new("Deposit money")
                .persona(persona)
                .milestone(milestone, 1),
        )
        .unwrap();
    let initiative = registry
        .declare(
            BusinessInitiativeOptions::new("Grow deposits")
                .objective("Increase deposit volume 20%")
                .journey(journey),
        )
        .unwrap();
    registry
        .declare(
            StrategyOptions::new("Win retail banking")
                .vision("The most trusted place for everyday money")
                .initiative(initiative),
        )
        .unwrap();
    registry
}

/// Save the deposit model into a temp dir, returning the dir and file path
fn setup_model(file_name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    ModelDocument::from_registry(&deposit_model())
        .save(&path)
        .unwrap();
    (dir, path)
}

// =============================================================================
// Check Tests
// =============================================================================

#[test]
fn test_check_valid_model() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 12 elements, 0 warning(s)"));
}

#[test]
fn test_check_valid_model_json() {
    let (_dir, path) = setup_model("model.json");

    let output = blueprint_cmd()
        .args(["check", "--format", "json"])
        .arg(&path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["elements"], 12);
    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_yaml_document() {
    let (_dir, path) = setup_model("model.yml");

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 12 elements"));
}

#[test]
fn test_check_dangling_reference_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");

    // A milestone pointing at a step that was never declared.
    let ghost = Ref::from_id(ElementId::new(Kind::Step, "Ghost step")).unwrap();
    let orphan = Element::new(MilestoneOptions::new("Orphan").step(ghost, 1).into_payload());
    let document = ModelDocument {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        elements: vec![orphan],
    };
    document.save(&path).unwrap();

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("model is invalid: 1 error"));
}

#[test]
fn test_check_dangling_reference_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");

    let ghost = Ref::from_id(ElementId::new(Kind::Step, "Ghost step")).unwrap();
    let orphan = Element::new(MilestoneOptions::new("Orphan").step(ghost, 1).into_payload());
    ModelDocument {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        elements: vec![orphan],
    }
    .save(&path)
    .unwrap();

    let output = blueprint_cmd()
        .args(["check", "--format", "json"])
        .arg(&path)
        .assert()
        .failure();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_check_unreachable_element_warns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");

    let mut registry = deposit_model();
    registry
        .declare(PersonaOptions::new("Forgotten persona"))
        .unwrap();
    ModelDocument::from_registry(&registry).save(&path).unwrap();

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("OK: 13 elements, 1 warning(s)"));
}

#[test]
fn test_check_unsupported_schema_version_fails() {
    let (_dir, path) = setup_model("model.json");

    let content = fs::read_to_string(&path).unwrap();
    let content = content.replace("\"schema_version\": 1", "\"schema_version\": 99");
    fs::write(&path, content).unwrap();

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unsupported document schema version"));
}

#[test]
fn test_check_missing_file_fails() {
    blueprint_cmd()
        .args(["check", "no-such-model.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read document"));
}

#[test]
fn test_check_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.toml");
    fs::write(&path, "not a model").unwrap();

    blueprint_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported document extension"));
}

// =============================================================================
// Show Tests
// =============================================================================

#[test]
fn test_show_lists_all_elements() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .arg("show")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Win retail banking"))
        .stdout(predicate::str::contains("Deposit money"))
        .stdout(predicate::str::contains("12 element(s)"));
}

#[test]
fn test_show_filters_by_kind() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .args(["show", "--kind", "step"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter amount"))
        .stdout(predicate::str::contains("Review and confirm"))
        .stdout(predicate::str::contains("2 element(s)"));
}

#[test]
fn test_show_kind_accepts_code() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .args(["show", "--kind", "jn"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deposit money"))
        .stdout(predicate::str::contains("1 element(s)"));
}

#[test]
fn test_show_json_format() {
    let (_dir, path) = setup_model("model.json");

    let output = blueprint_cmd()
        .args(["show", "--format", "json", "--kind", "strategy"])
        .arg(&path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "strategy");
    assert_eq!(items[0]["name"], "Win retail banking");
    assert!(items[0]["id"].as_str().unwrap().starts_with("st-"));
}

// =============================================================================
// Tree Tests
// =============================================================================

#[test]
fn test_tree_shows_hierarchy() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .arg("tree")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("strategy [st-"))
        .stdout(predicate::str::contains("  business_initiative [bi-"))
        .stdout(predicate::str::contains("    journey [jn-"))
        .stdout(predicate::str::contains("      milestone [ms-"))
        .stdout(predicate::str::contains("        step [sp-"));
}

#[test]
fn test_tree_json_nests_children() {
    let (_dir, path) = setup_model("model.json");

    let output = blueprint_cmd()
        .args(["tree", "--format", "json"])
        .arg(&path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    let roots = json.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["kind"], "strategy");

    let initiative = &roots[0]["children"][0];
    assert_eq!(initiative["kind"], "business_initiative");
    let journey = &initiative["children"][0];
    assert_eq!(journey["kind"], "journey");
    let milestone = &journey["children"][0];
    assert_eq!(milestone["kind"], "milestone");
    // Steps first in declared order, then the expectation.
    assert_eq!(milestone["children"][0]["name"], "Enter amount");
    assert_eq!(milestone["children"][1]["name"], "Review and confirm");
    assert_eq!(milestone["children"][2]["kind"], "expectation");
}

#[test]
fn test_tree_empty_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    ModelDocument::from_registry(&Registry::new())
        .save(&path)
        .unwrap();

    blueprint_cmd()
        .arg("tree")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No strategies declared"));
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_render_to_stdout() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .arg("render")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Model outline"))
        .stdout(predicate::str::contains("## Strategy: Win retail banking"))
        .stdout(predicate::str::contains("### Initiative: Grow deposits"))
        .stdout(predicate::str::contains("#### Journey: Deposit money"));
}

#[test]
fn test_render_to_file() {
    let (dir, path) = setup_model("model.json");
    let out = dir.path().join("outline.md");

    blueprint_cmd()
        .arg("render")
        .arg(&path)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.contains("## Strategy: Win retail banking"));
    assert!(markdown.contains("1. **Funds deposited**"));
}

#[test]
fn test_render_json_wraps_markdown() {
    let (_dir, path) = setup_model("model.json");

    let output = blueprint_cmd()
        .args(["render", "--format", "json"])
        .arg(&path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert!(json["markdown"]
        .as_str()
        .unwrap()
        .contains("# Model outline"));
}

// =============================================================================
// Stats Tests
// =============================================================================

#[test]
fn test_stats_counts_elements() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .arg("stats")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("step"))
        .stdout(predicate::str::contains("12 element(s), 12 reference(s)"));
}

#[test]
fn test_stats_json_format() {
    let (_dir, path) = setup_model("model.json");

    let output = blueprint_cmd()
        .args(["stats", "--format", "json"])
        .arg(&path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.get_output().stdout)).unwrap();
    assert_eq!(json["elements"], 12);
    assert_eq!(json["references"], 12);
    assert_eq!(json["by_kind"]["step"], 2);
    assert_eq!(json["by_kind"]["strategy"], 1);
}

// =============================================================================
// Verbose Mode Tests
// =============================================================================

#[test]
fn test_verbose_output_goes_to_stderr() {
    let (_dir, path) = setup_model("model.json");

    blueprint_cmd()
        .args(["--verbose", "check"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:check]"));
}
