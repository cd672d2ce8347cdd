//! End-to-end validation of census folders.

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use cin_cli::cli::{Cli, Command, ReportFormatArg};
use cin_cli::commands::validate_folder;
use cin_model::ErrorId;
use cin_validate::ValidationOptions;

fn write_census(dir: &Path) {
    fs::write(dir.join("Header.csv"), "ReferenceDate\n31/03/2022\n").unwrap();
    fs::write(
        dir.join("ChildIdentifiers.csv"),
        "LAchildID,UPN\nchild1,\nchild2,\n",
    )
    .unwrap();
    fs::write(
        dir.join("CINdetails.csv"),
        "LAchildID,CINdetailsID,CINreferralDate\nchild1,cin1,01/05/2021\n",
    )
    .unwrap();
}

#[test]
fn test_validate_folder_report() {
    let dir = TempDir::new().unwrap();
    write_census(dir.path());

    let report = validate_folder(dir.path(), &ValidationOptions::default()).unwrap();

    assert!(!report.is_clean());
    insta::assert_json_snapshot!(report, @r#"
    {
      "ruleset": "cin2023_24",
      "passed_rule_codes": [
        "1105",
        "2888Q",
        "4013",
        "4220",
        "8617",
        "8810",
        "8890"
      ],
      "per_rule_summary": [
        {
          "code": "8590",
          "kind": "error",
          "count": 1,
          "shape": "cross_table_group"
        }
      ],
      "violations": [
        {
          "rule_code": "8590",
          "table": "ChildIdentifiers",
          "columns": [
            "LAchildID"
          ],
          "row": 1,
          "error_id": [
            "child2"
          ]
        }
      ],
      "aggregate_issues": [],
      "errored_rules": []
    }
    "#);
}

#[test]
fn test_validate_folder_filters_by_key() {
    let dir = TempDir::new().unwrap();
    write_census(dir.path());
    let options = ValidationOptions {
        ruleset: Some("cin2022_23".to_string()),
        error_id: Some("child1".parse::<ErrorId>().unwrap()),
    };

    let report = validate_folder(dir.path(), &options).unwrap();

    assert_eq!(report.ruleset, "cin2022_23");
    assert!(report.violations.is_empty());
    assert_eq!(report.failed_count(), 1);
}

#[test]
fn test_validate_folder_unknown_ruleset() {
    let dir = TempDir::new().unwrap();
    write_census(dir.path());
    let options = ValidationOptions {
        ruleset: Some("cin1999_00".to_string()),
        ..ValidationOptions::default()
    };

    let error = validate_folder(dir.path(), &options).unwrap_err();
    assert!(format!("{error:#}").contains("cin1999_00"), "{error:#}");
}

#[test]
fn test_validate_folder_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent");

    let error = validate_folder(&missing, &ValidationOptions::default()).unwrap_err();
    assert!(format!("{error:#}").starts_with("load census folder"), "{error:#}");
}

#[test]
fn test_parse_validate_args() {
    let cli = Cli::try_parse_from([
        "cin-validator",
        "-v",
        "validate",
        "data",
        "--ruleset",
        "cin2022_23",
        "--error-id",
        "child1, NA, 2022-01-05",
        "--format",
        "json",
    ])
    .unwrap();

    assert!(cli.verbosity.is_present());
    let Command::Validate(args) = cli.command else {
        panic!("expected validate command");
    };
    assert_eq!(args.data_folder, Path::new("data"));
    assert_eq!(args.ruleset.as_deref(), Some("cin2022_23"));
    assert_eq!(args.format, ReportFormatArg::Json);
    assert_eq!(
        args.error_id.as_ref().map(ToString::to_string).as_deref(),
        Some("child1, NA, 2022-01-05")
    );
}

#[test]
fn test_parse_global_log_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["cin-validator", "rulesets", "--log-level", "debug"]).unwrap();
    assert!(cli.log_level.is_some());
    assert!(matches!(cli.command, Command::Rulesets));
}
