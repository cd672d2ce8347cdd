use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cin_ingest::load_snapshot;
use cin_model::Snapshot;
use cin_validate::{RuleEngine, ValidationOptions, ValidationReport};

use crate::cli::{ReportFormatArg, RulesArgs, ValidateArgs};
use crate::summary::{print_report, rules_table, rulesets_table};

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let options = ValidationOptions {
        ruleset: args.ruleset.clone(),
        error_id: args.error_id.clone(),
    };
    let report = validate_folder(&args.data_folder, &options)?;
    match args.format {
        ReportFormatArg::Table => print_report(&report),
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(report)
}

/// Loads a census folder and validates it.
pub fn validate_folder(folder: &Path, options: &ValidationOptions) -> Result<ValidationReport> {
    let span = info_span!("census", folder = %folder.display());
    let _guard = span.enter();

    let engine = RuleEngine::with_default_rulesets().context("build rulesets")?;
    let snapshot = load_census(folder)?;
    let report = engine
        .validate(&snapshot, options)
        .context("validate census")?;
    info!(
        ruleset = %report.ruleset,
        clean = report.is_clean(),
        "census validated"
    );
    Ok(report)
}

fn load_census(folder: &Path) -> Result<Snapshot> {
    load_snapshot(folder).with_context(|| format!("load census folder {}", folder.display()))
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let engine = RuleEngine::with_default_rulesets().context("build rulesets")?;
    let (year, registry) = engine
        .history()
        .resolve(args.ruleset.as_deref())
        .context("resolve ruleset")?;
    println!("Ruleset: {year}");
    println!("{}", rules_table(&registry));
    Ok(())
}

pub fn run_rulesets() -> Result<()> {
    let engine = RuleEngine::with_default_rulesets().context("build rulesets")?;
    println!("{}", rulesets_table(engine.history()));
    Ok(())
}
