use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cin_model::ABSENT_MARKER;
use cin_validate::{RuleKind, RuleRegistry, RulesetHistory, ValidationReport};

/// Violation rows printed before the table is cut short.
const MAX_VIOLATION_ROWS: usize = 200;

pub fn print_report(report: &ValidationReport) {
    println!("Ruleset: {}", report.ruleset);
    println!(
        "Rules: {} passed, {} failed, {} errored",
        report.passed_rule_codes.len(),
        report.failed_count(),
        report.errored_rules.len()
    );
    if let Some(table) = summary_table(report) {
        println!("{table}");
    }
    if let Some(table) = violation_table(report) {
        println!();
        println!("Violations:");
        println!("{table}");
        let hidden = report.violations.len().saturating_sub(MAX_VIOLATION_ROWS);
        if hidden > 0 {
            println!("... {hidden} more (use --format json for the full list)");
        }
    }
    if !report.aggregate_issues.is_empty() {
        println!();
        println!("Aggregate issues:");
        for issue in &report.aggregate_issues {
            println!("- {}: {}", issue.rule_code, issue.message);
        }
    }
    if !report.errored_rules.is_empty() {
        eprintln!("Errored rules:");
        for errored in &report.errored_rules {
            eprintln!("- {} ({}): {}", errored.code, errored.kind.label(), errored.message);
        }
    }
}

/// One row per failed rule, or `None` when nothing failed.
pub fn summary_table(report: &ValidationReport) -> Option<Table> {
    if report.per_rule_summary.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Kind"),
        header_cell("Shape"),
        header_cell("Count"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total = 0usize;
    for summary in &report.per_rule_summary {
        total += summary.count;
        table.add_row(vec![
            code_cell(summary.code.as_str()),
            kind_cell(summary.kind),
            Cell::new(summary.shape.label()),
            count_cell(summary.count, summary.kind),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    Some(table)
}

fn violation_table(report: &ValidationReport) -> Option<Table> {
    if report.violations.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Row"),
        header_cell("Key"),
    ]);
    apply_violation_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for violation in report.violations.iter().take(MAX_VIOLATION_ROWS) {
        let key = match &violation.error_id {
            Some(error_id) => Cell::new(error_id),
            None => dim_cell(ABSENT_MARKER),
        };
        table.add_row(vec![
            code_cell(violation.rule_code.as_str()),
            Cell::new(violation.table),
            Cell::new(violation.columns.join(", ")),
            Cell::new(violation.row),
            key,
        ]);
    }
    Some(table)
}

/// The effective rules of one year.
pub fn rules_table(registry: &RuleRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Kind"),
        header_cell("Table"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for rule in registry {
        table.add_row(vec![
            code_cell(rule.code.as_str()),
            kind_cell(rule.kind),
            Cell::new(rule.table),
            Cell::new(&rule.message),
        ]);
    }
    table
}

/// Registered years, oldest first, with their effective rule counts.
pub fn rulesets_table(history: &RulesetHistory) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Ruleset"), header_cell("Rules")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let latest = history.latest();
    for year in history.years() {
        let rules = history
            .build_effective_set(year)
            .map_or_else(|_| dim_cell("-"), |set| Cell::new(set.len()));
        let year_cell = if Some(year) == latest {
            Cell::new(format!("{year} (latest)")).add_attribute(Attribute::Bold)
        } else {
            Cell::new(year)
        };
        table.add_row(vec![year_cell, rules]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(65)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_violation_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_color(kind: RuleKind) -> Color {
    match kind {
        RuleKind::Error => Color::Red,
        RuleKind::Query => Color::Yellow,
    }
}

fn kind_cell(kind: RuleKind) -> Cell {
    Cell::new(kind.label()).fg(kind_color(kind))
}

fn count_cell(count: usize, kind: RuleKind) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(kind_color(kind))
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
