use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qmap_core::displayed_options;
use qmap_map::{ColumnMappings, SuggestionResult};
use qmap_model::{POSSIBLE_OPTIONS_FIELD, RowStore};
use qmap_validate::{Severity, ValidationReport};

use qmap_cli::types::{ApplyResult, StepResult};

pub fn print_store(store: &RowStore, mappings: &ColumnMappings, limit: usize) {
    let mut columns = Table::new();
    columns.set_header(vec![header_cell("Field"), header_cell("Source column")]);
    apply_table_style(&mut columns);
    for field in store.schema() {
        let source = mappings.source_for(field).unwrap_or(field);
        let source_cell = if source == field {
            dim_cell(source)
        } else {
            Cell::new(source)
        };
        columns.add_row(vec![Cell::new(field), source_cell]);
    }
    println!("{columns}");

    let mut rows = Table::new();
    let mut header = vec![header_cell("Key")];
    header.extend(store.schema().iter().map(|field| header_cell(field)));
    rows.set_header(header);
    apply_table_style(&mut rows);
    for record in store.iter().take(limit) {
        let mut cells = vec![key_cell(record.key().as_str())];
        for field in store.schema() {
            let cell = if field == POSSIBLE_OPTIONS_FIELD {
                match displayed_options(record) {
                    Some(options) => Cell::new(options.join(", ")),
                    None => dim_cell("-"),
                }
            } else {
                record
                    .get(field)
                    .map_or_else(|| dim_cell("-"), Cell::new)
            };
            cells.push(cell);
        }
        rows.add_row(cells);
    }
    println!("{rows}");
    if store.len() > limit {
        println!("... {} more rows", store.len() - limit);
    }
    println!("Rows: {}", store.len());
}

pub fn print_report(report: &ValidationReport) {
    if report.is_empty() {
        println!("Validation passed: {} rows, no issues", report.records);
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|issue| issue.severity());
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            issue
                .key()
                .map_or_else(|| dim_cell("-"), |key| key_cell(key.as_str())),
            Cell::new(issue.code()),
            Cell::new(issue.message()),
        ]);
    }
    println!("{table}");
    println!(
        "Rows: {}  Errors: {}  Warnings: {}",
        report.records,
        report.error_count(),
        report.warning_count()
    );
}

pub fn print_apply(result: &ApplyResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Op"),
        header_cell("Target"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for step in &result.steps {
        table.add_row(vec![
            Cell::new(step.index),
            Cell::new(step.op),
            Cell::new(&step.subject),
            step_cell(step),
        ]);
    }
    println!("{table}");
    println!(
        "Applied: {}  Rejected: {}  Rows: {}",
        result.steps.len() - result.rejected_count(),
        result.rejected_count(),
        result.rows
    );
    print_report(&result.report);
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None if result.report.has_errors() => {
            println!("Output not written: validation errors (use --force to write anyway)");
        }
        None => {}
    }
}

pub fn print_suggestions(result: &SuggestionResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Logical field"),
        header_cell("Suggested source"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &result.suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.logical_field),
            Cell::new(&suggestion.source_field).fg(Color::Green),
            Cell::new(format!("{:.2}", suggestion.confidence)),
        ]);
    }
    for field in &result.unmatched {
        table.add_row(vec![Cell::new(field), dim_cell("-"), dim_cell("-")]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn step_cell(step: &StepResult) -> Cell {
    match &step.outcome {
        Ok(message) => Cell::new(message).fg(Color::Green),
        Err(reason) => Cell::new(format!("rejected: {reason}")).fg(Color::Red),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(key: &str) -> Cell {
    Cell::new(key).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
