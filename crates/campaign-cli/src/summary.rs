use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use campaign_map::{
    ConfidenceLevel, ConfidenceThresholds, MappingSession, SuggestionResult, TemplateMetadata,
};
use campaign_model::{CanonicalField, IssueSeverity};

pub fn print_fields(schema: &[CanonicalField]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in schema {
        table.add_row(vec![
            Cell::new(&field.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.field_type),
            flag_cell(field.required),
            Cell::new(&field.description),
        ]);
    }
    println!("{table}");
}

pub fn print_validation(session: &MappingSession) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Detected"),
        header_cell("Field"),
        header_cell("Expects"),
    ]);
    apply_summary_table_style(&mut table);
    for column in session.columns() {
        let field = session
            .field_for(&column.name)
            .and_then(|name| session.schema().iter().find(|f| f.name == name));
        let (field_cell, expects_cell) = match field {
            Some(field) => (Cell::new(&field.name), Cell::new(field.field_type)),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(column.data_type),
            field_cell,
            expects_cell,
        ]);
    }
    println!("{table}");

    let summary = session.summary();
    println!(
        "Mapped {}/{} columns, {}/{} required fields",
        summary.mapped_columns,
        summary.total_columns,
        summary.required_mapped,
        summary.required_total
    );
    print_issue_table(session);

    let verdict = if session.validate().is_valid {
        "VALID"
    } else {
        "INVALID"
    };
    println!("Result: {verdict}");
}

fn print_issue_table(session: &MappingSession) {
    let validation = session.validate();
    let issues = validation.issues();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in &issues {
        table.add_row(vec![
            severity_cell(issue.severity()),
            dim_cell(issue.code()),
            Cell::new(issue.to_string()),
        ]);
    }
    println!();
    println!(
        "Issues ({} errors, {} warnings):",
        validation.error_count(),
        validation.warning_count()
    );
    println!("{table}");
}

pub fn print_suggestions(result: &SuggestionResult, thresholds: &ConfidenceThresholds) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &result.suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.column),
            Cell::new(&suggestion.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", suggestion.confidence)),
            level_cell(thresholds.categorize(suggestion.confidence)),
        ]);
    }
    for column in &result.unmapped_columns {
        table.add_row(vec![
            Cell::new(column),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("unmatched"),
        ]);
    }
    println!("{table}");
    if let Some(mean) = result.mean_confidence() {
        println!(
            "{} suggestions, mean confidence {mean:.2}",
            result.suggestions.len()
        );
    }
}

pub fn print_templates(templates: &[TemplateMetadata]) {
    if templates.is_empty() {
        println!("No templates stored.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Platform"),
        header_cell("Name"),
        header_cell("Mappings"),
        header_cell("Default"),
        header_cell("Shared"),
        header_cell("Saved"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for template in templates {
        table.add_row(vec![
            Cell::new(&template.platform)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&template.name),
            count_cell(template.mapping_count),
            flag_cell(template.is_default),
            flag_cell(template.is_shared),
            template
                .saved_at
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
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

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(ConfidenceLevel::High) => Cell::new("high").fg(Color::Green),
        Some(ConfidenceLevel::Medium) => Cell::new("medium").fg(Color::Yellow),
        Some(ConfidenceLevel::Low) => Cell::new("low").fg(Color::Red),
        None => dim_cell("below"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
