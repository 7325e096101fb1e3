//! Console output formatting shared by the menu and one-shot commands.

use sql_console::render::{header_line, render_ack, render_result, render_table, rule_line};
use sql_console::{ExecOutcome, TablePreview};

pub const NO_TABLES: &str = "No tables available in the database.";

pub fn print_heading(title: &str) {
    println!("\n{} {} {}", "=".repeat(10), title, "=".repeat(10));
}

pub fn print_tables(tables: &[String]) {
    if tables.is_empty() {
        println!("{}", NO_TABLES);
        return;
    }
    println!("\nAvailable Tables:");
    for table in tables {
        println!("- {}", table);
    }
}

/// Column order shown before inserting.
pub fn print_structure(columns: &[String]) {
    println!("\nTable Structure (Column Order):");
    println!("{}", header_line(columns));
    println!("{}", rule_line(columns.len()));
}

pub fn print_preview(preview: &TablePreview) {
    if preview.is_empty() {
        println!("The table '{}' is empty.", preview.table);
        return;
    }
    println!();
    for line in render_table(&preview.columns, &preview.result) {
        println!("{}", line);
    }
}

pub fn print_outcome(outcome: &ExecOutcome) {
    match outcome {
        ExecOutcome::Rows(result) if result.columns.is_empty() => {
            println!("Query executed but returned no results.");
        }
        ExecOutcome::Rows(result) => {
            for line in render_result(result) {
                println!("{}", line);
            }
        }
        ExecOutcome::Ack(ack) => println!("{}", render_ack(ack)),
    }
}
