//! Non-interactive subcommands.
//!
//! Each returns the number of statements that failed; the process exits
//! non-zero when it is above zero.

use std::path::Path;

use serde::Serialize;
use sql_console::{ConsoleError, Session};

use crate::output::{print_outcome, print_preview, print_tables};
use crate::Commands;

pub async fn run(
    session: &mut Session,
    command: Commands,
    output_json: bool,
) -> Result<usize, ConsoleError> {
    match command {
        Commands::Shell => Ok(0),
        Commands::Tables => tables(session, output_json).await,
        Commands::Columns { table } => columns(session, &table, output_json).await,
        Commands::Show { table } => show(session, &table, output_json).await,
        Commands::Exec { statements } => exec(session, &statements, output_json).await,
        Commands::Batch { file } => batch(session, &file, output_json).await,
        Commands::Insert { table, values } => insert(session, &table, &values).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ConsoleError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ConsoleError::Io(std::io::Error::other(e)))?;
    println!("{}", json);
    Ok(())
}

async fn tables(session: &mut Session, output_json: bool) -> Result<usize, ConsoleError> {
    let tables = session.list_tables().await?;
    if output_json {
        print_json(&tables)?;
    } else {
        print_tables(&tables);
    }
    Ok(0)
}

async fn columns(
    session: &mut Session,
    table: &str,
    output_json: bool,
) -> Result<usize, ConsoleError> {
    let columns = session.list_columns(table).await?;
    if columns.is_empty() {
        return Err(ConsoleError::UnknownTable(table.trim().to_string()));
    }
    if output_json {
        print_json(&columns)?;
    } else {
        for column in &columns {
            println!("{}", column);
        }
    }
    Ok(0)
}

async fn show(session: &mut Session, table: &str, output_json: bool) -> Result<usize, ConsoleError> {
    let preview = session.preview_table(table).await?;
    if output_json {
        print_json(&preview.result)?;
    } else {
        print_preview(&preview);
    }
    Ok(0)
}

async fn exec(
    session: &mut Session,
    statements: &[String],
    output_json: bool,
) -> Result<usize, ConsoleError> {
    let mut failures = 0;
    for statement in statements {
        match session.execute(statement, Vec::new()).await {
            Ok(outcome) if output_json => print_json(&outcome)?,
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => {
                eprintln!("{}", e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

async fn batch(session: &mut Session, file: &Path, output_json: bool) -> Result<usize, ConsoleError> {
    let report = session.execute_file(file).await?;
    for item in &report.items {
        match &item.outcome {
            Ok(outcome) => {
                println!("Executed: {}", item.statement);
                if output_json {
                    print_json(outcome)?;
                } else {
                    print_outcome(outcome);
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    let summary = report.summary();
    if output_json {
        print_json(&summary)?;
    } else if summary.failed == 0 {
        println!("All queries executed successfully.");
    } else {
        println!(
            "{} of {} queries executed successfully, {} failed.",
            summary.succeeded, summary.total, summary.failed
        );
    }
    Ok(summary.failed)
}

async fn insert(session: &mut Session, table: &str, values: &[String]) -> Result<usize, ConsoleError> {
    let template = session.insert_template(table).await?;
    let mut failures = 0;
    for line in values {
        match session.insert_row(&template, line).await {
            Ok(_) => println!("Record inserted into '{}' successfully.", template.table),
            Err(e) => {
                eprintln!("Error inserting record: {}", e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}
