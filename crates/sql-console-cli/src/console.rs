//! Interactive console menu.
//!
//! Every action reports its own failures and returns to the menu. A broken
//! terminal or a fatal error (such as a lost connection) ends the loop.

use std::path::Path;

use dialoguer::{Input, Select};
use sql_console::{ConsoleError, Session};

use crate::output::{print_heading, print_outcome, print_preview, print_structure, print_tables};

/// Result type for console prompts.
pub type PromptResult<T> = Result<T, ConsoleError>;

fn prompt_error(e: dialoguer::Error) -> ConsoleError {
    ConsoleError::Io(std::io::Error::other(e.to_string()))
}

fn select(prompt: &str, items: &[&str]) -> PromptResult<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)
}

fn input(prompt: &str) -> PromptResult<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

/// Print a recoverable error, or hand a fatal one back to end the session.
fn report(context: &str, e: ConsoleError) -> PromptResult<()> {
    if e.is_fatal() {
        return Err(e);
    }
    eprintln!("{}{}", context, e);
    Ok(())
}

/// Main menu loop.
pub async fn run(session: &mut Session) -> PromptResult<()> {
    let options = [
        "Fire Query",
        "Display Tables and Data",
        "Insert Values in DB",
        "Exit",
    ];

    loop {
        println!();
        match select("Options", &options)? {
            0 => fire_query(session).await?,
            1 => display_table(session).await?,
            2 => insert_values(session).await?,
            _ => {
                println!("Exiting the program.");
                return Ok(());
            }
        }
    }
}

/// Tables in the catalog, printed; `None` when listing failed.
async fn show_tables(session: &mut Session) -> PromptResult<Option<Vec<String>>> {
    match session.list_tables().await {
        Ok(tables) => {
            print_tables(&tables);
            Ok(Some(tables))
        }
        Err(e) => report("", e).map(|()| None),
    }
}

async fn fire_query(session: &mut Session) -> PromptResult<()> {
    print_heading("FIRE QUERY");
    let options = [
        "Fire queries from a text file",
        "Fire queries from direct input",
    ];

    match select("Choose an option", &options)? {
        0 => {
            let path = input("Enter the path or name of the text file")?;
            run_file(session, Path::new(path.trim())).await?;
        }
        _ => loop {
            let sql = input("Enter SQL query (or type 'done' to finish)")?;
            let sql = sql.trim();
            if sql.eq_ignore_ascii_case("done") {
                break;
            }
            if sql.is_empty() {
                continue;
            }
            match session.execute(sql, Vec::new()).await {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => report("", e)?,
            }
        },
    }
    Ok(())
}

async fn run_file(session: &mut Session, path: &Path) -> PromptResult<()> {
    if !path.exists() {
        println!("File not found. Please check the path or name.");
        return Ok(());
    }

    let batch = match session.execute_file(path).await {
        Ok(batch) => batch,
        Err(e) => return report("Error executing queries from file: ", e),
    };

    for item in &batch.items {
        match &item.outcome {
            Ok(outcome) => {
                println!("Executed: {}", item.statement);
                print_outcome(outcome);
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    let summary = batch.summary();
    if summary.failed == 0 {
        println!("All queries executed successfully.");
    } else {
        println!(
            "{} of {} queries executed successfully, {} failed.",
            summary.succeeded, summary.total, summary.failed
        );
    }

    // A fatal failure mid-script still ends the session once the summary is out.
    let fatal = batch
        .items
        .into_iter()
        .find_map(|item| item.outcome.err().filter(ConsoleError::is_fatal));
    match fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn display_table(session: &mut Session) -> PromptResult<()> {
    match show_tables(session).await? {
        Some(tables) if !tables.is_empty() => {}
        _ => return Ok(()),
    }

    let table = input("\nEnter the name of the table to display")?;
    match session.preview_table(&table).await {
        Ok(preview) => print_preview(&preview),
        Err(e @ ConsoleError::UnknownTable(_)) => println!("{}", e),
        Err(e) => report("Error displaying table: ", e)?,
    }
    Ok(())
}

async fn insert_values(session: &mut Session) -> PromptResult<()> {
    match show_tables(session).await? {
        Some(tables) if !tables.is_empty() => {}
        _ => return Ok(()),
    }

    let table = input("\nSelect the table you want to insert values into")?;
    let template = match session.insert_template(&table).await {
        Ok(template) => template,
        Err(e @ ConsoleError::UnknownTable(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return report("Error: ", e),
    };

    print_structure(&template.columns);

    let prompt = format!(
        "Enter values for '{}' as comma-separated values or type 'quit' to stop",
        template.table
    );
    loop {
        let line = input(&prompt)?;
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        match session.insert_row(&template, &line).await {
            Ok(_) => println!("Record inserted into '{}' successfully.", template.table),
            Err(e) => report("Error inserting record: ", e)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_console::DialectKind;

    #[test]
    fn test_report_keeps_going_on_statement_errors() {
        assert!(report("", ConsoleError::statement("SELEC 1", "syntax error")).is_ok());
        assert!(report("", ConsoleError::UnknownTable("ghost".into())).is_ok());
    }

    #[test]
    fn test_report_hands_back_fatal_errors() {
        let err = report("", ConsoleError::connection(DialectKind::Sqlite, "gone")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
