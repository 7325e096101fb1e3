//! Session integration tests against a temporary SQLite database.
//!
//! PostgreSQL and MySQL share every code path above the executor, so these
//! tests cover catalog, insert and batch behavior without a server.

use std::path::Path;

use sql_console::{
    build_insert, with_session, ConsoleConfig, ConsoleError, DialectKind, ExecOutcome, Session,
};
use tempfile::TempDir;

fn config_for(dir: &Path) -> ConsoleConfig {
    ConsoleConfig {
        database_uri: String::new(),
        sqlite_file: dir.join("console.sqlite"),
        ..ConsoleConfig::default()
    }
}

async fn open(dir: &TempDir) -> Session {
    Session::open(&config_for(dir.path())).await.unwrap()
}

async fn create_orders(session: &mut Session) {
    session
        .execute(
            "CREATE TABLE orders (id INTEGER, customer_id INTEGER, total REAL)",
            vec![],
        )
        .await
        .unwrap();
}

fn rows(outcome: ExecOutcome) -> sql_console::QueryResult {
    match outcome {
        ExecOutcome::Rows(result) => result,
        ExecOutcome::Ack(ack) => panic!("expected rows, got {:?}", ack),
    }
}

#[tokio::test]
async fn test_empty_descriptor_opens_sqlite_file() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir).await;
    assert_eq!(session.kind(), DialectKind::Sqlite);
    session.close().await.unwrap();
    assert!(dir.path().join("console.sqlite").exists());
}

#[tokio::test]
async fn test_list_tables_and_columns_in_order() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    assert_eq!(session.list_tables().await.unwrap(), vec!["orders"]);
    assert_eq!(
        session.list_columns("orders").await.unwrap(),
        vec!["id", "customer_id", "total"]
    );
    // Surrounding whitespace is ignored
    assert_eq!(session.list_columns("  orders ").await.unwrap().len(), 3);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_unknown_table_has_no_columns_every_time() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    for _ in 0..2 {
        assert!(session.list_columns("ghost").await.unwrap().is_empty());
    }
    // Names are matched case-sensitively against the catalog
    assert!(session.list_columns("ORDERS").await.unwrap().is_empty());

    let err = session.insert_template("ghost").await.unwrap_err();
    assert!(matches!(err, ConsoleError::UnknownTable(ref t) if t == "ghost"));

    let err = session.preview_table("ghost").await.unwrap_err();
    assert_eq!(err.to_string(), "Table 'ghost' does not exist.");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_insert_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    let template = session.insert_template("orders").await.unwrap();
    assert_eq!(
        template.sql,
        "INSERT INTO orders (id, customer_id, total) VALUES (?, ?, ?)"
    );
    assert_eq!(template.placeholder_count(), 3);

    assert_eq!(session.insert_row(&template, "7,3,49.99").await.unwrap(), 1);

    let result = rows(session.execute("SELECT * FROM orders", vec![]).await.unwrap());
    assert_eq!(result.columns, vec!["id", "customer_id", "total"]);
    assert_eq!(
        result.rows,
        vec![vec![
            Some("7".to_string()),
            Some("3".to_string()),
            Some("49.99".to_string())
        ]]
    );

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_real_cells_keep_decimal_form() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    session
        .execute("CREATE TABLE m (price REAL, big REAL)", vec![])
        .await
        .unwrap();

    session.insert_values("m", "1.0,1e20").await.unwrap();

    let result = rows(session.execute("SELECT * FROM m", vec![]).await.unwrap());
    assert_eq!(
        result.rows,
        vec![vec![Some("1.0".to_string()), Some("1.0e+20".to_string())]]
    );

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_text_tokens_are_not_trimmed() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    session
        .execute("CREATE TABLE people (first TEXT, last TEXT)", vec![])
        .await
        .unwrap();

    session.insert_values("people", "Ada, Lovelace").await.unwrap();

    let preview = session.preview_table("people").await.unwrap();
    assert_eq!(preview.columns, vec!["first", "last"]);
    assert_eq!(
        preview.result.rows,
        vec![vec![Some("Ada".to_string()), Some(" Lovelace".to_string())]]
    );

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_wrong_value_count_is_rejected_before_sending() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    let template = session.insert_template("orders").await.unwrap();
    let err = session.insert_row(&template, "1,2").await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::ValueCount {
            expected: 3,
            got: 2,
            ..
        }
    ));

    let result = rows(session.execute("SELECT * FROM orders", vec![]).await.unwrap());
    assert!(result.is_empty());
    assert_eq!(result.columns, vec!["id", "customer_id", "total"]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_null_cells_and_acks() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    let outcome = session
        .execute("INSERT INTO orders (id) VALUES (1)", vec![])
        .await
        .unwrap();
    match outcome {
        ExecOutcome::Ack(ack) => assert_eq!(ack.rows_affected, Some(1)),
        other => panic!("expected ack, got {:?}", other),
    }

    let result = rows(
        session
            .execute("  select id, total from orders", vec![])
            .await
            .unwrap(),
    );
    assert_eq!(result.rows, vec![vec![Some("1".to_string()), None]]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_batch_continues_past_failed_statement() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;

    let report = session
        .execute_batch(
            "CREATE TABLE notes (body TEXT);\n\
             INSERT INTO missing_table VALUES ('x');\n\
             INSERT INTO notes VALUES ('kept');\n",
        )
        .await;

    assert_eq!(report.items.len(), 3);
    assert!(report.items[0].is_ok());
    assert!(!report.items[1].is_ok());
    assert!(report.items[2].is_ok());
    assert_eq!(report.error_count(), 1);

    let result = rows(session.execute("SELECT body FROM notes", vec![]).await.unwrap());
    assert_eq!(result.rows, vec![vec![Some("kept".to_string())]]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_file_missing_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    let err = session
        .execute_file(&dir.path().join("nope.sql"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Io(_)));
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_writes_are_committed_immediately() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    with_session(&config, |session| {
        Box::pin(async move {
            session
                .execute("CREATE TABLE kv (k TEXT, v TEXT)", vec![])
                .await?;
            session.insert_values("kv", "a,1").await?;
            Ok(())
        })
    })
    .await
    .unwrap();

    let tables = with_session(&config, |session| {
        Box::pin(async move { session.list_tables().await })
    })
    .await
    .unwrap();
    assert_eq!(tables, vec!["kv"]);
}

#[tokio::test]
async fn test_build_insert_matches_session_template() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir).await;
    create_orders(&mut session).await;

    let columns = session.list_columns("orders").await.unwrap();
    let built = build_insert(session.dialect(), "orders", &columns).unwrap();
    let template = session.insert_template("orders").await.unwrap();
    assert_eq!(built, template);

    session.close().await.unwrap();
}
