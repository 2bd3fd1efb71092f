//! File-backed databases keep their contents across connections.

use gassi_query::{SqlExecutor, SqlValue};
use gassi_sqlite::{SqliteConfig, SqliteConnection};

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gassi.db");

    let conn = SqliteConnection::open(SqliteConfig::file(&path)).await.unwrap();
    conn.execute_batch("CREATE TABLE notes (body TEXT)").await.unwrap();
    conn.execute("INSERT INTO notes (body) VALUES (?)", &[SqlValue::from("kept")])
        .await
        .unwrap();
    conn.close().await.unwrap();

    let url = format!("sqlite://{}", path.display());
    let conn = SqliteConnection::open_url(&url).await.unwrap();
    let bodies = conn.query_column("SELECT body FROM notes").await.unwrap();
    assert_eq!(bodies, vec!["kept".to_string()]);
}

#[tokio::test]
async fn null_values_are_skipped_by_query_column() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    conn.execute_batch("CREATE TABLE t (v TEXT)").await.unwrap();
    conn.execute("INSERT INTO t (v) VALUES (?)", &[SqlValue::Null])
        .await
        .unwrap();
    conn.execute("INSERT INTO t (v) VALUES (?)", &[SqlValue::from(Some("x"))])
        .await
        .unwrap();

    let values = conn.query_column("SELECT v FROM t").await.unwrap();
    assert_eq!(values, vec!["x".to_string()]);
}
