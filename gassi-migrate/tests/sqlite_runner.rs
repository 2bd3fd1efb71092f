//! Runner behaviour against a real SQLite database.

use gassi_migrate::{Migration, MigrationError, MigrationRegistry, MigrationRunner, RunnerConfig};
use gassi_query::{SqlExecutor, SqlValue, SqliteDialect};
use gassi_sqlite::{SqliteConfig, SqliteConnection};
use pretty_assertions::assert_eq;

async fn tables(conn: &SqliteConnection) -> Vec<String> {
    conn.query_column(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn builtin_schema_applies_once() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    let dialect = SqliteDialect::new();
    let runner = MigrationRunner::new(MigrationRegistry::builtin());

    let first = runner.run(&conn, &dialect).await.unwrap();
    assert_eq!(first.applied.len(), 9);
    assert!(first.already_existing.is_empty());

    assert_eq!(
        tables(&conn).await,
        vec![
            "blocked_dates",
            "bookings",
            "dogs",
            "experience_requests",
            "reactivation_requests",
            "schema_migrations",
            "system_settings",
            "users",
        ]
    );

    let settings = conn
        .query_column("SELECT value FROM system_settings WHERE key = 'booking_advance_days'")
        .await
        .unwrap();
    assert_eq!(settings, vec!["14"]);

    let second = runner.run(&conn, &dialect).await.unwrap();
    assert_eq!(second.applied_count(), 0);
    assert_eq!(second.skipped, 9);

    let recorded = conn
        .query_column("SELECT version FROM schema_migrations")
        .await
        .unwrap();
    assert_eq!(recorded.len(), 9);
}

#[tokio::test]
async fn duplicate_column_counts_as_applied() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    let dialect = SqliteDialect::new();
    let runner = MigrationRunner::new(MigrationRegistry::builtin());
    runner.run(&conn, &dialect).await.unwrap();

    // Forget the thumbnail column so the ALTER TABLE runs again.
    conn.execute(
        "DELETE FROM schema_migrations WHERE version = ?",
        &[SqlValue::from("009_add_photo_thumbnail_column")],
    )
    .await
    .unwrap();

    let report = runner.run(&conn, &dialect).await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.already_existing, vec!["009_add_photo_thumbnail_column"]);

    let status = runner.status(&conn, &dialect).await.unwrap();
    assert!(status.is_up_to_date());
}

#[tokio::test]
async fn failed_migration_resumes_after_fix() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    let dialect = SqliteDialect::new();

    let broken = MigrationRegistry::new()
        .with(Migration::new("001_a", "a").sqlite("CREATE TABLE a (id INTEGER)"))
        .with(Migration::new("002_b", "b").sqlite("CREATE TABLE b (id INTEGER"))
        .with(Migration::new("003_c", "c").sqlite("CREATE TABLE c (id INTEGER)"));

    let err = MigrationRunner::new(broken)
        .run(&conn, &dialect)
        .await
        .unwrap_err();
    assert!(matches!(err, MigrationError::MigrationFailed { ref id, .. } if id == "002_b"));
    assert_eq!(tables(&conn).await, vec!["a", "schema_migrations"]);

    let fixed = MigrationRegistry::new()
        .with(Migration::new("001_a", "a").sqlite("CREATE TABLE a (id INTEGER)"))
        .with(Migration::new("002_b", "b").sqlite("CREATE TABLE b (id INTEGER)"))
        .with(Migration::new("003_c", "c").sqlite("CREATE TABLE c (id INTEGER)"));
    let runner = MigrationRunner::new(fixed);

    let before = runner.status(&conn, &dialect).await.unwrap();
    assert_eq!(before.applied, 1);
    assert_eq!(before.pending_ids, vec!["002_b", "003_c"]);

    let report = runner.run(&conn, &dialect).await.unwrap();
    assert_eq!(report.applied, vec!["002_b", "003_c"]);
    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gassi.db");
    let dialect = SqliteDialect::new();
    let runner = MigrationRunner::new(MigrationRegistry::builtin());

    let conn = SqliteConnection::open(SqliteConfig::file(&path)).await.unwrap();
    runner.run(&conn, &dialect).await.unwrap();
    conn.close().await.unwrap();

    let conn = SqliteConnection::open(SqliteConfig::file(&path)).await.unwrap();
    let status = runner.status(&conn, &dialect).await.unwrap();
    assert_eq!(status.applied, 9);
    assert_eq!(status.pending, 0);
}

#[tokio::test]
async fn unique_versions_rejects_duplicate_history() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    let dialect = SqliteDialect::new();
    conn.execute_batch(
        "CREATE TABLE schema_migrations (version TEXT NOT NULL, applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP);
         INSERT INTO schema_migrations (version) VALUES ('000_legacy');
         INSERT INTO schema_migrations (version) VALUES ('000_legacy');",
    )
    .await
    .unwrap();

    let registry = MigrationRegistry::new()
        .with(Migration::new("001_a", "a").sqlite("CREATE TABLE a (id INTEGER)"));
    let err = MigrationRunner::new(registry)
        .config(RunnerConfig::new().unique_versions(true))
        .run(&conn, &dialect)
        .await
        .unwrap_err();

    assert!(matches!(err, MigrationError::Bookkeeping { .. }));
    assert!(!tables(&conn).await.contains(&"a".to_string()));
}

#[tokio::test]
async fn unique_versions_blocks_second_record() {
    let conn = SqliteConnection::open_in_memory().await.unwrap();
    let registry = MigrationRegistry::new()
        .with(Migration::new("001_a", "a").sqlite("CREATE TABLE a (id INTEGER)"));

    MigrationRunner::new(registry)
        .config(RunnerConfig::new().unique_versions(true))
        .run(&conn, &SqliteDialect::new())
        .await
        .unwrap();

    let duplicate = conn
        .execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            &[SqlValue::from("001_a")],
        )
        .await;
    assert!(duplicate.is_err());
}
