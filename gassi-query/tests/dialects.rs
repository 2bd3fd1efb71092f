//! Cross-dialect properties checked through the public API.

use gassi_query::{Dialect, DialectFactory, QueryError};
use pretty_assertions::assert_eq;

fn all_dialects() -> Vec<std::sync::Arc<dyn Dialect>> {
    let factory = DialectFactory::new();
    factory
        .list_supported()
        .iter()
        .map(|name| factory.get(name).unwrap())
        .collect()
}

#[test]
fn postgres_aliases_resolve_to_one_backend() {
    let factory = DialectFactory::new();
    assert_eq!(factory.get("postgresql").unwrap().name(), "postgres");
    assert_eq!(factory.get("postgres").unwrap().name(), "postgres");

    let listed = factory.list_supported();
    assert_eq!(listed.iter().filter(|n| n.as_str() == "postgres").count(), 1);
    assert!(!listed.contains(&"postgresql".to_string()));
}

#[test]
fn unbounded_text_is_text_everywhere() {
    for dialect in all_dialects() {
        assert_eq!(dialect.text_type(0), "TEXT", "{}", dialect.name());
    }
}

#[test]
fn bounded_text_is_varchar_except_sqlite() {
    for dialect in all_dialects() {
        let expected = if dialect.name() == "sqlite" {
            "TEXT"
        } else {
            "VARCHAR(255)"
        };
        assert_eq!(dialect.text_type(255), expected, "{}", dialect.name());
    }
}

#[test]
fn resolved_name_is_canonical() {
    let factory = DialectFactory::new();
    for name in factory.list_supported() {
        assert_eq!(factory.get(&name).unwrap().name(), name);
    }
}

#[test]
fn current_timestamp_is_portable() {
    for dialect in all_dialects() {
        assert_eq!(dialect.current_timestamp(), "CURRENT_TIMESTAMP");
        assert_eq!(dialect.placeholder(1), "?");
    }
}

#[test]
fn only_postgres_adds_columns_conditionally() {
    for dialect in all_dialects() {
        let sql = dialect.add_column("dogs", "photo_thumbnail", "TEXT");
        assert_eq!(
            sql.contains("IF NOT EXISTS"),
            dialect.supports_if_not_exists_column(),
            "{}",
            dialect.name()
        );
    }
}

#[test]
fn bookkeeping_ddl_per_backend() {
    let factory = DialectFactory::new();
    let render = |name: &str| {
        let d = factory.get(name).unwrap();
        format!(
            "CREATE TABLE IF NOT EXISTS schema_migrations (version {} NOT NULL, applied_at {} DEFAULT {}){}",
            d.text_type(255),
            d.timestamp_type(),
            d.current_timestamp(),
            d.table_suffix()
        )
    };

    assert_eq!(
        render("sqlite"),
        "CREATE TABLE IF NOT EXISTS schema_migrations (version TEXT NOT NULL, applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
    );
    assert_eq!(
        render("postgres"),
        "CREATE TABLE IF NOT EXISTS schema_migrations (version VARCHAR(255) NOT NULL, applied_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP)"
    );
    assert!(render("mysql").ends_with("DEFAULT CURRENT_TIMESTAMP) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"));
}

#[test]
fn unsupported_message_lists_backends() {
    let err = DialectFactory::new().get("Oracle").unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedDatabase { .. }));
    assert_eq!(
        err.to_string(),
        "unsupported database type: oracle (supported: mysql, postgres, sqlite)"
    );
}
