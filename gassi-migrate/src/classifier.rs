//! Recognises "object already exists" failures per backend.
//!
//! Migration bodies are expected to be idempotent, but some statements
//! (notably `ALTER TABLE ... ADD COLUMN` on SQLite and older MySQL) cannot
//! say `IF NOT EXISTS`. When such a statement fails because its target is
//! already in place, the runner treats the migration as applied.
//!
//! Matching is a case-insensitive substring test on the driver message.
//! Backends without rules never match.

use std::collections::HashMap;

use gassi_query::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    needle: String,
    verdict: bool,
}

/// Backend-keyed table of `(substring, verdict)` rules.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    rules: HashMap<String, Vec<Rule>>,
}

const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("sqlite", &["already exists", "duplicate column name"]),
    (
        "mysql",
        &["already exists", "duplicate column name", "duplicate key"],
    ),
    (
        "postgres",
        &["already exists", "duplicate column", "duplicate key value"],
    ),
];

impl Default for ErrorClassifier {
    fn default() -> Self {
        let mut classifier = Self::empty();
        for (backend, needles) in DEFAULT_RULES {
            for needle in *needles {
                classifier.add_rule(backend, needle, true);
            }
        }
        classifier
    }
}

impl ErrorClassifier {
    /// Classifier with the standard rules for every built-in backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier without any rules.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add a rule for `backend`.
    ///
    /// A matching rule with verdict `false` overrides every positive match,
    /// which lets callers carve exceptions out of a broad substring.
    pub fn add_rule(&mut self, backend: &str, substring: &str, verdict: bool) -> &mut Self {
        self.rules
            .entry(normalize(backend))
            .or_default()
            .push(Rule {
                needle: substring.to_lowercase(),
                verdict,
            });
        self
    }

    /// Whether `error` from `backend` means the migration's objects already exist.
    pub fn classify(&self, backend: &str, error: &QueryError) -> bool {
        if error.is_connection_error() {
            return false;
        }
        self.classify_message(backend, &error.to_string())
    }

    /// Same as [`classify`](Self::classify) on a raw driver message.
    pub fn classify_message(&self, backend: &str, message: &str) -> bool {
        let Some(rules) = self.rules.get(&normalize(backend)) else {
            return false;
        };
        let message = message.to_lowercase();

        let mut matched = false;
        for rule in rules.iter().filter(|r| message.contains(&r.needle)) {
            if !rule.verdict {
                return false;
            }
            matched = true;
        }
        matched
    }

    /// Backends with at least one rule, sorted.
    pub fn backends(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(backend: &str) -> String {
    backend.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_duplicate_column() {
        let classifier = ErrorClassifier::new();
        assert!(classifier.classify(
            "mysql",
            &QueryError::database("Duplicate column name 'photo_thumbnail'")
        ));
        assert!(!classifier.classify("mysql", &QueryError::database("connection refused")));
    }

    #[test]
    fn test_connection_errors_never_match() {
        let classifier = ErrorClassifier::new();
        let err = QueryError::connection("table users already exists");
        assert!(!classifier.classify("sqlite", &err));
    }

    #[test]
    fn test_per_backend_tables() {
        let classifier = ErrorClassifier::new();

        assert!(classifier.classify_message("sqlite", "table dogs already exists"));
        assert!(classifier.classify_message("sqlite", "duplicate column name: photo_thumbnail"));
        assert!(!classifier.classify_message("sqlite", "UNIQUE constraint failed: users.email"));

        assert!(classifier.classify_message(
            "postgres",
            "ERROR: column \"photo_thumbnail\" of relation \"dogs\" already exists (SQLSTATE 42701)"
        ));
        assert!(classifier.classify_message(
            "postgres",
            "duplicate key value violates unique constraint \"system_settings_pkey\""
        ));
        // "duplicate key" alone is a MySQL phrase.
        assert!(!classifier.classify_message("postgres", "duplicate key"));
        assert!(classifier.classify_message("mysql", "Duplicate key name 'idx_users_email'"));
    }

    #[test]
    fn test_unknown_backend_fails_closed() {
        let classifier = ErrorClassifier::new();
        assert!(!classifier.classify_message("oracle", "ORA-00955: name is already used"));
        assert!(!classifier.classify_message("oracle", "table already exists"));
        assert!(!ErrorClassifier::empty().classify_message("sqlite", "already exists"));
    }

    #[test]
    fn test_negative_rule_vetoes() {
        let mut classifier = ErrorClassifier::new();
        classifier.add_rule("sqlite", "index", false);

        assert!(classifier.classify_message("sqlite", "table dogs already exists"));
        assert!(!classifier.classify_message("sqlite", "index idx_dogs_available already exists"));
    }

    #[test]
    fn test_custom_backend() {
        let mut classifier = ErrorClassifier::empty();
        classifier
            .add_rule("MSSQL", "There is already an object named", true)
            .add_rule("mssql", "duplicate", true);

        assert_eq!(classifier.backends(), vec!["mssql"]);
        assert!(classifier.classify_message(
            "mssql",
            "There is already an object named 'dogs' in the database."
        ));
        assert!(classifier.classify_message(" MSSQL ", "duplicate key in object"));
        assert!(classifier.classify("MsSql", &QueryError::database("duplicate row")));
    }
}
