//! Migrations shipped with Gassi.
//!
//! Bodies live under `migrations/<id>/<backend>.sql` and are compiled in.

use crate::migration::Migration;

macro_rules! builtin {
    ($id:literal, $description:literal) => {
        Migration::new($id, $description)
            .sqlite(include_str!(concat!("../migrations/", $id, "/sqlite.sql")))
            .mysql(include_str!(concat!("../migrations/", $id, "/mysql.sql")))
            .postgres(include_str!(concat!("../migrations/", $id, "/postgres.sql")))
    };
}

/// The application schema in ID order.
pub(crate) fn migrations() -> Vec<Migration> {
    vec![
        builtin!(
            "001_create_users_table",
            "Create users table with authentication and GDPR fields"
        ),
        builtin!("002_create_dogs_table", "Create dogs table with photo support"),
        builtin!(
            "003_create_bookings_table",
            "Create bookings table with foreign keys and constraints"
        ),
        builtin!(
            "004_create_blocked_dates_table",
            "Create blocked_dates table for admin date blocking"
        ),
        builtin!(
            "005_create_experience_requests_table",
            "Create experience_requests table for level promotions"
        ),
        builtin!(
            "006_create_system_settings_table",
            "Create system_settings table for runtime configuration"
        ),
        builtin!(
            "007_create_reactivation_requests_table",
            "Create reactivation_requests table for account reactivation workflow"
        ),
        builtin!(
            "008_insert_default_settings",
            "Insert default system settings"
        ),
        builtin!(
            "009_add_photo_thumbnail_column",
            "Add photo_thumbnail column to dogs table"
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_bodies_avoid_create_index() {
        for m in migrations() {
            let body = m.body("mysql").unwrap_or_default();
            assert!(!body.contains("CREATE INDEX"), "{}", m.id());
        }
    }

    #[test]
    fn test_postgres_thumbnail_is_idempotent() {
        let m = migrations()
            .into_iter()
            .find(|m| m.id() == "009_add_photo_thumbnail_column")
            .unwrap();
        assert!(m.body("postgres").unwrap().contains("ADD COLUMN IF NOT EXISTS"));
    }
}
