//! Database migrations using a versioned migration pattern.
//!
//! Each migration runs exactly once and is tracked in the `schema_migrations`
//! table. Migrations are applied in order by version number.

use rusqlite::{params, Connection};

/// A database migration with a version number, name, and SQL to execute.
pub struct Migration {
    /// Unique version number (migrations run in order)
    pub version: i64,
    /// Human-readable name for the migration
    pub name: &'static str,
    /// SQL to execute (can be multiple statements)
    pub sql: &'static str,
}

/// All migrations in order. New migrations should be added at the end.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_snapshots_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                kind TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "add_snapshots_updated_at",
        sql: "ALTER TABLE snapshots ADD COLUMN updated_at TEXT;",
    },
];

/// Ensure the schema_migrations bookkeeping table exists
fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )
}

/// Versions already recorded as applied
fn get_applied_versions(conn: &Connection) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();
    Ok(versions)
}

#[cfg(test)]
fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Run all pending migrations.
///
/// This is the main entry point for the migration system.
pub fn run_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    ensure_migrations_table(conn)?;

    let applied = get_applied_versions(conn)?;

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        // Execute the migration SQL and record it within a single transaction
        let now = chrono::Utc::now().to_rfc3339();
        let tx = conn.transaction()?;
        if let Err(e) = tx.execute_batch(migration.sql) {
            tracing::error!(
                version = migration.version,
                name = migration.name,
                error = %e,
                "Migration failed"
            );
            return Err(e);
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![migration.version, migration.name, now],
        )?;
        tx.commit()?;

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Migration applied successfully"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_migrations_have_unique_versions() {
        let mut versions = std::collections::HashSet::new();
        for migration in MIGRATIONS {
            assert!(
                versions.insert(migration.version),
                "Duplicate migration version: {}",
                migration.version
            );
        }
    }

    #[test]
    fn test_migrations_are_ordered() {
        let mut last_version = 0;
        for migration in MIGRATIONS {
            assert!(
                migration.version > last_version,
                "Migrations must be in ascending order: {} should come after {}",
                migration.version,
                last_version
            );
            last_version = migration.version;
        }
    }

    #[test]
    fn test_fresh_database_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        let applied = get_applied_versions(&conn).unwrap();
        assert_eq!(applied.len(), MIGRATIONS.len());

        assert!(table_exists(&conn, "snapshots").unwrap());
        assert!(table_exists(&conn, "schema_migrations").unwrap());
    }

    #[test]
    fn test_idempotent_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();

        // Run migrations twice
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        let applied = get_applied_versions(&conn).unwrap();
        assert_eq!(applied.len(), MIGRATIONS.len());
    }
}
