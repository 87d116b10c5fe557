//! Knowledge schema migrations.
//!
//! # Invariants
//! - Script versions are strictly increasing, starting at 1.
//! - Pending scripts run in one transaction; `user_version` is bumped after
//!   each script inside that transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs in apply order.
const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_knowledge_texts.sql"))];

/// Where a database's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current,
    Behind { db_version: u32 },
    Ahead { db_version: u32 },
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Compares the connection's schema version with `latest_version()`.
pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    let db_version = current_user_version(conn)?;
    let latest = latest_version();
    Ok(if db_version == latest {
        SchemaState::Current
    } else if db_version < latest {
        SchemaState::Behind { db_version }
    } else {
        SchemaState::Ahead { db_version }
    })
}

/// Fails unless the schema is exactly current; never migrates.
pub fn ensure_current(conn: &Connection) -> DbResult<()> {
    match schema_state(conn)? {
        SchemaState::Current => Ok(()),
        SchemaState::Behind { db_version } => Err(DbError::SchemaNotMigrated {
            db_version,
            expected: latest_version(),
        }),
        SchemaState::Ahead { db_version } => Err(DbError::SchemaTooNew {
            db_version,
            latest_supported: latest_version(),
        }),
    }
}

/// Runs every pending script; databases from newer builds are rejected.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = match schema_state(conn)? {
        SchemaState::Current => return Ok(()),
        SchemaState::Behind { db_version } => db_version,
        SchemaState::Ahead { .. } => return ensure_current(conn),
    };

    let tx = conn.transaction()?;
    for (version, sql) in SCRIPTS.iter().filter(|(version, _)| *version > from) {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={}",
        latest_version()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, ensure_current, latest_version, schema_state, SchemaState};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_is_behind_until_migrated() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(
            schema_state(&conn).unwrap(),
            SchemaState::Behind { db_version: 0 }
        );

        apply_migrations(&mut conn).unwrap();
        assert_eq!(schema_state(&conn).unwrap(), SchemaState::Current);
        assert!(ensure_current(&conn).is_ok());
    }

    #[test]
    fn ensure_current_distinguishes_old_and_new_schemas() {
        let conn = Connection::open_in_memory().unwrap();
        let err = ensure_current(&conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::SchemaNotMigrated { db_version: 0, expected } if expected == latest_version()
        ));
        assert_eq!(
            err.to_string(),
            format!("knowledge schema version 0 is not migrated; expected {}", latest_version())
        );

        conn.pragma_update(None, "user_version", 42).unwrap();
        let err = ensure_current(&conn).unwrap_err();
        assert!(err.to_string().contains("is newer than supported"));
    }
}
