use geist_db::{create_pool, Column, DbRuntimeSettings, SchemaError, Table};

const EVENTS: Table = Table {
    name: "events",
    columns: &[
        Column {
            name: "id",
            sql_type: "INTEGER",
            constraints: "PRIMARY KEY AUTOINCREMENT",
        },
        Column {
            name: "kind",
            sql_type: "TEXT",
            constraints: "NOT NULL",
        },
        Column {
            name: "at",
            sql_type: "TIMESTAMP",
            constraints: "DEFAULT CURRENT_TIMESTAMP",
        },
    ],
};

#[test]
fn table_survives_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("events.db");
    let path = path.to_str().expect("utf-8 temp path");

    {
        let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to create pool");
        let conn = pool.get().expect("failed to get connection");
        EVENTS.ensure(&conn).expect("failed to ensure table");
        conn.execute("INSERT INTO events (kind) VALUES ('boot')", [])
            .expect("failed to insert row");
    }

    let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to reopen pool");
    let conn = pool.get().expect("failed to get connection");
    EVENTS.ensure(&conn).expect("ensure on existing table should succeed");

    let (kind, at): (String, Option<String>) = conn
        .query_row("SELECT kind, at FROM events WHERE id = 1", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .expect("row should survive reopen");
    assert_eq!(kind, "boot");
    assert!(at.is_some(), "timestamp column should default to now");

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
        .expect("failed to prepare table query");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("failed to execute table query")
        .map(|r| r.expect("failed to read table name"))
        .collect();
    assert_eq!(tables, vec!["events".to_string()]);
}

#[test]
fn ensure_fails_on_read_only_store() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("ro.db");
    let path = path.to_str().expect("utf-8 temp path");

    {
        let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to create pool");
        let conn = pool.get().expect("failed to get connection");
        conn.execute_batch("CREATE TABLE marker (id INTEGER)")
            .expect("failed to create marker table");
    }

    let read_only = format!("file:{path}?mode=ro");
    let pool = create_pool(&read_only, DbRuntimeSettings::default())
        .expect("failed to open read-only pool");
    let conn = pool.get().expect("failed to get connection");

    let err = EVENTS
        .ensure(&conn)
        .expect_err("creating a table in a read-only store should fail");
    let SchemaError::CreateFailed { table, .. } = err;
    assert_eq!(table, "events");
}
