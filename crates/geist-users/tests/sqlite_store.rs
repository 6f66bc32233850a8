use chrono::{TimeZone, Utc};
use geist_db::{create_pool, DbRuntimeSettings};
use geist_users::{NewUser, SqliteUserStore, UserError, UserStore};
use tempfile::TempDir;

fn setup_store() -> (SqliteUserStore, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("users.db");
    let pool = create_pool(
        path.to_str().expect("utf-8 temp path"),
        DbRuntimeSettings::default(),
    )
    .expect("failed to create pool");
    let store = SqliteUserStore::new(pool);
    store.ensure_schema().expect("failed to ensure schema");
    (store, dir)
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        created_at: Some(Utc::now()),
    }
}

#[test]
fn ensure_schema_twice_keeps_one_table() {
    let (store, _dir) = setup_store();
    store
        .ensure_schema()
        .expect("second ensure_schema should succeed");

    let conn = store.pool().get().unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn create_assigns_increasing_ids() {
    let (store, _dir) = setup_store();

    let mut last = 0;
    for i in 0..5 {
        let user = store
            .create(&new_user(&format!("user{i}"), &format!("user{i}@example.com")))
            .unwrap();
        assert!(user.id > last, "id {} should exceed {}", user.id, last);
        last = user.id;
    }
}

#[test]
fn get_returns_created_record() {
    let (store, _dir) = setup_store();
    let created = store.create(&new_user("Ada", "ada@example.com")).unwrap();

    let fetched = store.get(created.id).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Ada");
    assert_eq!(fetched.email, "ada@example.com");
}

#[test]
fn explicit_timestamp_is_preserved() {
    let (store, _dir) = setup_store();
    let at = Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 0).unwrap();
    let created = store
        .create(&NewUser {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            created_at: Some(at),
        })
        .unwrap();

    assert_eq!(created.created_at, Some(at));
    assert_eq!(store.get(created.id).unwrap().created_at, Some(at));
}

#[test]
fn unset_timestamp_uses_column_default() {
    let (store, _dir) = setup_store();
    let before = Utc::now() - chrono::Duration::seconds(5);

    let created = store
        .create(&NewUser {
            name: "Barbara".to_string(),
            email: "barbara@example.com".to_string(),
            created_at: None,
        })
        .unwrap();

    let at = created
        .created_at
        .expect("column default should stamp the row");
    assert!(at >= before, "default timestamp {at} should be recent");
}

#[test]
fn list_is_ordered_by_id() {
    let (store, _dir) = setup_store();
    assert!(store.list().unwrap().is_empty());

    for name in ["c", "a", "b"] {
        store
            .create(&new_user(name, &format!("{name}@example.com")))
            .unwrap();
    }

    let users = store.list().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.windows(2).all(|w| w[0].id <= w[1].id));
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn get_unknown_id_is_not_found() {
    let (store, _dir) = setup_store();
    match store.get(999_999) {
        Err(UserError::NotFound(id)) => assert_eq!(id, 999_999),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_table_surfaces_database_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    let pool = create_pool(path.to_str().unwrap(), DbRuntimeSettings::default()).unwrap();
    let store = SqliteUserStore::new(pool);

    let err = store.list().expect_err("list without schema should fail");
    assert!(matches!(err, UserError::Database(_)), "got {err:?}");
    assert!(err.to_string().contains("no such table"), "got {err}");
}
