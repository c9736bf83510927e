use rusqlite::Connection;
use utiliverse_core::db::migrations::{current_user_version, latest_version};
use utiliverse_core::db::{open_db, open_db_in_memory, DbError};
use utiliverse_core::persist::keys::{BMI_UNIT, BMI_WEIGHT, CONVERTER_INPUT_VALUE, QR_INPUT};
use utiliverse_core::{
    clear_cache, persisted, AppContext, KvRepository, Notice, SqliteKvRepository, UnitSystem,
};

#[test]
fn fresh_store_is_migrated_to_latest_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());

    let table_exists: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(table_exists, 1);
}

#[test]
fn store_written_by_newer_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utiliverse.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == latest_version() + 1 && latest_supported == latest_version()
    ));
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("utiliverse.sqlite3");

    let conn = open_db(&path).unwrap();
    assert!(path.exists());
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
}

#[test]
fn remembered_inputs_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utiliverse.sqlite3");

    {
        let ctx = AppContext::open(&path).unwrap();
        let bmi = ctx.bmi();
        bmi.set_unit(UnitSystem::Imperial).unwrap();
        bmi.set_weight(" 150 ").unwrap();
        ctx.qr().set_text("https://example.com").unwrap();
    }

    let ctx = AppContext::open(&path).unwrap();
    let form = ctx.bmi().load_form().unwrap();
    assert_eq!(form.unit, UnitSystem::Imperial);
    assert_eq!(form.weight, "150");
    assert_eq!(form.height, "");
    assert_eq!(ctx.qr().text().unwrap(), "https://example.com");
}

#[test]
fn values_are_stored_as_json_text() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.bmi().set_unit(UnitSystem::Imperial).unwrap();
    ctx.bmi().set_weight("72.5").unwrap();

    let store = ctx.store();
    assert_eq!(store.get(BMI_UNIT).unwrap().as_deref(), Some("\"imperial\""));
    assert_eq!(store.get(BMI_WEIGHT).unwrap().as_deref(), Some("\"72.5\""));
}

#[test]
fn persisted_hook_reads_initial_then_writes_through() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    let mut counter = persisted(&repo, "tool_demo_counter", 0_i64).unwrap();
    assert_eq!(*counter.get(), 0);
    assert_eq!(repo.get("tool_demo_counter").unwrap(), None);

    counter.set(5).unwrap();
    assert_eq!(repo.get("tool_demo_counter").unwrap().as_deref(), Some("5"));

    let remounted = persisted(&repo, "tool_demo_counter", 0_i64).unwrap();
    assert_eq!(remounted.value(), 5);
    assert_eq!(remounted.key(), "tool_demo_counter");
}

#[test]
fn undecodable_value_falls_back_to_initial() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.store().set(BMI_UNIT, "not json").unwrap();
    ctx.store().set(BMI_WEIGHT, "42").unwrap();

    let form = ctx.bmi().load_form().unwrap();
    assert_eq!(form.unit, UnitSystem::Metric);
    // `42` decodes as a number, not as the remembered text field.
    assert_eq!(form.weight, "");
}

#[test]
fn clear_cache_only_removes_tool_namespace() {
    let ctx = AppContext::open_in_memory().unwrap();
    let store = ctx.store();
    store.set(BMI_WEIGHT, "\"70\"").unwrap();
    store.set(QR_INPUT, "\"hello\"").unwrap();
    store.set(CONVERTER_INPUT_VALUE, "\"12\"").unwrap();
    store.set("toolbox_layout", "\"grid\"").unwrap();
    store.set("toolXbmi", "\"kept\"").unwrap();

    assert_eq!(ctx.clear_cache().unwrap(), Notice::CacheCleared);
    assert_eq!(Notice::CacheCleared.to_string(), "Cache cleared!");

    assert_eq!(store.get(BMI_WEIGHT).unwrap(), None);
    assert_eq!(store.get(QR_INPUT).unwrap(), None);
    assert_eq!(store.get(CONVERTER_INPUT_VALUE).unwrap().as_deref(), Some("\"12\""));
    assert!(store.get("toolbox_layout").unwrap().is_some());
    assert!(store.get("toolXbmi").unwrap().is_some());
}

#[test]
fn clear_cache_reports_removed_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.set("tool_a", "1").unwrap();
    repo.set("tool_b", "2").unwrap();
    repo.set("unitConverter_toUnit", "\"cm\"").unwrap();

    assert_eq!(clear_cache(&repo).unwrap(), 2);
    assert_eq!(clear_cache(&repo).unwrap(), 0);
    assert_eq!(
        repo.keys_with_prefix("unitConverter_").unwrap(),
        vec!["unitConverter_toUnit".to_string()]
    );
}

#[test]
fn repository_rejects_blank_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    assert!(repo.set("  ", "1").is_err());
    assert!(repo.get("").is_err());
    assert!(repo.remove_prefix("").is_err());
}

#[test]
fn remove_reports_whether_key_existed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.set("tool_x", "1").unwrap();
    assert!(repo.remove("tool_x").unwrap());
    assert!(!repo.remove("tool_x").unwrap());
}
