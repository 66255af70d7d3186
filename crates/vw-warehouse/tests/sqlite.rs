use vw_model::{CanonicalRow, FieldValue, ImportProfile, ImportType, StateCode};
use vw_standards::StateProfile;
use vw_warehouse::{SqliteWarehouse, Warehouse, WarehouseConfig, WarehouseError, WriteStatement};

fn history(county: &str, voter: &str, date: &str, export: &str) -> CanonicalRow {
    CanonicalRow::new(vec![
        FieldValue::text(county),
        FieldValue::text(voter),
        FieldValue::text(date),
        FieldValue::text("GEN"),
        FieldValue::text("Y"),
        FieldValue::text(export),
    ])
}

fn florida_warehouse() -> (StateProfile, SqliteWarehouse) {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let warehouse = SqliteWarehouse::in_memory(&profile).expect("open");
    (profile, warehouse)
}

#[test]
fn test_ensure_schema_is_idempotent_and_seeds_counties() {
    let (_, mut warehouse) = florida_warehouse();
    warehouse.ensure_schema().expect("first");
    warehouse.ensure_schema().expect("second");
    assert_eq!(warehouse.count_rows("Counties").expect("count"), 67);
    assert_eq!(warehouse.count_rows("Histories").expect("count"), 0);
}

#[test]
fn test_write_many_replaces_on_primary_key() {
    let (profile, mut warehouse) = florida_warehouse();
    warehouse.ensure_schema().expect("schema");
    let layout = profile.layout(ImportType::Histories).expect("layout");
    let statement = WriteStatement::for_layout(layout);

    warehouse
        .write_many(
            &statement,
            &[
                history("ALA", "1", "2022-11-08", "2023-01-01"),
                history("ALA", "2", "2022-11-08", "2023-01-01"),
            ],
        )
        .expect("write");
    warehouse
        .write_many(&statement, &[history("ALA", "1", "2022-11-08", "2024-01-01")])
        .expect("rewrite");

    assert_eq!(warehouse.count_rows("Histories").expect("count"), 2);
    let export: String = warehouse
        .connection()
        .query_row(
            "SELECT export_date FROM Histories WHERE voter_id = 1",
            [],
            |row| row.get(0),
        )
        .expect("query");
    assert_eq!(export, "2024-01-01");
}

#[test]
fn test_failed_batch_is_rolled_back() {
    let (profile, mut warehouse) = florida_warehouse();
    warehouse.ensure_schema().expect("schema");
    let statement = WriteStatement::for_layout(profile.layout(ImportType::Histories).expect("layout"));

    let short = CanonicalRow::new(vec![FieldValue::text("ALA")]);
    let error = warehouse
        .write_many(
            &statement,
            &[history("ALA", "1", "2022-11-08", "2023-01-01"), short],
        )
        .unwrap_err();
    assert!(matches!(
        error,
        WarehouseError::ArityMismatch {
            expected: 6,
            actual: 1,
            ..
        }
    ));
    assert_eq!(warehouse.count_rows("Histories").expect("count"), 0);
}

#[test]
fn test_schema_mismatch_is_reported() {
    let (_, mut warehouse) = florida_warehouse();
    warehouse
        .connection()
        .execute_batch(
            "CREATE TABLE Histories (county_code TEXT, voter_id INTEGER, election_date TEXT,
             election_type TEXT, history_code TEXT);",
        )
        .expect("legacy table");
    let error = warehouse.ensure_schema().unwrap_err();
    match error {
        WarehouseError::SchemaMismatch { table, missing } => {
            assert_eq!(table, "Histories");
            assert!(missing.contains(&"export_date".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_config_driven_database_and_limits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yml");
    std::fs::write(
        &config_path,
        "UnitedStates:\n  Georgia:\n    database:\n      path: data/georgia.db\n    batch_limits:\n      histories: 1000\n",
    )
    .expect("write config");

    let config = WarehouseConfig::load(&config_path).expect("load");
    let section = config.state(StateCode::Georgia).expect("georgia");
    assert_eq!(section.database.path, dir.path().join("data/georgia.db"));

    let profile = StateProfile::load(StateCode::Georgia)
        .expect("georgia")
        .with_batch_limits(&section.batch_limits);
    let mut warehouse = SqliteWarehouse::from_config(&section, &profile).expect("open");
    warehouse.ensure_schema().expect("schema");
    assert_eq!(warehouse.batch_capacity(ImportType::Histories), 1000);
    assert_eq!(warehouse.count_rows("Counties").expect("count"), 160);
    assert!(dir.path().join("data/georgia.db").is_file());
}

#[test]
fn test_history_without_date_is_replaced_not_duplicated() {
    let profile = StateProfile::load(StateCode::Georgia).expect("georgia");
    let mut warehouse = SqliteWarehouse::in_memory(&profile).expect("open");
    warehouse.ensure_schema().expect("schema");
    let statement = WriteStatement::for_layout(profile.layout(ImportType::Histories).expect("layout"));
    let row = CanonicalRow::new(vec![
        FieldValue::text("009"),
        FieldValue::Integer(12345),
        FieldValue::Null,
        FieldValue::text("GE"),
        FieldValue::text("DE"),
        FieldValue::text(""),
        FieldValue::Integer(1),
        FieldValue::Integer(0),
        FieldValue::Integer(0),
    ]);

    warehouse.write_many(&statement, std::slice::from_ref(&row)).expect("first import");
    warehouse.write_many(&statement, &[row]).expect("second import");

    assert_eq!(warehouse.count_rows("Histories").expect("count"), 1);
    let date: String = warehouse
        .connection()
        .query_row("SELECT election_date FROM Histories", [], |row| row.get(0))
        .expect("query");
    assert_eq!(date, "");
}

#[test]
fn test_count_rows_rejects_unknown_tables() {
    let (_, mut warehouse) = florida_warehouse();
    warehouse.ensure_schema().expect("schema");
    let error = warehouse
        .count_rows("Histories; DROP TABLE Voters")
        .unwrap_err();
    assert!(matches!(error, WarehouseError::MissingTable { .. }));
    assert_eq!(warehouse.count_rows("Voters").expect("count"), 0);
}
