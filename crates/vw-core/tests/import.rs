use std::io::Write;
use std::path::Path;

use vw_core::{ImportError, ImportPhase, Importer};
use vw_ingest::IngestError;
use vw_model::{CanonicalRow, FieldValue, ImportProfile, ImportType, StateCode};
use vw_standards::StateProfile;
use vw_warehouse::{SqliteWarehouse, Warehouse, WarehouseError, WriteStatement};

/// Records every call instead of storing anything.
#[derive(Default)]
struct RecordingWarehouse {
    capacity: usize,
    schema_calls: usize,
    batches: Vec<Vec<CanonicalRow>>,
    tables: Vec<String>,
    write_calls: usize,
    /// 1-based `write_many` call that fails.
    fail_on_call: Option<usize>,
}

impl RecordingWarehouse {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }
}

impl Warehouse for RecordingWarehouse {
    fn ensure_schema(&mut self) -> vw_warehouse::Result<()> {
        self.schema_calls += 1;
        Ok(())
    }

    fn write_one(&mut self, statement: &WriteStatement, row: &CanonicalRow) -> vw_warehouse::Result<()> {
        self.write_many(statement, std::slice::from_ref(row))
    }

    fn write_many(&mut self, statement: &WriteStatement, rows: &[CanonicalRow]) -> vw_warehouse::Result<()> {
        self.write_calls += 1;
        if self.fail_on_call == Some(self.write_calls) {
            return Err(WarehouseError::MissingTable {
                table: statement.table().to_string(),
            });
        }
        self.tables.push(statement.table().to_string());
        self.batches.push(rows.to_vec());
        Ok(())
    }

    fn batch_capacity(&self, _import_type: ImportType) -> usize {
        self.capacity
    }
}

fn write_archive(path: &Path, members: &[(&str, String)]) {
    let file = std::fs::File::create(path).expect("create zip");
    let mut zip = zip::ZipWriter::new(file);
    let stamp = zip::DateTime::from_date_and_time(2024, 3, 5, 8, 0, 0).expect("date");
    let options = zip::write::SimpleFileOptions::default().last_modified_time(stamp);
    for (name, content) in members {
        if name.ends_with('/') {
            zip.add_directory(*name, options).expect("directory");
        } else {
            zip.start_file(*name, options).expect("start file");
            zip.write_all(content.as_bytes()).expect("write");
        }
    }
    zip.finish().expect("finish");
}

/// A tab-separated Florida voter line with the given fields set.
fn florida_voter(profile: &StateProfile, values: &[(&str, &str)]) -> String {
    let layout = profile.layout(ImportType::Voters).expect("voters layout");
    let mut line: Vec<&str> = vec![""; layout.fields.len()];
    for (name, value) in values {
        let index = layout
            .fields
            .iter()
            .position(|field| field.name == *name)
            .expect("known field");
        line[index] = value;
    }
    line.join("\t")
}

fn column(profile: &StateProfile, name: &str) -> usize {
    profile
        .layout(ImportType::Voters)
        .expect("voters layout")
        .fields
        .iter()
        .position(|field| field.name == name)
        .expect("known field")
}

#[test]
fn test_three_rows_capacity_two() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("20240305_VoterDetail.zip");
    let content = [
        florida_voter(
            &profile,
            &[("county_code", "ALA"), ("voter_id", "100"), ("name_last", "*"), ("birth_date", "04/01/1980")],
        ),
        florida_voter(
            &profile,
            &[("county_code", "ALA"), ("voter_id", "101"), ("name_last", "Doe"), ("birth_date", "04/01/80")],
        ),
        florida_voter(
            &profile,
            &[
                ("county_code", "ALA"),
                ("voter_id", "102"),
                ("name_last", "Roe"),
                ("birth_date", "12/31/1975"),
                ("registration_date", "01/15/2004"),
                ("email_address", "Roe@Example.com"),
            ],
        ),
    ]
    .join("\n");
    write_archive(&archive, &[("ALA_20240305.txt", content + "\n")]);

    let mut warehouse = RecordingWarehouse::with_capacity(2);
    let mut importer = Importer::new(&profile, &mut warehouse);
    assert_eq!(importer.phase(), ImportPhase::Idle);
    let summary = importer.run(&archive, "voters").expect("import");
    assert_eq!(importer.phase(), ImportPhase::Done);

    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].batches, 2);
    assert_eq!(summary.files[0].export_date.as_deref(), Some("2024-03-05"));

    assert_eq!(warehouse.schema_calls, 1);
    let sizes: Vec<usize> = warehouse.batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 1]);
    assert!(warehouse.tables.iter().all(|table| table == "Voters"));

    let rows: Vec<&CanonicalRow> = warehouse.batches.iter().flatten().collect();
    let name_last = column(&profile, "name_last");
    let birth_date = column(&profile, "birth_date");

    assert_eq!(rows[0].get(name_last), Some(&FieldValue::text("")));
    assert_eq!(rows[0].get(birth_date), Some(&FieldValue::text("1980-04-01")));
    assert_eq!(rows[1].get(birth_date), Some(&FieldValue::Null));
    assert_eq!(rows[2].get(birth_date), Some(&FieldValue::text("1975-12-31")));
    assert_eq!(
        rows[2].get(column(&profile, "email_address")),
        Some(&FieldValue::text("roe@example.com"))
    );
    assert_eq!(rows[2].values().last(), Some(&FieldValue::text("2024-03-05")));
}

#[test]
fn test_storage_failure_keeps_earlier_batches() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("histories.zip");
    let content: String = (1..=5)
        .map(|id| format!("ALA\t{id}\t11/08/2022\tGEN\tY\n"))
        .collect();
    write_archive(
        &archive,
        &[
            ("ALA_H.txt", content),
            ("DAD_H.txt", "DAD\t9\t11/08/2022\tGEN\tY\n".to_string()),
        ],
    );

    let mut warehouse = RecordingWarehouse {
        fail_on_call: Some(2),
        ..RecordingWarehouse::with_capacity(2)
    };
    let mut importer = Importer::new(&profile, &mut warehouse);
    let error = importer.run(&archive, "histories").unwrap_err();
    assert_eq!(importer.phase(), ImportPhase::Failed);
    assert!(matches!(
        error,
        ImportError::Warehouse(WarehouseError::MissingTable { .. })
    ));

    // The first full batch stays written; the failed one is dropped and
    // nothing after it is attempted, including the next entry.
    assert_eq!(warehouse.write_calls, 2);
    let sizes: Vec<usize> = warehouse.batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2]);
    assert_eq!(warehouse.batches[0][1].get(1), Some(&FieldValue::text("2")));
}

#[test]
fn test_summary_serializes_for_reports() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("histories.zip");
    write_archive(
        &archive,
        &[("ALA_H.txt", "ALA\t1\t11/08/2022\tGEN\tY\nALA\t2\t11/08/2022\tGEN\tN\n".to_string())],
    );

    let mut warehouse = RecordingWarehouse::with_capacity(1);
    let summary = Importer::new(&profile, &mut warehouse)
        .run(&archive, "histories")
        .expect("import");
    let json = serde_json::to_value(&summary).expect("serialize summary");
    assert_eq!(json["state"], "Florida");
    assert_eq!(json["import_type"], "histories");
    assert_eq!(json["total_records"], 2);
    assert_eq!(
        json["files"],
        serde_json::json!([{
            "entry": "ALA_H.txt",
            "records": 2,
            "batches": 2,
            "export_date": "2024-03-05",
        }])
    );
    assert!(json["elapsed"]["secs"].is_u64());
}

#[test]
fn test_unsupported_type_fails_before_any_io() {
    let profile = StateProfile::load(StateCode::Georgia).expect("georgia");
    let mut warehouse = RecordingWarehouse::with_capacity(10);
    let mut importer = Importer::new(&profile, &mut warehouse);

    let error = importer
        .run("/nonexistent/archive.zip", "voters")
        .unwrap_err();
    assert!(matches!(error, ImportError::UnsupportedImportType { .. }));
    assert_eq!(importer.phase(), ImportPhase::Failed);
    assert_eq!(warehouse.schema_calls, 0);
    assert!(warehouse.batches.is_empty());
}

#[test]
fn test_missing_archive_after_schema() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let mut warehouse = RecordingWarehouse::with_capacity(10);
    let error = Importer::new(&profile, &mut warehouse)
        .run("/nonexistent/archive.zip", "histories")
        .unwrap_err();
    assert!(matches!(
        error,
        ImportError::Ingest(IngestError::ArchiveNotFound { .. })
    ));
    assert_eq!(warehouse.schema_calls, 1);
}

#[test]
fn test_entries_in_archive_order_with_blank_rows() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("histories.zip");
    write_archive(
        &archive,
        &[
            ("nested/", String::new()),
            ("DAD_H.txt", "DAD\t1\t11/08/2022\tGEN\tY\n \t \nDAD\t2\t11/08/2022\tGEN\tA\n".to_string()),
            ("ALA_H.txt", "ALA\t3\t03/17/2020\tPPP\tN\n".to_string()),
        ],
    );

    let mut warehouse = RecordingWarehouse::with_capacity(100);
    let summary = Importer::new(&profile, &mut warehouse)
        .run(&archive, "histories")
        .expect("import");

    let entries: Vec<&str> = summary.files.iter().map(|f| f.entry.as_str()).collect();
    assert_eq!(entries, vec!["DAD_H.txt", "ALA_H.txt"]);
    assert_eq!(summary.files[0].records, 2);
    assert_eq!(summary.total_records, 3);
    assert_eq!(warehouse.batches.len(), 2);
    assert_eq!(
        warehouse.batches[1][0].values(),
        &[
            FieldValue::text("ALA"),
            FieldValue::text("3"),
            FieldValue::text("2020-03-17"),
            FieldValue::text("PPP"),
            FieldValue::text("N"),
            FieldValue::text("2024-03-05"),
        ]
    );
}

#[test]
fn test_normalization_error_names_the_record() {
    let profile = StateProfile::load(StateCode::Florida).expect("florida");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("bad.zip");
    write_archive(
        &archive,
        &[("ALA_H.txt", "ALA\t1\t11/08/2022\tGEN\tY\nALA\t2\t2022-11-08\tGEN\tY\n".to_string())],
    );

    let mut warehouse = RecordingWarehouse::with_capacity(100);
    let mut importer = Importer::new(&profile, &mut warehouse);
    let error = importer.run(&archive, "histories").unwrap_err();
    assert_eq!(importer.phase(), ImportPhase::Failed);
    match error {
        ImportError::Normalization { entry, record, .. } => {
            assert_eq!(entry, "ALA_H.txt");
            assert_eq!(record, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    // The failing row's batch never reached the warehouse.
    assert!(warehouse.batches.is_empty());
}

#[test]
fn test_georgia_histories_into_sqlite() {
    let profile = StateProfile::load(StateCode::Georgia).expect("georgia");
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("ga.zip");
    write_archive(
        &archive,
        &[(
            "ga_history.csv",
            "County Name,Voter Registration Number,Election Date,Election Type,Party,Ballot Style,Absentee,Provisional,Supplemental\n\
             BEN HILL,00012345,11/08/2022,GENERAL,Democrat,REGULAR,Y,N,\n\
             Atlantis,,05/24/2022,,Non-Partisan,,n,y,Y\n"
                .to_string(),
        )],
    );

    let warehouse = SqliteWarehouse::open(dir.path().join("ga.db"), &profile).expect("open");
    let mut importer = Importer::new(&profile, warehouse);
    let summary = importer.run(&archive, "histories").expect("import");
    assert_eq!(summary.total_records, 2);

    let warehouse = importer.into_warehouse();
    assert_eq!(warehouse.count_rows("Histories").expect("count"), 2);
    let (county, election_type, absentee): (String, String, i64) = warehouse
        .connection()
        .query_row(
            "SELECT county_code, election_type, absentee FROM Histories WHERE voter_id = 12345",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .expect("row");
    assert_eq!(county, "009");
    assert_eq!(election_type, "GE");
    assert_eq!(absentee, 1);

    let unknown: String = warehouse
        .connection()
        .query_row(
            "SELECT county_code FROM Histories WHERE voter_id = 0",
            [],
            |row| row.get(0),
        )
        .expect("row");
    assert_eq!(unknown, "000");
}
