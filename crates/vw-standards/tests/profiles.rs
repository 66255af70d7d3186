use std::collections::BTreeMap;

use vw_model::{
    DEFAULT_BATCH_CAPACITY, HeaderSource, ImportProfile, ImportType, SourceFormat, StateCode,
    Transform,
};
use vw_standards::{StateProfile, supported_import_types};

#[test]
fn test_every_state_loads() {
    for state in StateCode::ALL {
        let profile = StateProfile::load(state).expect("load profile");
        assert_eq!(profile.state(), state);
        assert!(!profile.import_types().is_empty());
        for import_type in profile.import_types() {
            let layout = profile.layout(import_type).expect("layout");
            assert_eq!(layout.state, state);
            assert_eq!(layout.import_type, import_type);
            assert!(!layout.fields.is_empty());
        }
    }
}

#[test]
fn test_florida_voter_layout() {
    let profile = StateProfile::load(StateCode::Florida).expect("load florida");
    let layout = profile.layout(ImportType::Voters).expect("voters");

    assert_eq!(layout.fields.len(), 38);
    assert_eq!(layout.fields[0].name, "county_code");
    assert_eq!(layout.fields[37].name, "email_address");
    assert!(layout.export_date);
    assert_eq!(layout.column_names().last(), Some(&"export_date"));

    let email = layout.field("email_address").expect("email");
    assert_eq!(email.transforms, vec![Transform::Suppress, Transform::Lowercase]);
    let birth = layout.field("birth_date").expect("birth_date");
    assert_eq!(birth.transforms, vec![Transform::Date]);
    let gender = layout.field("gender").expect("gender");
    assert!(gender.transforms.is_empty());
    let race = layout.field("race").expect("race");
    assert_eq!(race.transforms, vec![Transform::NullIfEmpty]);

    let suppressed = layout
        .fields
        .iter()
        .filter(|f| f.has_transform(Transform::Suppress))
        .count();
    assert_eq!(suppressed, 29);
}

#[test]
fn test_georgia_supports_histories_only() {
    assert_eq!(
        supported_import_types(StateCode::Georgia),
        vec![ImportType::Histories]
    );
    let profile = StateProfile::load(StateCode::Georgia).expect("load georgia");
    assert!(!profile.supports(ImportType::Voters));

    let tables = profile.code_tables();
    let counties = tables.counties.as_ref().expect("counties");
    assert_eq!(counties.len(), 160);
    assert_eq!(counties.code_of("UNKNOWN"), Some("000"));
    assert_eq!(counties.name_of("044"), Some("DEKALB"));
    assert!(tables.parties.is_some());
    assert_eq!(
        tables.election_types.as_ref().and_then(|t| t.code_of("UNKNOWN")),
        Some("UNK")
    );

    let layout = profile.layout(ImportType::Histories).expect("histories");
    let county = layout.field("county_code").expect("county_code");
    assert_eq!(county.aliases[0], "County Name");
    assert!(!layout.export_date);
}

#[test]
fn test_north_carolina_layouts() {
    let profile = StateProfile::load(StateCode::NorthCarolina).expect("load nc");
    let voters = profile.layout(ImportType::Voters).expect("voters");
    let histories = profile.layout(ImportType::Histories).expect("histories");
    assert_eq!(voters.fields.len(), 67);
    assert_eq!(histories.fields.len(), 15);
    assert_eq!(
        voters.field("registration_date").map(|f| f.transforms.clone()),
        Some(vec![Transform::Date])
    );
    let counties = profile.code_tables().counties.as_ref().expect("counties");
    assert_eq!(counties.name_of("65"), Some("NEW HANOVER"));
}

#[test]
fn test_batch_limits_override_default() {
    let mut limits = BTreeMap::new();
    limits.insert(ImportType::Voters, 5_000);
    let profile = StateProfile::load(StateCode::Florida)
        .expect("load florida")
        .with_batch_limits(&limits);
    assert_eq!(profile.batch_capacity(ImportType::Voters), 5_000);
    assert_eq!(
        profile.batch_capacity(ImportType::Histories),
        DEFAULT_BATCH_CAPACITY
    );
}

#[test]
fn test_legacy_reader_only_affects_headerless_layouts() {
    let florida = StateProfile::load(StateCode::Florida)
        .expect("load florida")
        .with_legacy_reader();
    assert_eq!(
        florida.layout(ImportType::Histories).map(|l| l.format),
        Some(SourceFormat::Positional { delimiter: b'\t' })
    );

    let georgia = StateProfile::load(StateCode::Georgia)
        .expect("load georgia")
        .with_legacy_reader();
    assert!(matches!(
        georgia.layout(ImportType::Histories).map(|l| l.format),
        Some(SourceFormat::Delimited {
            headers: HeaderSource::Embedded,
            ..
        })
    ));
}
