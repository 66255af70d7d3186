use vw_model::{CodeEntry, CodeTable, Transform};

fn parties() -> CodeTable {
    CodeTable::new(
        "parties",
        vec![
            CodeEntry::new("DE", "Democrat"),
            CodeEntry::new("RE", "Republican"),
            CodeEntry::new("NP", "Non-Partisan"),
            CodeEntry::new("LI", "Libertarian"),
        ],
    )
}

fn squash(value: &str) -> String {
    value.replace([' ', '-'], "").to_lowercase()
}

#[test]
fn test_exact_lookups() {
    let table = parties();
    assert_eq!(table.name_of("RE"), Some("Republican"));
    assert_eq!(table.code_of("Non-Partisan"), Some("NP"));
    assert_eq!(table.code_of("non-partisan"), None);
    assert_eq!(table.name_of("XX"), None);
}

#[test]
fn test_normalized_and_prefix_lookups() {
    let table = parties();
    let entry = table
        .find_normalized("nonpartisan", squash)
        .expect("normalized match");
    assert_eq!(entry.code, "NP");

    let matches = table.find_by_prefix("re", squash);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].code, "RE");

    // "l" is not a prefix of any normalized name other than Libertarian
    assert_eq!(table.find_by_prefix("l", squash).len(), 1);
    assert!(table.find_by_prefix("green", squash).is_empty());
}

#[test]
fn test_entries_keep_declaration_order() {
    let table = parties();
    let codes: Vec<&str> = table
        .entries()
        .iter()
        .map(|entry| entry.code.as_str())
        .collect();
    assert_eq!(codes, vec!["DE", "RE", "NP", "LI"]);
}

#[test]
fn test_transform_stages_are_ordered() {
    let mut transforms = vec![
        Transform::NullIfEmpty,
        Transform::Flag,
        Transform::Suppress,
        Transform::County,
        Transform::Date,
        Transform::Lowercase,
        Transform::ZeroIfEmpty,
    ];
    transforms.sort_by_key(|t| t.stage());
    assert_eq!(
        transforms,
        vec![
            Transform::Date,
            Transform::Suppress,
            Transform::Lowercase,
            Transform::County,
            Transform::Flag,
            Transform::ZeroIfEmpty,
            Transform::NullIfEmpty,
        ]
    );
    assert_eq!("election_type".parse::<Transform>(), Ok(Transform::ElectionType));
    assert!("uppercase".parse::<Transform>().is_err());
}
