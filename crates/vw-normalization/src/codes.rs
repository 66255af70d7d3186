//! Name to code substitution against state code tables.

use vw_model::CodeTable;

use crate::error::{NormalizationError, Result};

/// Display name reserved for the fallback entry of county and election
/// type tables.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Party names compare with spaces and hyphens removed, lower-cased.
pub fn party_key(name: &str) -> String {
    name.replace([' ', '-'], "").to_lowercase()
}

/// County names compare with spaces removed, lower-cased.
pub fn county_key(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}

/// Resolve a party name by prefix.
///
/// `"rep"`, `"Republican"` and `"RE PUB"` all resolve to the Republican
/// code. An empty name stays empty. A prefix shared by several parties is
/// rejected.
pub fn party_code(table: &CodeTable, field: &str, value: &str) -> Result<String> {
    let key = party_key(value.trim());
    if key.is_empty() {
        return Ok(String::new());
    }
    let matches = table.find_by_prefix(&key, party_key);
    match matches.as_slice() {
        [entry] => Ok(entry.code.clone()),
        [] => Err(NormalizationError::UnknownParty {
            field: field.to_string(),
            value: value.to_string(),
        }),
        many => Err(NormalizationError::AmbiguousParty {
            field: field.to_string(),
            value: value.to_string(),
            candidates: many.iter().map(|entry| entry.name.clone()).collect(),
        }),
    }
}

/// Resolve a county name exactly, falling back to the `UNKNOWN` code.
pub fn county_code(table: &CodeTable, value: &str) -> Result<String> {
    let key = county_key(value);
    if let Some(entry) = table.find_normalized(&key, county_key) {
        return Ok(entry.code.clone());
    }
    table
        .code_of(UNKNOWN_NAME)
        .map(str::to_string)
        .ok_or_else(|| NormalizationError::MissingUnknownCode {
            table: table.label.clone(),
        })
}

/// Resolve an election type name exactly; empty means `UNKNOWN`.
pub fn election_type_code(table: &CodeTable, field: &str, value: &str) -> Result<String> {
    let name = if value.is_empty() { UNKNOWN_NAME } else { value };
    table
        .code_of(name)
        .map(str::to_string)
        .ok_or_else(|| NormalizationError::UnknownElectionType {
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use vw_model::CodeEntry;

    use super::*;

    fn counties() -> CodeTable {
        CodeTable::new(
            "counties",
            vec![
                CodeEntry::new("000", "UNKNOWN"),
                CodeEntry::new("044", "DEKALB"),
                CodeEntry::new("007", "BEN HILL"),
            ],
        )
    }

    #[test]
    fn county_match_ignores_spaces_and_case() {
        assert_eq!(county_code(&counties(), "Ben Hill"), Ok("007".to_string()));
        assert_eq!(county_code(&counties(), "benhill"), Ok("007".to_string()));
        assert_eq!(county_code(&counties(), "DeKalb"), Ok("044".to_string()));
    }

    #[test]
    fn county_without_unknown_entry_fails() {
        let table = CodeTable::new("bare", vec![CodeEntry::new("1", "ALAMANCE")]);
        assert_eq!(
            county_code(&table, "Nowhere"),
            Err(NormalizationError::MissingUnknownCode {
                table: "bare".to_string()
            })
        );
    }
}
