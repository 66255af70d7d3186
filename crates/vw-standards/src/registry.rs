//! State profile registry.

use std::collections::BTreeMap;

use vw_model::{
    CodeTables, DEFAULT_BATCH_CAPACITY, HeaderSource, ImportProfile, ImportType, RecordLayout,
    SourceFormat, StateCode,
};

use crate::error::Result;
use crate::states::{LayoutTable, florida, georgia, north_carolina};

/// Layout table for a state. Resolved by enum, never by name.
fn layout_table(state: StateCode) -> LayoutTable {
    match state {
        StateCode::Florida => florida::LAYOUTS,
        StateCode::Georgia => georgia::LAYOUTS,
        StateCode::NorthCarolina => north_carolina::LAYOUTS,
    }
}

fn load_code_tables(state: StateCode) -> Result<CodeTables> {
    match state {
        StateCode::Florida => florida::code_tables(),
        StateCode::Georgia => georgia::code_tables(),
        StateCode::NorthCarolina => north_carolina::code_tables(),
    }
}

/// Import types a state supports, without loading any data.
pub fn supported_import_types(state: StateCode) -> Vec<ImportType> {
    layout_table(state)
        .iter()
        .map(|(import_type, _)| *import_type)
        .collect()
}

/// A fully loaded state: layouts, code tables and batch limits.
///
/// Built once at startup and passed by reference into the importer.
#[derive(Debug, Clone)]
pub struct StateProfile {
    state: StateCode,
    layouts: BTreeMap<ImportType, RecordLayout>,
    code_tables: CodeTables,
    batch_limits: BTreeMap<ImportType, usize>,
}

impl StateProfile {
    /// Load the embedded profile for `state`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let profile = vw_standards::StateProfile::load(StateCode::Georgia)?;
    /// assert_eq!(profile.import_types(), vec![ImportType::Histories]);
    /// ```
    pub fn load(state: StateCode) -> Result<Self> {
        let mut layouts = BTreeMap::new();
        for (import_type, loader) in layout_table(state) {
            layouts.insert(*import_type, loader()?);
        }
        Ok(Self {
            state,
            layouts,
            code_tables: load_code_tables(state)?,
            batch_limits: BTreeMap::new(),
        })
    }

    /// Override the rows-per-transaction limit for some import types.
    #[must_use]
    pub fn with_batch_limits(mut self, limits: &BTreeMap<ImportType, usize>) -> Self {
        for (import_type, limit) in limits {
            self.batch_limits.insert(*import_type, *limit);
        }
        self
    }

    /// Switch headerless layouts to the legacy byte-split reader.
    ///
    /// Layouts whose files carry their own header keep their CSV reader,
    /// since positional decoding would read the header as data.
    #[must_use]
    pub fn with_legacy_reader(mut self) -> Self {
        for layout in self.layouts.values_mut() {
            if let SourceFormat::Delimited {
                delimiter,
                headers: HeaderSource::Supplied,
                ..
            } = layout.format
            {
                layout.format = SourceFormat::Positional { delimiter };
            }
        }
        self
    }

    pub fn layouts(&self) -> impl Iterator<Item = &RecordLayout> {
        self.layouts.values()
    }
}

impl ImportProfile for StateProfile {
    fn state(&self) -> StateCode {
        self.state
    }

    fn import_types(&self) -> Vec<ImportType> {
        self.layouts.keys().copied().collect()
    }

    fn layout(&self, import_type: ImportType) -> Option<&RecordLayout> {
        self.layouts.get(&import_type)
    }

    fn code_tables(&self) -> &CodeTables {
        &self.code_tables
    }

    fn batch_capacity(&self, import_type: ImportType) -> usize {
        self.batch_limits
            .get(&import_type)
            .copied()
            .unwrap_or(DEFAULT_BATCH_CAPACITY)
    }
}
