use crate::code_table::CodeTables;
use crate::import_type::ImportType;
use crate::layout::RecordLayout;
use crate::state::StateCode;

/// Default number of rows written per warehouse transaction.
pub const DEFAULT_BATCH_CAPACITY: usize = 200_000;

/// Per-state import contract.
///
/// A profile names the record kinds a state publishes and, for each of
/// them, the layout that drives mapping and normalization.
pub trait ImportProfile {
    fn state(&self) -> StateCode;

    /// Record kinds this state can import, in a stable order.
    fn import_types(&self) -> Vec<ImportType>;

    fn layout(&self, import_type: ImportType) -> Option<&RecordLayout>;

    fn code_tables(&self) -> &CodeTables;

    /// Rows per write transaction for a record kind.
    fn batch_capacity(&self, import_type: ImportType) -> usize {
        let _ = import_type;
        DEFAULT_BATCH_CAPACITY
    }

    fn supports(&self, import_type: ImportType) -> bool {
        self.layout(import_type).is_some()
    }
}
