use anyhow::{Context, Result, bail};
use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use tracing::debug;

use vw_core::{ImportSummary, Importer, resolve_import_type};
use vw_model::{CodeTable, ImportProfile, StateCode};
use vw_standards::StateProfile;
use vw_warehouse::{SqliteWarehouse, WarehouseConfig};

use crate::cli::ImportArgs;

pub fn run_states() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["State", "Configuration key", "Import types", "Counties"]);
    apply_table_style(&mut table);
    for state in StateCode::ALL {
        let profile = StateProfile::load(state)
            .with_context(|| format!("load {} profile", state.display_name()))?;
        let import_types = profile
            .import_types()
            .iter()
            .map(|t| t.key())
            .collect::<Vec<_>>()
            .join(", ");
        let counties = profile
            .code_tables()
            .counties
            .as_ref()
            .map_or(0, CodeTable::len);
        table.add_row(vec![
            state.display_name().to_string(),
            format!("{}.{}", state.country_designation(), state.state_designation()),
            import_types,
            counties.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Validate the arguments in order, then run the import.
///
/// Order: state, configuration file, input file, import type, warehouse.
pub fn run_import(args: &ImportArgs) -> Result<ImportSummary> {
    let state: StateCode = args
        .state
        .parse()
        .with_context(|| format!("invalid --state '{}'", args.state))?;

    let config = WarehouseConfig::load(&args.config).context("load configuration")?;
    if !args.file.is_file() {
        bail!("input file not found: {}", args.file.display());
    }

    let profile = StateProfile::load(state).context("load state profile")?;
    let import_type = resolve_import_type(&profile, &args.import_type)?;

    let section = config.state(state)?;
    let mut profile = profile.with_batch_limits(&section.batch_limits);
    if section.legacy_reader {
        profile = profile.with_legacy_reader();
    }

    debug!(
        database = %section.database.path.display(),
        legacy_reader = section.legacy_reader,
        "resolved configuration"
    );
    let warehouse = SqliteWarehouse::from_config(&section, &profile).context("open warehouse")?;
    let mut importer = Importer::new(&profile, warehouse);
    let summary = importer.run(&args.file, import_type.key())?;
    Ok(summary)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
}
