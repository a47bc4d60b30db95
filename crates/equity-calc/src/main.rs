mod bootstrap;
mod report;

use anyhow::{Context, Result};
use equity_core::settings::Settings;
use equity_data::analysis::calculate_from_path;
use equity_data::writer::write_ownership_json;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Equity calculator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Output: {}",
        settings.input.display(),
        settings.output.display()
    );

    // A missing or unreadable log leaves nothing to report.
    let result = calculate_from_path(&settings.input)
        .context("Cannot compute ownership without a readable grant log")?;

    print!("{}", report::render_report(&result, settings.show_grants));

    if settings.dry_run {
        tracing::info!("Dry run; ownership data not written");
        return Ok(());
    }

    write_ownership_json(&settings.output, &result.report.rows)?;
    println!(
        "\nEquity data successfully saved to: {}",
        settings.output.display()
    );

    Ok(())
}
