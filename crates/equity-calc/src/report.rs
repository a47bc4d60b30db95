//! Plain-text console report.
//!
//! Layout, top to bottom: accumulated warnings, the optional per-month grant
//! breakdown, the total granted to date, then the ownership table.

use std::fmt::Write;

use equity_core::formatting::{
    display_width, format_percent, pad_left, pad_right, DISPLAY_PRECISION,
};
use equity_core::models::{AllocationLayout, GrantSummary, OwnershipRow, RunWarning};
use equity_data::analysis::CalculationResult;

const RULE: &str = "------------------------------------------------------";

/// Render the whole report as a string ready for stdout.
pub fn render_report(result: &CalculationResult, show_grants: bool) -> String {
    let mut out = String::new();

    if !result.warnings.is_empty() {
        out.push_str(&render_warnings(&result.warnings));
        out.push('\n');
    }

    if show_grants {
        out.push_str(&render_grants(&result.grants));
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Total % of Company Granted to Date: {}",
        format_percent(result.report.total_granted, DISPLAY_PRECISION)
    );
    out.push_str(RULE);
    out.push('\n');

    if result.report.rows.is_empty() {
        out.push_str("No ownership data to display.\n");
    } else {
        out.push_str(&render_table(&result.report.rows));
    }

    out
}

fn render_warnings(warnings: &[RunWarning]) -> String {
    let mut out = format!("Warnings ({}):\n", warnings.len());
    for warning in warnings {
        let _ = writeln!(out, "  - {}", warning);
    }
    out
}

fn render_grants(grants: &[GrantSummary]) -> String {
    let period_width = grants
        .iter()
        .map(|g| display_width(&g.period))
        .chain(std::iter::once("Month".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::from("Grants:\n");
    let _ = writeln!(
        out,
        "  {}  {}  {}  {}",
        pad_right("Month", period_width),
        pad_right("Layout", 16),
        pad_left("Members", 7),
        pad_left("Granted", 9),
    );

    for grant in grants {
        let layout = match grant.layout {
            AllocationLayout::Flat => "flat".to_string(),
            AllocationLayout::Categorized(n) if grant.forfeited_segments > 0 => {
                format!("{} categories*", n)
            }
            AllocationLayout::Categorized(n) => format!("{} categories", n),
        };
        let _ = writeln!(
            out,
            "  {}  {}  {}  {}",
            pad_right(&grant.period, period_width),
            pad_right(&layout, 16),
            pad_left(&grant.occurrences.to_string(), 7),
            pad_left(&format_percent(grant.pool_distributed, DISPLAY_PRECISION), 9),
        );
    }

    if grants.iter().any(|g| g.forfeited_segments > 0) {
        out.push_str("  * one or more categories named no contributors\n");
    }

    out
}

fn render_table(rows: &[OwnershipRow]) -> String {
    const GRANTED: &str = "Percentage of Granted";
    const TOTAL: &str = "Percentage of Total";

    let index_width = rows.len().to_string().len();
    let name_width = rows
        .iter()
        .map(|r| display_width(&r.username))
        .chain(std::iter::once("Username".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}  {}  {}",
        pad_left("", index_width),
        pad_right("Username", name_width),
        GRANTED,
        TOTAL,
    );

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            pad_left(&(i + 1).to_string(), index_width),
            pad_right(&row.username, name_width),
            pad_left(
                &format_percent(row.percentage_of_granted_pool, DISPLAY_PRECISION),
                GRANTED.len()
            ),
            pad_left(
                &format_percent(row.percentage_of_total, DISPLAY_PRECISION),
                TOTAL.len()
            ),
        );
    }

    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
