// src/output/display.rs
// =============================================================================
// Prints results to the terminal.
//
// - print_json: the ranked list as a JSON array, for piping into other tools
// - print_table: the top N words as a table
// - print_summary: documents fetched/failed and word totals
// =============================================================================

use anyhow::Result;

use crate::pipeline::RunReport;
use crate::rank::RankedEntry;

/// Prints the ranking as pretty JSON: [{"word": "...", "count": N}, ...]
pub fn print_json(ranked: &[RankedEntry]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(ranked)?;
    println!("{}", json_output);
    Ok(())
}

/// Prints the first `top` entries as a human-readable table
pub fn print_table(ranked: &[RankedEntry], top: usize) {
    println!("{:<6} {:<20} {:>10}", "RANK", "WORD", "COUNT");
    println!("{}", "=".repeat(38));

    for (i, entry) in ranked.iter().take(top).enumerate() {
        println!("{:<6} {:<20} {:>10}", i + 1, entry.word, entry.count);
    }

    if ranked.len() > top {
        println!("... and {} more", ranked.len() - top);
    }
    println!();
}

pub fn print_summary(report: &RunReport) {
    println!("📊 Summary:");
    println!("   📄 Documents: {}", report.dispatched);
    println!("   ✅ Fetched: {}", report.succeeded);
    println!("   ❌ Failed: {}", report.failures.len());
    println!("   🔤 Distinct words: {}", report.table.len());
    println!("   📋 Total words: {}", report.tokens);

    for failure in &report.failures {
        println!("      - {}", failure);
    }
}
