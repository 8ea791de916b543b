// ABOUTME: Output formatting helpers for pantry-cli
// ABOUTME: Prints ingestion reports and search pages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pantry::{
    errors::AppResult,
    models::{IngestReport, SearchPage},
};

/// Print one line per recipe name with its outcome, then totals
pub fn display_ingest_report(report: &IngestReport) {
    let inserted = report.values().filter(|inserted| **inserted).count();
    for (name, was_inserted) in report {
        let status = if *was_inserted { "inserted" } else { "skipped" };
        println!("  {status:<8} {name}");
    }
    println!("{}", "=".repeat(40));
    println!(
        "{inserted} inserted, {} already present",
        report.len() - inserted
    );
}

/// Print the page as pretty `JSON`
pub fn display_search_page(page: &SearchPage) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(page)?);
    Ok(())
}
