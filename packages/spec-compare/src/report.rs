//! Console rendering of the comparison table, best price, and AI verdict.
//!
//! Everything here is a pure function of its input; printing is up to the
//! caller.

use std::fmt::Write;

use crate::record::{Attribute, Cheapest, ComparisonVerdict, SpecRecord};

/// Width of every table column.
pub const COLUMN_WIDTH: usize = 20;

/// Placeholder for attributes a record does not have.
pub const MISSING: &str = "N/A";

const RULE_WIDTH: usize = 80;

/// Render the comparison table: a header row of product names, a dash rule,
/// and one row per attribute in `Attribute::ALL` order.
pub fn render(records: &[SpecRecord]) -> String {
    let mut table = String::new();

    let header = row("Specification", records.iter().map(|r| r.product_name.clone()));
    let _ = writeln!(table, "{}", header);
    let _ = writeln!(table, "{}", "-".repeat(rule_width(records.len())));

    for attribute in Attribute::ALL {
        let cells = records
            .iter()
            .map(|r| r.attribute(attribute).unwrap_or_else(|| MISSING.to_string()));
        let _ = writeln!(table, "{}", row(attribute.label(), cells));
    }

    table
}

fn row(label: &str, cells: impl Iterator<Item = String>) -> String {
    let mut line = format!("{:<width$}", label, width = COLUMN_WIDTH);
    for cell in cells {
        let _ = write!(line, " {:<width$}", cell, width = COLUMN_WIDTH);
    }
    line
}

fn rule_width(columns: usize) -> usize {
    RULE_WIDTH.max(COLUMN_WIDTH + columns * (COLUMN_WIDTH + 1))
}

/// The record with the lowest price.
///
/// Records without a price are ignored. Ties go to the earliest record.
pub fn pick_cheapest(records: &[SpecRecord]) -> Option<Cheapest> {
    let mut best: Option<(&SpecRecord, f64)> = None;

    for record in records {
        let Some(price) = record.price_value() else {
            continue;
        };
        match best {
            Some((_, best_price)) if price >= best_price => {}
            _ => best = Some((record, price)),
        }
    }

    best.and_then(|(record, _)| {
        record.price.clone().map(|price| Cheapest {
            product_name: record.product_name.clone(),
            price,
        })
    })
}

/// Full comparison section: title, table, and best-price line.
pub fn render_report(records: &[SpecRecord]) -> String {
    let rule = "=".repeat(rule_width(records.len()));
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "PRICE COMPARISON TABLE");
    let _ = writeln!(out, "{}", rule);
    out.push_str(&render(records));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    if let Some(winner) = pick_cheapest(records) {
        let _ = writeln!(out, "{}", best_price_line(&winner));
    }
    let _ = writeln!(out, "{}", rule);

    out
}

/// One-line summary of the price winner.
pub fn best_price_line(winner: &Cheapest) -> String {
    format!("Best Price: {} at ${}", winner.product_name, winner.price)
}

/// AI verdict section.
pub fn render_verdict(verdict: &ComparisonVerdict) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "AI Verdict");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Best Value Product: {}", verdict.best_value_product);
    let _ = writeln!(out, "Reason: {}", verdict.reason);

    for assessment in &verdict.comparison_summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", assessment.product_name);
        let _ = writeln!(out, "Strengths: {}", assessment.strengths.join(", "));
        let _ = writeln!(out, "Weaknesses: {}", assessment.weaknesses.join(", "));
    }

    out
}
