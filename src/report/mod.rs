//! Report rendering: boxed text breakdowns, batch summaries and JSON documents.
//!
//! Every function returns a `String`; writing it anywhere is the caller's job.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::model::{MalformedLine, PricedDelivery, ValidationError};
use crate::pipeline::{BatchOutcome, VerifyOutcome};
use crate::pricing::check_invariant;

/// Currency prefix of every amount.
pub const CURRENCY: &str = "R$";

/// Display columns between the two box borders.
const BOX_INNER_WIDTH: usize = 54;

/// Column where amounts start inside the cost box.
const LABEL_WIDTH: usize = 39;

/// Width of the `═` rule around section banners.
const BANNER_WIDTH: usize = 56;

/// Pad `text` with spaces to `width` display columns.
fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

fn boxed(left: &str, text: &str, right: &str) -> String {
    format!("{left} {}{right}", pad_to_width(text, BOX_INNER_WIDTH - 1))
}

fn rule(left: &str, fill: &str, right: &str) -> String {
    format!("{left}{}{right}", fill.repeat(BOX_INNER_WIDTH))
}

fn cost_row(label: &str, amount: f64) -> String {
    boxed(
        "│",
        &format!("{}{CURRENCY} {amount:>10.2}", pad_to_width(label, LABEL_WIDTH)),
        "│",
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `✓ OK` or `✗ ERROR`.
pub fn invariant_status(consistent: bool) -> &'static str {
    if consistent {
        "✓ OK"
    } else {
        "✗ ERROR"
    }
}

/// Itemized breakdown of one priced delivery.
pub fn render_breakdown(result: &PricedDelivery) -> String {
    let record = result.record();
    let costs = result.breakdown();

    let lines = [
        rule("╔", "═", "╗"),
        boxed("║", "DELIVERY BREAKDOWN", "║"),
        rule("╚", "═", "╝"),
        format!("Zone: {}", record.zone()),
        format!("Weight: {:.2} kg", record.weight()),
        format!("Volume: {:.3} m³", record.volume()),
        format!("Critical window: {}", yes_no(record.critical_window())),
        String::new(),
        rule("┌", "─", "┐"),
        boxed("│", "COST DETAILS", "│"),
        rule("├", "─", "┤"),
        cost_row("Base cost (zone):", costs.base_cost),
        cost_row("Toll:", costs.toll_cost),
        cost_row("Weight surcharge:", costs.weight_surcharge),
        cost_row("Volume surcharge:", costs.volume_surcharge),
        cost_row("Critical window cost:", costs.critical_window_cost),
        rule("├", "─", "┤"),
        cost_row("TOTAL:", costs.total),
        rule("└", "─", "┘"),
        format!("Invariant check: {}", invariant_status(check_invariant(result))),
    ];

    lines.join("\n") + "\n"
}

/// Bulleted validation errors, optionally tagged with the input line.
pub fn render_validation_errors(line_number: Option<usize>, errors: &[ValidationError]) -> String {
    let heading = match line_number {
        Some(line) => format!("✗ Validation errors (line {line}):"),
        None => "✗ Validation errors:".to_string(),
    };

    errors.iter().fold(heading + "\n", |mut out, error| {
        out.push_str(&format!("   • {error}\n"));
        out
    })
}

/// One-line notice for an unparseable input line.
pub fn render_malformed(line: &MalformedLine) -> String {
    format!("✗ Skipped line {}: {}\n", line.line_number(), line.error_message())
}

fn banner(title: &str) -> String {
    let bar = "═".repeat(BANNER_WIDTH);
    format!("{bar}\n     {title}\n{bar}\n")
}

/// Count, grand total and per-delivery totals of a priced batch.
pub fn render_summary(results: &[PricedDelivery], grand_total: f64) -> String {
    let mut out = banner("BATCH SUMMARY");
    out.push_str(&format!("Deliveries priced: {}\n", results.len()));
    out.push_str(&format!("Grand total: {CURRENCY} {grand_total:.2}\n"));

    for (index, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "\nDelivery {}: {} - {CURRENCY} {:.2}",
            index + 1,
            result.record().zone(),
            result.total()
        ));
    }
    if !results.is_empty() {
        out.push('\n');
    }
    out
}

/// Full text report of a pricing run.
///
/// A batch prints labelled sections (priced, rejected, skipped) followed by the summary.
/// Rejected and skipped entries carry their input line. A lone record prints bare.
pub fn render_batch(outcome: &BatchOutcome) -> String {
    let records = outcome.priced.len() + outcome.rejected.len() + outcome.malformed.len();
    if records == 1 {
        let lone = outcome
            .priced
            .iter()
            .map(render_breakdown)
            .chain(
                outcome
                    .rejected
                    .iter()
                    .map(|rejected| render_validation_errors(None, &rejected.errors)),
            )
            .chain(outcome.malformed.iter().map(render_malformed));
        return lone.collect();
    }

    let mut sections = Vec::new();
    if !outcome.priced.is_empty() {
        sections.push(banner("PRICED DELIVERIES"));
        sections.extend(outcome.priced.iter().map(render_breakdown));
    }
    if !outcome.rejected.is_empty() {
        sections.push(banner("REJECTED RECORDS"));
        sections.extend(outcome.rejected.iter().map(|rejected| {
            render_validation_errors(Some(rejected.line_number), &rejected.errors)
        }));
    }
    if !outcome.malformed.is_empty() {
        sections.push(banner("SKIPPED LINES"));
        sections.extend(outcome.malformed.iter().map(render_malformed));
    }
    sections.push(render_summary(&outcome.priced, outcome.summary.grand_total));

    sections.join("\n")
}

/// Text report of an invariant re-check.
pub fn render_verification(outcome: &VerifyOutcome) -> String {
    let mut out = banner("INVARIANT VERIFICATION");

    for line in &outcome.checked {
        let total = line
            .total
            .map_or_else(|| "no total".to_string(), |total| format!("{CURRENCY} {total:.2}"));
        out.push_str(&format!(
            "Line {}: {} - {}\n",
            line.line_number,
            total,
            invariant_status(line.consistent)
        ));
    }
    for line in &outcome.malformed {
        out.push_str(&render_malformed(line));
    }

    let passed = outcome.checked.len() + outcome.malformed.len() - outcome.failed_count();
    out.push_str(&format!(
        "\n{passed} of {} line(s) consistent\n",
        outcome.checked.len() + outcome.malformed.len()
    ));
    out
}

/// Pretty-printed JSON document of any report value.
///
/// # Errors
///
/// Propagates `serde_json` failures (only possible for non-string map keys).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
