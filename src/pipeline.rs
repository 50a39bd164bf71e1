//! Batch pipeline: source lines in, priced and rejected records out.
//!
//! This is where parsing, validation, pricing and the invariant check meet. Every
//! function here is deterministic over its input; tracing events are the only side
//! effect, so the outcomes are testable without touching stdin or the filesystem.

use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::model::{MalformedLine, PricedDelivery, RawDelivery, ValidationError};
use crate::parser::{self, ParseResult};
use crate::pricing::{check_invariant, check_invariant_json, compute_cost, BatchSummary};
use crate::source::SourceLine;
use crate::validation::validate_record;

/// A record that parsed but failed one or more field checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// 1-based input line (or position in a built-in batch).
    pub line_number: usize,
    /// Every failed check, in validation order. Serialized as messages.
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<ValidationError>,
}

fn serialize_messages<S>(errors: &[ValidationError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

/// Everything a pricing run produced, in input order within each list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Records that passed validation, with their costs.
    pub priced: Vec<PricedDelivery>,
    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,
    /// Lines that were not JSON objects.
    pub malformed: Vec<MalformedLine>,
    /// Count and grand total of `priced`.
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// Rejected plus malformed records, plus priced ones whose breakdown is inconsistent.
    pub fn failed_count(&self) -> usize {
        let inconsistent = self.priced.iter().filter(|p| !check_invariant(p)).count();
        self.rejected.len() + self.malformed.len() + inconsistent
    }
}

/// Validate then price one raw record.
///
/// # Errors
///
/// Returns every failed field check when the record is invalid.
pub fn price_one(raw: &RawDelivery) -> Result<PricedDelivery, Vec<ValidationError>> {
    let record = validate_record(raw).into_result()?;
    let priced = compute_cost(&record);
    debug!(
        zone = %record.zone(),
        total = priced.total(),
        "Priced delivery"
    );
    Ok(priced)
}

/// Parse, validate and price every source line.
///
/// Malformed and invalid lines are kept in the outcome and never stop the batch.
pub fn price_lines(lines: &[SourceLine]) -> BatchOutcome {
    let mut builder = OutcomeBuilder::default();

    for line in lines {
        match parser::parse_record_graceful(&line.text, line.number) {
            ParseResult::Valid(raw) => builder.push(line.number, &raw),
            ParseResult::Malformed(malformed) => {
                warn!(
                    line = malformed.line_number(),
                    error = malformed.error_message(),
                    "Skipping malformed line"
                );
                builder.malformed.push(malformed);
            }
        }
    }

    builder.finish()
}

/// Price already-deserialized records, numbering them from 1.
pub fn price_records(records: &[RawDelivery]) -> BatchOutcome {
    let mut builder = OutcomeBuilder::default();
    for (index, raw) in records.iter().enumerate() {
        builder.push(index + 1, raw);
    }
    builder.finish()
}

#[derive(Default)]
struct OutcomeBuilder {
    priced: Vec<PricedDelivery>,
    rejected: Vec<RejectedRecord>,
    malformed: Vec<MalformedLine>,
}

impl OutcomeBuilder {
    fn push(&mut self, line_number: usize, raw: &RawDelivery) {
        match price_one(raw) {
            Ok(priced) => self.priced.push(priced),
            Err(errors) => {
                warn!(line = line_number, errors = errors.len(), "Rejected delivery record");
                self.rejected.push(RejectedRecord {
                    line_number,
                    errors,
                });
            }
        }
    }

    fn finish(self) -> BatchOutcome {
        let summary = BatchSummary::from_results(&self.priced);
        info!(
            priced = summary.count,
            rejected = self.rejected.len(),
            malformed = self.malformed.len(),
            grand_total = summary.grand_total,
            "Batch complete"
        );
        BatchOutcome {
            priced: self.priced,
            rejected: self.rejected,
            malformed: self.malformed,
            summary,
        }
    }
}

// ===== Verification =====

/// Invariant status of one priced result read back from input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedLine {
    /// 1-based input line.
    pub line_number: usize,
    /// Reported total, when present and numeric.
    pub total: Option<f64>,
    /// Whether the components add up to the total.
    pub consistent: bool,
}

/// Result of re-checking a file of priced results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerifyOutcome {
    /// One entry per JSON object line.
    pub checked: Vec<VerifiedLine>,
    /// Lines that were not JSON objects.
    pub malformed: Vec<MalformedLine>,
}

impl VerifyOutcome {
    /// Lines that were malformed or failed the check.
    pub fn failed_count(&self) -> usize {
        self.checked.iter().filter(|line| !line.consistent).count() + self.malformed.len()
    }
}

/// Re-check the cost invariant on every line of priced output.
///
/// A line missing any component or the total counts as inconsistent.
pub fn verify_lines(lines: &[SourceLine]) -> VerifyOutcome {
    let mut outcome = VerifyOutcome::default();

    for line in lines {
        match parser::parse_object(&line.text, line.number) {
            Ok(value) => {
                let consistent = check_invariant_json(&value);
                if !consistent {
                    warn!(line = line.number, "Cost invariant violated");
                }
                outcome.checked.push(VerifiedLine {
                    line_number: line.number,
                    total: value.get("total").and_then(serde_json::Value::as_f64),
                    consistent,
                });
            }
            Err(err) => {
                warn!(line = line.number, error = %err, "Skipping malformed line");
                outcome
                    .malformed
                    .push(MalformedLine::new(line.number, &line.text, err.to_string()));
            }
        }
    }

    info!(
        checked = outcome.checked.len(),
        failed = outcome.failed_count(),
        "Verification complete"
    );
    outcome
}

/// The built-in demonstration batch.
pub fn sample_batch() -> Vec<RawDelivery> {
    vec![
        RawDelivery::new("zona1", 5.0, 0.3, false),
        RawDelivery::new("zona2", 15.0, 0.8, true),
        RawDelivery::new("zona3", 8.0, 0.4, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Zone;

    fn lines(texts: &[&str]) -> Vec<SourceLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| SourceLine::new(i + 1, *text))
            .collect()
    }

    // ===== price_lines =====

    #[test]
    fn price_lines_sorts_records_into_priced_rejected_and_malformed() {
        let input = lines(&[
            r#"{"zone":"zona1","weight":5.0,"volume":0.3,"critical_window":false}"#,
            r#"{"zone":"zona9","weight":-3,"volume":0.2,"critical_window":false}"#,
            "not json",
            r#"{"zona":"zona2","peso":15.0,"volume":0.8,"janela_critica":true}"#,
        ]);

        let outcome = price_lines(&input);

        assert_eq!(outcome.priced.len(), 2);
        assert_eq!(outcome.priced[0].record().zone(), Zone::Zone1);
        assert_eq!(outcome.priced[1].total(), 58.9);

        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line_number, 2);
        assert_eq!(outcome.rejected[0].errors.len(), 2);

        assert_eq!(outcome.malformed.len(), 1);
        assert_eq!(outcome.malformed[0].line_number(), 3);

        assert_eq!(outcome.summary.count, 2);
        assert_eq!(outcome.summary.grand_total, 73.9);
        assert_eq!(outcome.failed_count(), 2);
    }

    #[test]
    fn price_lines_empty_input_is_empty_outcome() {
        let outcome = price_lines(&[]);
        assert!(outcome.priced.is_empty());
        assert_eq!(outcome.summary, BatchSummary::default());
        assert_eq!(outcome.failed_count(), 0);
    }

    #[test]
    fn sample_batch_prices_to_known_grand_total() {
        let outcome = price_records(&sample_batch());
        let totals: Vec<f64> = outcome.priced.iter().map(PricedDelivery::total).collect();

        assert_eq!(totals, vec![15.0, 58.9, 35.0]);
        assert!((outcome.summary.grand_total - 108.9).abs() < 1e-9);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn price_one_returns_all_errors() {
        let errors = price_one(&RawDelivery::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejected_record_serializes_messages() {
        let rejected = RejectedRecord {
            line_number: 4,
            errors: vec![ValidationError::UnknownZone {
                zone: "zona7".to_string(),
            }],
        };
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["line_number"], 4);
        assert_eq!(
            json["errors"][0],
            "Zone 'zona7' is invalid. Valid zones: zona1, zona2, zona3, zona4"
        );
    }

    // ===== verify_lines =====

    #[test]
    fn verify_lines_accepts_own_output() {
        let priced = price_one(&RawDelivery::new("zona4", 12.0, 1.0, true)).unwrap();
        let text = serde_json::to_string(&priced).unwrap();

        let outcome = verify_lines(&lines(&[&text]));

        assert_eq!(outcome.checked.len(), 1);
        assert!(outcome.checked[0].consistent);
        assert_eq!(outcome.checked[0].total, Some(priced.total()));
        assert_eq!(outcome.failed_count(), 0);
    }

    #[test]
    fn verify_lines_flags_tampered_total_and_missing_fields() {
        let outcome = verify_lines(&lines(&[
            r#"{"base_cost":15,"toll_cost":0,"weight_surcharge":0,"volume_surcharge":0,"critical_window_cost":0,"total":16}"#,
            r#"{"total":15}"#,
            "[]",
        ]));

        assert!(!outcome.checked[0].consistent);
        assert!(!outcome.checked[1].consistent);
        assert_eq!(outcome.malformed.len(), 1);
        assert_eq!(outcome.failed_count(), 3);
    }

    #[test]
    fn verify_lines_accepts_portuguese_keys() {
        let outcome = verify_lines(&lines(&[
            r#"{"custo_base":25,"pedagio":5.5,"sobretaxa_peso":12.5,"sobretaxa_volume":0.9,"custo_janela_critica":15,"total":58.9}"#,
        ]));
        assert!(outcome.checked[0].consistent);
    }
}
