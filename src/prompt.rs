//! Interactive single-record prompt.
//!
//! Answers are turned into a [`RawDelivery`] without judging them: an unparseable
//! weight stays a string and is reported by validation, alongside any other problem,
//! instead of aborting the prompt.

use std::io::{self, BufRead, Write};

use serde_json::Value;

use crate::model::{RawDelivery, VALID_ZONES};

const RULE_WIDTH: usize = 56;

/// Ask for one delivery on `output`, reading answers from `input`.
///
/// End of input before an answer leaves that field absent.
///
/// # Errors
///
/// Propagates I/O failures on either stream.
pub fn read_delivery<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<RawDelivery> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(output, "{rule}\n     URBAN DELIVERY COST CALCULATOR\n{rule}")?;

    let zone = ask(
        input,
        output,
        &format!("Destination zone ({}): ", VALID_ZONES.join("/")),
    )?
    .map(|answer| parse_zone(&answer));
    let weight = ask(input, output, "Parcel weight (kg): ")?.map(|answer| parse_number(&answer));
    let volume = ask(input, output, "Parcel volume (m³): ")?.map(|answer| parse_number(&answer));
    let critical_window =
        ask(input, output, "Critical delivery window? (y/n): ")?.map(|answer| parse_flag(&answer));

    Ok(RawDelivery {
        zone,
        weight,
        volume,
        critical_window,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

/// Zone identifiers are matched case-insensitively at the prompt.
fn parse_zone(answer: &str) -> Value {
    Value::String(answer.to_lowercase())
}

/// Accepts `,` as decimal separator. Anything unparseable is kept as text.
fn parse_number(answer: &str) -> Value {
    answer
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map_or_else(|| Value::String(answer.to_string()), Value::from)
}

fn parse_flag(answer: &str) -> Value {
    match answer.to_lowercase().as_str() {
        "y" | "yes" | "s" | "sim" | "true" => Value::Bool(true),
        "n" | "no" | "nao" | "não" | "false" => Value::Bool(false),
        _ => Value::String(answer.to_string()),
    }
}
