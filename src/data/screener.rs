//! Screener export loader.
//!
//! Reads the daily gap screener CSV (`symbol,gap,opening price`). The
//! first record is a header. Fields follow RFC 4180 quoting, so a
//! quoted symbol such as `"BRK,B"` stays one field. Records with a
//! missing column or a non-numeric gap/price are skipped and counted,
//! never fatal.

use anyhow::Result;
use std::fs;
use tracing::{debug, info};

use crate::types::{GapscanError, ScreenerRow};

/// Rows parsed from one export, plus how many records were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenerLoad {
    pub rows: Vec<ScreenerRow>,
    pub dropped: usize,
}

/// Parse a finite float field; NaN and infinities count as unparseable.
fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split an export into records of fields, honouring RFC 4180 quoting:
/// a quoted field may hold commas, line breaks and `""` escaped quotes.
/// Whitespace around a quoted field is tolerated. Blank lines yield no
/// record.
fn split_records(contents: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

fn parse_record(fields: &[String]) -> Option<ScreenerRow> {
    let [symbol, gap, opening, ..] = fields else {
        return None;
    };
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return None;
    }

    Some(ScreenerRow {
        symbol: symbol.to_string(),
        gap_percent: parse_number(gap.trim())?,
        opening_price: parse_number(opening.trim())?,
    })
}

/// Parse a full export. Blank lines are ignored.
pub fn parse_screener(contents: &str) -> ScreenerLoad {
    let mut load = ScreenerLoad::default();

    for (idx, fields) in split_records(contents).iter().enumerate().skip(1) {
        match parse_record(fields) {
            Some(row) => load.rows.push(row),
            None => {
                debug!(record = idx + 1, ?fields, "Skipping unparseable screener row");
                load.dropped += 1;
            }
        }
    }

    load
}

/// Read and parse the export at `path`.
pub fn load_screener(path: &str) -> Result<ScreenerLoad> {
    let contents = fs::read_to_string(path).map_err(|e| GapscanError::Screener {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let load = parse_screener(&contents);
    info!(
        path,
        rows = load.rows.len(),
        dropped = load.dropped,
        "Screener loaded"
    );
    Ok(load)
}
