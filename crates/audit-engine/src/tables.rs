//! Detection of tabular regions in reconstructed text.
//!
//! Billing statements lay out line items in whitespace-aligned columns.
//! Consecutive lines that split into three or more columns are
//! accumulated into a run; a run of at least two such lines becomes one
//! table, first line as headers.

use audit_types::TableBlock;
use lazy_static::lazy_static;
use regex::Regex;

/// Fixed confidence for detected tables; column alignment is a strong
/// but not certain signal.
const TABLE_CONFIDENCE: f64 = 0.8;

/// Minimum columns for a line to qualify as a table row.
const MIN_COLUMNS: usize = 3;

/// Minimum qualifying lines before a run is emitted as a table.
const MIN_ROWS: usize = 2;

lazy_static! {
    static ref COLUMN_GAP: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Splits a line into columns on runs of two or more whitespace
/// characters, trimming and dropping empties.
fn split_columns(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line.trim())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Finds contiguous blocks of multi-column lines and emits them as
/// tables. Runs shorter than two rows are discarded silently.
pub fn detect_tables(text: &str) -> Vec<TableBlock> {
    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let columns = split_columns(line);
        if columns.len() >= MIN_COLUMNS {
            run.push(columns);
        } else {
            flush_run(&mut run, &mut tables);
        }
    }
    flush_run(&mut run, &mut tables);

    tables
}

fn flush_run(run: &mut Vec<Vec<String>>, tables: &mut Vec<TableBlock>) {
    if run.len() >= MIN_ROWS {
        let mut rows = std::mem::take(run);
        let headers = rows.remove(0);
        tables.push(TableBlock {
            headers,
            rows,
            confidence: TABLE_CONFIDENCE,
        });
    } else {
        run.clear();
    }
}
