//! CSV export of a ledger sequence.

use csv::WriterBuilder;
use serde::Serialize;

use crate::{EngineError, ResultEngine, Transaction, transactions::DATE_FORMAT};

/// Name offered to the browser for the download.
pub const EXPORT_FILE_NAME: &str = "transactions.csv";

const HEADER: [&str; 4] = ["text", "category", "amount", "date"];

#[derive(Serialize)]
struct ExportRow<'a> {
    text: &'a str,
    category: &'a str,
    amount: String,
    date: String,
}

/// Serializes the sequence in ledger order, one row per transaction.
///
/// The header row is always written, so an empty ledger still exports a valid
/// table.
pub fn export(sequence: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    writer.write_record(HEADER)?;
    for tx in sequence {
        writer.serialize(ExportRow {
            text: &tx.text,
            category: &tx.category,
            amount: tx.amount.to_string(),
            date: tx.date.format(DATE_FORMAT).to_string(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))
}
