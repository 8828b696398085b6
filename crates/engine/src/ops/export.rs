//! CSV export of the record list.

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::{Filter, ResultEngine};

use super::Engine;

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    description: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: String,
}

impl Engine {
    /// Write the records matching `filter` as CSV, returning the row count.
    ///
    /// Amounts are in major units with two decimals (`12.50`).
    pub fn export_csv<W: Write>(&self, filter: Filter, writer: W) -> ResultEngine<usize> {
        let mut writer = Writer::from_writer(writer);
        let mut rows = 0;
        for tx in self.ledger.iter(filter) {
            writer.serialize(ExportRow {
                id: tx.id,
                description: &tx.description,
                kind: tx.kind.as_str(),
                amount: tx.amount.to_string(),
            })?;
            rows += 1;
        }
        writer.flush()?;
        tracing::debug!(rows, filter = filter.as_str(), "exported transactions");
        Ok(rows)
    }
}
