//! ARD export.

use std::io::Write;

use tracing::debug;

use crate::ard::{Ard, GROUP_COLUMN, INDEX_COLUMN, ROW_COLUMN, VALUE_COLUMN};
use crate::error::Result;

/// Writes the ARD as CSV with a `row,index,group,value` header.
pub fn write_ard_csv<W: Write>(ard: &Ard, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([ROW_COLUMN, INDEX_COLUMN, GROUP_COLUMN, VALUE_COLUMN])?;
    for record in ard {
        let row = record.row.to_string();
        out.write_record([&row, &record.index, &record.group, &record.value])?;
    }
    out.flush()?;
    debug!(records = ard.len(), "wrote ARD as CSV");
    Ok(())
}

/// Writes the ARD as a pretty-printed JSON array of records.
pub fn write_ard_json<W: Write>(ard: &Ard, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, ard)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(records = ard.len(), "wrote ARD as JSON");
    Ok(())
}
