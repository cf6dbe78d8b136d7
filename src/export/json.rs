use crate::errors::AppResult;
use crate::export::model::SessionExport;
use std::io::Write;

/// Pretty-printed JSON array, no BOM.
pub fn write_json<W: Write>(mut out: W, rows: &[SessionExport]) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.write_all(b"\n")?;
    Ok(())
}
