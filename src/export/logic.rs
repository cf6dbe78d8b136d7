use crate::core::logic::MonthReport;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::write_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::model::sessions_to_rows;
use crate::export::notify_export_success;
use crate::ui::messages::warning;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the sessions of `report` to `path`. Returns the number of rows.
    pub fn export(
        report: &MonthReport,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(path, force)?;

        let rows = sessions_to_rows(&report.sessions);
        if rows.is_empty() {
            warning(format!(
                "No sessions in {}-{:02}; writing an empty file.",
                report.year, report.month
            ));
        }

        let out = BufWriter::new(File::create(path)?);
        match format {
            ExportFormat::Csv => write_csv(out, &rows)?,
            ExportFormat::Json => write_json(out, &rows)?,
        }

        info!(path = %path.display(), rows = rows.len(), format = format.as_str(), "export written");
        notify_export_success(format.label(), path);
        Ok(rows.len())
    }
}
