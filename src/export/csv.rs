use crate::errors::AppResult;
use crate::export::model::SessionExport;
use std::io::Write;

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a BOM, the header line and one line per row.
pub fn write_csv<W: Write>(mut out: W, rows: &[SessionExport]) -> AppResult<()> {
    out.write_all(BOM)?;

    let mut wtr = csv::Writer::from_writer(out);
    if rows.is_empty() {
        wtr.write_record(["date", "status", "start", "end", "break", "work"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_starts_with_bom_and_header() {
        let rows = vec![SessionExport {
            date: "2025-09-01".into(),
            status: "complete".into(),
            start: "22:00".into(),
            end: "26:00".into(),
            break_time: "0:00".into(),
            work: "4:00".into(),
        }];
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();

        assert!(buf.starts_with(BOM));
        let text = String::from_utf8(buf[BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,status,start,end,break,work");
        assert_eq!(lines[1], "2025-09-01,complete,22:00,26:00,0:00,4:00");
    }

    #[test]
    fn empty_export_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf[BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.trim_end(), "date,status,start,end,break,work");
    }
}
