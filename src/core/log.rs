use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, CYAN, GREEN, MAGENTA, RED, RESET, YELLOW, display_width};
use rusqlite::Connection;

const MAX_TARGET_WIDTH: usize = 40;

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" => GREEN,
        "del" => RED,
        "edit" | "replace" => YELLOW,
        "rate" => CYAN,
        "init" => BLUE,
        _ => MAGENTA,
    }
}

fn op_target(e: &LogEntry) -> String {
    let s = if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    };

    if s.chars().count() > MAX_TARGET_WIDTH {
        let mut cut: String = s.chars().take(MAX_TARGET_WIDTH - 3).collect();
        cut.push_str("...");
        cut
    } else {
        s
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the internal log, one line per entry, oldest first.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);
        let op_w = entries
            .iter()
            .map(|e| display_width(&op_target(e)))
            .max()
            .unwrap_or(0);

        entries
            .iter()
            .map(|e| {
                let text = op_target(e);
                let pad = " ".repeat(op_w.saturating_sub(display_width(&text)));
                // Only the operation word is colored.
                let colored = match text.split_once(' ') {
                    Some((op, rest)) => {
                        format!("{}{op}{RESET} {rest}", color_for_operation(&e.operation))
                    }
                    None => format!("{}{text}{RESET}", color_for_operation(&e.operation)),
                };
                format!(
                    "{:>id_w$}: {:<date_w$} | {colored}{pad} => {}",
                    e.id, e.date, e.message
                )
            })
            .collect()
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}
