use std::io::Write;

use chrono::Local;
use recordlist_core::{ColumnKind, ColumnSpec, ListViewModel, Record, ACCOUNT_COLUMNS};
use recordlist_engine::ViewObserver;
use serde_json::Value;

const MAX_ROWS: usize = 20;
const MAX_CELL_WIDTH: usize = 24;

/// Writes the list to a terminal-like sink on every view change.
pub(crate) struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ViewObserver for TerminalRenderer<W> {
    fn view_changed(&mut self, view: &ListViewModel) {
        let stamp = Local::now().format("%H:%M:%S").to_string();
        for line in render(view, &stamp) {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }
}

pub(crate) fn render(view: &ListViewModel, stamp: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let search = if view.search_term.is_empty() {
        String::new()
    } else {
        format!(" | search: \"{}\"", view.search_term)
    };
    lines.push(format!("[{stamp}] Accounts: {}{search}", view.status_line()));
    if !view.has_records {
        return lines;
    }

    let rows: Vec<Vec<String>> = view
        .records
        .iter()
        .take(MAX_ROWS)
        .map(|record| ACCOUNT_COLUMNS.iter().map(|c| format_cell(c, record)).collect())
        .collect();
    let widths: Vec<usize> = ACCOUNT_COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(column.label.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let header: Vec<String> = ACCOUNT_COLUMNS.iter().map(|c| c.label.to_string()).collect();
    lines.push(format_row("  #", &header, &widths));
    for (idx, row) in rows.iter().enumerate() {
        lines.push(format_row(&format!("{:>3}", idx + 1), row, &widths));
    }
    if view.record_count > MAX_ROWS {
        lines.push(format!("    ... {} more", view.record_count - MAX_ROWS));
    }
    lines
}

fn format_row(prefix: &str, cells: &[String], widths: &[usize]) -> String {
    let body: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", truncate(cell, *width), width = *width))
        .collect();
    format!("{prefix} {}", body.join(" | ")).trim_end().to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}

fn format_cell(column: &ColumnSpec, record: &Record) -> String {
    match (record.field(column.field), column.kind) {
        (None | Some(Value::Null), _) => String::new(),
        (Some(Value::Number(number)), ColumnKind::Currency) => match number.as_f64() {
            Some(amount) => format_currency(amount),
            None => number.to_string(),
        },
        (Some(Value::String(text)), _) => text.clone(),
        (Some(other), _) => other.to_string(),
    }
}

fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_with_commas(amount.abs().round() as u64))
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordlist_core::EmptyState;
    use serde_json::json;

    fn view_of(records: Vec<Record>) -> ListViewModel {
        ListViewModel {
            record_count: records.len(),
            has_records: !records.is_empty(),
            records,
            ..ListViewModel::default()
        }
    }

    #[test]
    fn rows_are_numbered_and_revenue_formatted() {
        let record = Record::from_value(json!({
            "Id": "001",
            "Name": "Acme",
            "Industry": "Manufacturing",
            "AnnualRevenue": 1250000,
        }))
        .unwrap();

        let lines = render(&view_of(vec![record]), "12:00:00");

        assert_eq!(lines[0], "[12:00:00] Accounts: 1 record");
        assert!(lines[1].starts_with("  # Account Name"));
        assert!(lines[2].starts_with("  1 Acme"));
        assert!(lines[2].contains("Manufacturing"));
        assert!(lines[2].ends_with("$1,250,000"));
    }

    #[test]
    fn failure_renders_only_the_status_line() {
        let view = ListViewModel {
            search_term: "acme".to_string(),
            error_message: "timeout".to_string(),
            empty_state: Some(EmptyState::Failed {
                message: "timeout".to_string(),
            }),
            ..ListViewModel::default()
        };

        assert_eq!(
            render(&view, "09:30:00"),
            vec!["[09:30:00] Accounts: Error loading records: timeout | search: \"acme\"".to_string()]
        );
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc~");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(1234567), "1,234,567");
        assert_eq!(format_currency(-999.6), "-$1,000");
    }
}
