//! Terminal rendering for dispatch outcomes
//!
//! Fixed precedence: unrecognized → usage summary; failure → error banner
//! (never also a table); plain text → as-is; message → text and/or table.
//! The layout functions are pure string builders so tests can assert exact
//! output; `render` adds the styling and prints.

use crate::outcome::{CommandResult, Outcome, Row};
use crate::patterns::PatternTable;
use console::style;

/// Print an outcome to stdout. Purely observational.
pub fn render(outcome: &Outcome, table: &PatternTable) {
    match outcome {
        Outcome::Unrecognized => {
            println!("{}", style("Command not recognized.").yellow());
            println!("{}", style("Available commands:").yellow());
            print!("{}", usage_summary(table));
        }
        Outcome::Completed { result, .. } => render_result(result),
    }
}

fn render_result(result: &CommandResult) {
    println!();
    match result {
        CommandResult::Failure { message, detail } => {
            println!("{} {}", style("Error:").red().bold(), message);
            if let Some(detail) = detail {
                println!("{} {}", style("Details:").dim(), detail);
            }
        }
        CommandResult::PlainText(value) => {
            println!("{}", style(value).green());
        }
        CommandResult::Message { text, rows } => {
            if let Some(text) = text {
                println!("{}", style(text).green());
            }
            if !rows.is_empty() {
                print!("{}", format_rows(rows));
            }
        }
    }
}

/// The fixed usage summary, one line per table entry. Derived from the
/// documented grammar strings, not from the recognizers.
pub fn usage_summary(table: &PatternTable) -> String {
    let mut out = String::new();
    for spec in table.specs() {
        out.push_str("  - ");
        out.push_str(spec.usage);
        out.push('\n');
    }
    out.push_str("\nExample: wp-cc create project called my-blog on port 8080\n");
    out
}

/// Lay out homogeneous rows as an ASCII table. The header is the first
/// row's columns in that row's order; body cells follow the same order.
/// Empty input yields an empty string.
pub fn format_rows(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.iter().map(|(col, _)| col.as_str()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, (_, value)) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(value.len());
            }
        }
    }

    let rule = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let format_line = |cells: &[&str]| {
        let mut line = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[i] - cell.len() + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&format_line(&headers));
    out.push_str(&rule);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(|(_, value)| value.as_str()).collect();
        out.push_str(&format_line(&cells));
    }
    out.push_str(&rule);
    out
}
