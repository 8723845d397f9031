//! Output formatting for the CLI.
//!
//! Human-readable lines are suppressed under `--json`; only the JSON
//! documents and errors are printed then.

use console::style;
use serde::Serialize;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn stdout(&self, line: impl std::fmt::Display) {
        if !self.json {
            println!("{}", line);
        }
    }

    fn stderr(&self, line: impl std::fmt::Display) {
        if !self.json {
            eprintln!("{}", line);
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        self.stdout(format_args!("{} {}", style("ℹ").blue(), msg));
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        self.stdout(format_args!("{} {}", style("✓").green(), msg));
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        self.stderr(format_args!("{} {}", style("⚠").yellow(), msg));
    }

    /// Print an error message. In JSON mode this is an `{"error": ...}` object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.stderr(format_args!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    /// Print a title, preceded by a blank line.
    pub fn header(&self, msg: &str) {
        self.stdout(format_args!("\n{}", style(msg).bold().underlined()));
    }

    /// Print a `[table]` heading as in the config file.
    pub fn section(&self, name: &str) {
        self.stdout(format_args!("\n{}", style(format!("[{}]", name)).cyan()));
    }

    /// Print a blank line.
    pub fn blank(&self) {
        self.stdout("");
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        self.stdout(format_args!("  {}: {}", style(key).dim(), value));
    }

    /// Print a bulleted item.
    pub fn list_item(&self, item: &str) {
        self.stdout(format_args!("  {} {}", style("•").dim(), item));
    }

    /// Print a row of left-aligned, padded columns.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        self.stdout(format_args!("  {}", format_row(cols, widths)));
    }

    /// Print a pretty JSON document. Printed in every mode.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to render JSON output"),
        }
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Stock badge for a product's remaining stock.
pub fn stock_badge(stock: i64) -> String {
    match stock {
        s if s <= 0 => style("out of stock").red().to_string(),
        s if s < 10 => style(format!("{} left", s)).yellow().to_string(),
        s => style(format!("{} in stock", s)).green().to_string(),
    }
}
