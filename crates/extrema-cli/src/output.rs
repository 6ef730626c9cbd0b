//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Prints rows as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints rows as CSV with a header line.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a number for display, spelling out non-finite values.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.prec$}", value, prec = precision)
    }
}

/// Formats a fraction as a percentage with two decimals.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", 100.0 * fraction)
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a number.
    pub fn from_number(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format_number(value, precision))
    }
}

/// Prints key-value results in the requested format.
///
/// JSON output is an object keyed by metric; minimal output prints the
/// value of `primary` only.
pub fn print_key_values(
    title: &str,
    results: &[KeyValue],
    primary: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(results)?;
        }
        OutputFormat::Json => {
            let output: serde_json::Map<String, serde_json::Value> = results
                .iter()
                .map(|r| (r.key.clone(), serde_json::Value::String(r.value.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_csv(results)?,
        OutputFormat::Minimal => {
            if let Some(r) = results.iter().find(|r| r.key == primary) {
                println!("{}", r.value);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.23456, 3), "1.235");
        assert_eq!(format_number(f64::NAN, 3), "NaN");
        assert_eq!(format_number(f64::INFINITY, 3), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY, 3), "-inf");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.125), "12.50%");
        assert_eq!(format_percent(1.0), "100.00%");
    }
}
