//! Table formatting utilities for CLI list commands
//!
//! Parts and products share one table renderer. Rows carry typed cells so
//! each output format can decide how a price or a count should look.

use console::style;
use std::fmt::Write as _;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::Entity;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "3 part(s) found.")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Entity id (cyan colored)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Part source (in-house or outsourced)
    Source(String),
    /// Price/cost, always two decimals
    Price(f64),
    /// Inventory level or bound
    Number(i64),
    /// Stock compared against its bounds, red when outside them
    Stock { level: i64, min: i64, max: i64 },
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Source(s) => {
                let styled = match s.as_str() {
                    "in-house" => style(s.as_str()).green(),
                    _ => style(s.as_str()).magenta(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Price(p) => format!("{:>width$.2}", p, width = width),
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Stock { level, min, max } => {
                let styled = if level < min || level > max {
                    style(level.to_string()).red().bold()
                } else {
                    style(level.to_string())
                };
                format!("{:>width$}", styled, width = width)
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Empty => String::new(),
            other => other.raw(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Empty => "-".to_string(),
            other => other.raw(),
        };
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Source(s) => s.clone(),
            CellValue::Price(p) => format!("{:.2}", p),
            CellValue::Number(n) => n.to_string(),
            CellValue::Stock { level, .. } => level.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Empty => 1,
            other => other.raw().chars().count(),
        }
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Build the columns every entity shares: id, name, stock, price and bounds
pub fn entity_row<E: Entity>(entity: &E) -> TableRow {
    TableRow::new(entity.id())
        .cell("id", CellValue::Id(entity.id().to_string()))
        .cell("name", CellValue::Text(entity.name().to_string()))
        .cell(
            "stock",
            CellValue::Stock {
                level: entity.stock().into(),
                min: entity.min().into(),
                max: entity.max().into(),
            },
        )
        .cell("price", CellValue::Price(entity.price()))
        .cell("min", CellValue::Number(entity.min().into()))
        .cell("max", CellValue::Number(entity.max().into()))
}

/// Table formatter that renders rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Print rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        print!("{}", self.render(rows, format));
    }

    /// Render rows in the specified format
    pub fn render<I>(&self, rows: I, format: OutputFormat) -> String
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();
        let mut out = String::new();

        match format {
            OutputFormat::Csv => self.render_csv(&rows, &mut out),
            OutputFormat::Md => self.render_md(&rows, &mut out),
            OutputFormat::Id => self.render_ids(&rows, &mut out),
            _ => self.render_tsv(&rows, &mut out),
        }
        out
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);

                // +2 so truncate_str does not clip content that fits
                col.header
                    .len()
                    .max(max_content.saturating_add(2))
                    .min(col.width)
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow], out: &mut String) {
        let widths = self.calculate_widths(rows);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        let _ = writeln!(out, "{}", header.join(" ").trim_end());

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(total_width));

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = *w),
                })
                .collect();
            let _ = writeln!(out, "{}", parts.join(" ").trim_end());
        }

        if self.config.show_summary {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} {}(s) found.",
                style(rows.len()).cyan(),
                self.entity_name
            );
        }
    }

    fn render_csv(&self, rows: &[TableRow], out: &mut String) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        let _ = writeln!(out, "{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            let _ = writeln!(out, "{}", values.join(","));
        }
    }

    fn render_md(&self, rows: &[TableRow], out: &mut String) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        let _ = writeln!(out, "| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        let _ = writeln!(out, "|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            let _ = writeln!(out, "| {} |", values.join(" | "));
        }
    }

    fn render_ids(&self, rows: &[TableRow], out: &mut String) {
        for row in rows {
            let _ = writeln!(out, "{}", row.id);
        }
    }
}
