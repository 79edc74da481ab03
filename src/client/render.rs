//! Plain-text rendering of dashboard views.

use std::fmt::Write as _;

use crate::models::returns::ReturnAnalyticsRow;
use crate::models::rows::{CustomerValueRow, FraudSignalRow, ProfitMarginRow, RevenueRow};

use super::format::{self, PLACEHOLDER};
use super::summary::SummaryCard;
use super::view::ViewState;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No data available for the selected filters.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Left-aligned columns separated by two spaces, header underlined.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_cards(cards: &[SummaryCard]) -> String {
    let width = cards.iter().map(|c| c.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for card in cards {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{:<width$}  {}", card.label, card.display());
    }
    out
}

/// Render a whole view: the status line for non-ready states, otherwise
/// the summary cards followed by the table.
pub fn render_view<T>(
    state: &ViewState<T>,
    table: impl FnOnce(&[T]) -> Table,
    cards: impl FnOnce(&[T]) -> Vec<SummaryCard>,
) -> String {
    match state {
        ViewState::Loading => format!("{LOADING_MESSAGE}\n"),
        ViewState::Empty => format!("{EMPTY_MESSAGE}\n"),
        ViewState::Failed(message) => format!("Failed to load data: {message}\n"),
        ViewState::Ready(rows) => {
            let mut out = render_cards(&cards(rows));
            out.push('\n');
            out.push_str(&table(rows).render());
            out
        }
    }
}

fn opt_text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn opt_currency(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format::currency(v, 2))
}

fn opt_percent(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format::percent(v, 2))
}

pub fn revenue_table(rows: &[RevenueRow]) -> Table {
    let mut table = Table::new(vec!["Period", "Revenue", "Orders", "Avg Order Value"]);
    for row in rows {
        table.push(vec![
            row.label(),
            format::currency(row.total_revenue, 2),
            format::count(row.total_orders as f64),
            opt_currency(row.avg_order_value),
        ]);
    }
    table
}

pub fn customer_table(rows: &[CustomerValueRow]) -> Table {
    let mut table = Table::new(vec!["Customer", "Segment", "Orders", "Lifetime Value"]);
    for row in rows {
        table.push(vec![
            row.customer_name
                .clone()
                .or_else(|| row.customer_id.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            opt_text(row.customer_segment.as_ref()),
            format::count(row.total_orders as f64),
            format::currency(row.total_revenue, 2),
        ]);
    }
    table
}

pub fn profit_table(rows: &[ProfitMarginRow]) -> Table {
    let mut table = Table::new(vec!["Category", "Revenue", "Cost", "Profit", "Margin"]);
    for row in rows {
        table.push(vec![
            opt_text(row.category_name.as_ref().or(row.product_name.as_ref())),
            format::currency(row.total_revenue, 2),
            format::currency(row.total_cost, 2),
            format::currency(row.total_profit, 2),
            opt_percent(row.profit_margin_percentage),
        ]);
    }
    table
}

pub fn fraud_table(rows: &[FraudSignalRow]) -> Table {
    let mut table = Table::new(vec!["Account", "Email", "Failed Attempts", "Last Failure"]);
    for row in rows {
        table.push(vec![
            row.subject_id().unwrap_or(PLACEHOLDER).to_string(),
            opt_text(row.email.as_ref()),
            row.failed_attempts
                .map_or_else(|| PLACEHOLDER.to_string(), |v| format::count(v as f64)),
            opt_text(row.last_failed_date.as_ref()),
        ]);
    }
    table
}

pub fn returns_table(rows: &[ReturnAnalyticsRow]) -> Table {
    let mut table = Table::new(vec![
        "Product", "Category", "Sold", "Returned", "Revenue Lost", "Return Rate",
    ]);
    for row in rows {
        table.push(vec![
            opt_text(row.product_name.as_ref()),
            opt_text(row.category_name.as_ref()),
            format::count(row.total_sold as f64),
            format::count(row.total_returned as f64),
            format::currency(row.revenue_lost, 2),
            format::percent(row.return_rate, 2),
        ]);
    }
    table
}
