//! Summary-card reducers. Recomputed from scratch on every render; row
//! counts are small.

use crate::models::returns::ReturnAnalyticsRow;
use crate::models::rows::{CustomerValueRow, FraudSignalRow, ProfitMarginRow, RevenueRow};

use super::format;

pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().filter(|v| v.is_finite()).sum()
}

/// Mean of the finite values, `None` when there are none.
pub fn average<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (total, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(total, n), v| (total + v, n + 1));
    (n > 0).then(|| total / n as f64)
}

/// Largest finite value, `None` for an empty input.
pub fn max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}

pub fn min<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormat {
    Currency { decimals: u32 },
    Count,
    Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: Option<f64>,
    pub format: CardFormat,
}

impl SummaryCard {
    fn new(label: &'static str, value: Option<f64>, format: CardFormat) -> Self {
        Self {
            label,
            value,
            format,
        }
    }

    pub fn display(&self) -> String {
        let Some(value) = self.value else {
            return format::PLACEHOLDER.to_string();
        };
        match self.format {
            CardFormat::Currency { decimals } => format::currency(value, decimals),
            CardFormat::Count => format::count(value),
            CardFormat::Percent => format::percent(value, 2),
        }
    }
}

const WHOLE_DOLLARS: CardFormat = CardFormat::Currency { decimals: 0 };
const CENTS: CardFormat = CardFormat::Currency { decimals: 2 };

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

pub fn revenue_cards(rows: &[RevenueRow]) -> Vec<SummaryCard> {
    let revenue = sum(rows.iter().map(|r| r.total_revenue));
    let orders = sum(rows.iter().map(|r| r.total_orders as f64));
    vec![
        SummaryCard::new("Total Revenue", Some(revenue), WHOLE_DOLLARS),
        SummaryCard::new("Total Orders", Some(orders), CardFormat::Count),
        SummaryCard::new("Average Order Value", ratio(revenue, orders), CENTS),
        SummaryCard::new(
            "Best Period",
            max(rows.iter().map(|r| r.total_revenue)),
            WHOLE_DOLLARS,
        ),
    ]
}

pub fn customer_cards(rows: &[CustomerValueRow]) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Customers", Some(rows.len() as f64), CardFormat::Count),
        SummaryCard::new(
            "Total Revenue",
            Some(sum(rows.iter().map(|r| r.total_revenue))),
            WHOLE_DOLLARS,
        ),
        SummaryCard::new(
            "Average Lifetime Value",
            average(rows.iter().map(|r| r.total_revenue)),
            CENTS,
        ),
        SummaryCard::new(
            "Top Customer Value",
            max(rows.iter().map(|r| r.total_revenue)),
            CENTS,
        ),
    ]
}

pub fn profit_cards(rows: &[ProfitMarginRow]) -> Vec<SummaryCard> {
    let revenue = sum(rows.iter().map(|r| r.total_revenue));
    let profit = sum(rows.iter().map(|r| r.total_profit));
    vec![
        SummaryCard::new("Total Revenue", Some(revenue), WHOLE_DOLLARS),
        SummaryCard::new("Total Profit", Some(profit), WHOLE_DOLLARS),
        SummaryCard::new(
            "Overall Margin",
            ratio(profit, revenue).map(|r| r * 100.0),
            CardFormat::Percent,
        ),
        SummaryCard::new(
            "Best Margin",
            max(rows.iter().filter_map(|r| r.profit_margin_percentage)),
            CardFormat::Percent,
        ),
        SummaryCard::new(
            "Worst Margin",
            min(rows.iter().filter_map(|r| r.profit_margin_percentage)),
            CardFormat::Percent,
        ),
    ]
}

pub fn fraud_cards(rows: &[FraudSignalRow]) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Flagged Accounts", Some(rows.len() as f64), CardFormat::Count),
        SummaryCard::new(
            "Max Failed Attempts",
            max(rows.iter().filter_map(|r| r.failed_attempts).map(|v| v as f64)),
            CardFormat::Count,
        ),
        SummaryCard::new(
            "Highest Return Rate",
            max(rows.iter().filter_map(|r| r.return_percentage)),
            CardFormat::Percent,
        ),
    ]
}

pub fn return_cards(rows: &[ReturnAnalyticsRow]) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new(
            "Units Returned",
            Some(sum(rows.iter().map(|r| r.total_returned as f64))),
            CardFormat::Count,
        ),
        SummaryCard::new(
            "Revenue Lost",
            Some(sum(rows.iter().map(|r| r.revenue_lost))),
            WHOLE_DOLLARS,
        ),
        SummaryCard::new(
            "Average Return Rate",
            average(rows.iter().map(|r| r.return_rate)),
            CardFormat::Percent,
        ),
        SummaryCard::new(
            "Worst Return Rate",
            max(rows.iter().map(|r| r.return_rate)),
            CardFormat::Percent,
        ),
    ]
}
