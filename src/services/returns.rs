//! Return analytics: groups the per-product-per-period view in memory.
//!
//! `type=all` groups by product, `type=year` by year and `type=month` by
//! (year, month). Each group sums sold/returned units and lost revenue,
//! derives `return_rate = returned / sold * 100` and drops groups without
//! any returns. Values are emitted unrounded; display rounding is the
//! client's job.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::{required_param, YearFilter};
use crate::models::returns::{ReturnAnalyticsRow, ReturnStatsRow};
use crate::models::rows::value_as_id;
use crate::store::AnalyticsStore;

pub const RETURNS_VIEW: &str = "product_returns_analytics";

/// Raw query string of `GET /api/analytics/returns`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnFilters {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnGrouping {
    Product,
    Year,
    Month,
}

/// Validated grouping request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnQuery {
    pub grouping: ReturnGrouping,
    pub year: YearFilter,
    pub month: Option<i32>,
}

impl ReturnQuery {
    pub fn parse(filters: &ReturnFilters) -> Result<Self, AppError> {
        let grouping = match filters.kind.as_deref().map(str::trim) {
            None | Some("") | Some("all") => ReturnGrouping::Product,
            Some("year") => ReturnGrouping::Year,
            Some("month") => ReturnGrouping::Month,
            Some(_) => return Err(AppError::invalid("type")),
        };

        let year = match grouping {
            ReturnGrouping::Month => {
                let raw = required_param(filters.year.as_deref(), "Year")?;
                match raw.parse::<YearFilter>()? {
                    YearFilter::All => return Err(AppError::invalid("year")),
                    year => year,
                }
            }
            _ => YearFilter::from_param(filters.year.as_deref())?,
        };

        let month = match filters.month.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| AppError::invalid("month"))?,
            ),
        };

        Ok(Self {
            grouping,
            year,
            month,
        })
    }

    fn keeps(&self, row: &ReturnStatsRow) -> bool {
        if !self.year.matches(row.year) {
            return false;
        }
        match self.month {
            Some(month) => row.month == Some(month),
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    sold: i64,
    returned: i64,
    revenue_lost: f64,
}

impl Totals {
    fn add(&mut self, row: &ReturnStatsRow) {
        // Unit counts come straight from the view; clamp rather than overflow.
        self.sold = self.sold.saturating_add(row.total_sold);
        self.returned = self.returned.saturating_add(row.total_returned);
        self.revenue_lost += row.revenue_lost;
    }

    fn return_rate(&self) -> f64 {
        if self.sold == 0 {
            return 0.0;
        }
        self.returned as f64 / self.sold as f64 * 100.0
    }

    fn into_row(self, key: GroupKey) -> ReturnAnalyticsRow {
        let return_rate = self.return_rate();
        ReturnAnalyticsRow {
            product_id: key.product_id,
            product_name: key.product_name,
            category_name: key.category_name,
            year: key.year,
            month: key.month,
            total_sold: self.sold,
            total_returned: self.returned,
            revenue_lost: self.revenue_lost,
            return_rate,
        }
    }
}

#[derive(Debug, Default)]
struct GroupKey {
    product_id: Option<Value>,
    product_name: Option<String>,
    category_name: Option<String>,
    year: Option<i32>,
    month: Option<i32>,
}

/// Group and derive return rates. Pure; the HTTP layer only feeds it rows.
pub fn aggregate(rows: &[ReturnStatsRow], query: &ReturnQuery) -> Vec<ReturnAnalyticsRow> {
    let rows = rows.iter().filter(|row| query.keeps(row));

    let mut grouped = match query.grouping {
        ReturnGrouping::Product => group_by_product(rows),
        ReturnGrouping::Year => group_by_period(rows.filter(|r| r.year.is_some()), |r| {
            (r.year.unwrap_or_default(), None)
        }),
        ReturnGrouping::Month => group_by_period(
            rows.filter(|r| r.year.is_some() && r.month.is_some()),
            |r| (r.year.unwrap_or_default(), r.month),
        ),
    };

    grouped.retain(|row| row.total_returned > 0);
    grouped
}

fn group_by_product<'a>(rows: impl Iterator<Item = &'a ReturnStatsRow>) -> Vec<ReturnAnalyticsRow> {
    let mut groups: HashMap<String, (GroupKey, Totals)> = HashMap::new();
    for row in rows {
        // `1` and `"1"` are the same product; rows without an id belong to none.
        let Some(id) = value_as_id(&row.product_id) else {
            tracing::debug!("Skipping returns row without product_id");
            continue;
        };
        let (_, totals) = groups.entry(id).or_insert_with(|| {
            (
                GroupKey {
                    product_id: Some(row.product_id.clone()),
                    product_name: row.product_name.clone(),
                    category_name: row.category_name.clone(),
                    ..GroupKey::default()
                },
                Totals::default(),
            )
        });
        totals.add(row);
    }

    let mut out: Vec<(String, ReturnAnalyticsRow)> = groups
        .into_iter()
        .map(|(id, (key, totals))| (id, totals.into_row(key)))
        .collect();

    // Highest return rate first; ties by product id for a stable order.
    out.sort_by(|(a_id, a), (b_id, b)| {
        b.return_rate
            .total_cmp(&a.return_rate)
            .then_with(|| a_id.cmp(b_id))
    });
    out.into_iter().map(|(_, row)| row).collect()
}

fn group_by_period<'a>(
    rows: impl Iterator<Item = &'a ReturnStatsRow>,
    key: impl Fn(&ReturnStatsRow) -> (i32, Option<i32>),
) -> Vec<ReturnAnalyticsRow> {
    let mut groups: BTreeMap<(i32, Option<i32>), Totals> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().add(row);
    }

    // Most recent period first.
    groups
        .into_iter()
        .rev()
        .map(|((year, month), totals)| {
            totals.into_row(GroupKey {
                year: Some(year),
                month,
                ..GroupKey::default()
            })
        })
        .collect()
}

/// Fetch the returns view and aggregate it as requested.
pub async fn get_return_analytics(
    store: &dyn AnalyticsStore,
    filters: &ReturnFilters,
) -> Result<Vec<ReturnAnalyticsRow>, AppError> {
    let query = ReturnQuery::parse(filters)?;

    tracing::debug!(view = RETURNS_VIEW, grouping = ?query.grouping, "Reading returns view");
    let raw = store.select_view(RETURNS_VIEW).await?;

    let rows: Vec<ReturnStatsRow> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed returns row");
                None
            }
        })
        .collect();

    Ok(aggregate(&rows, &query))
}
