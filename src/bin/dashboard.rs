//! Terminal dashboard: fetches one view from the analytics API and prints
//! its summary cards and table.
//!
//! Usage: `cargo run --bin dashboard -- <revenue|customers|profit|fraud|returns> [--year <YYYY|all>]`
//!
//! Reads `DASHBOARD_API_URL` and `DASHBOARD_TIMEOUT_SECS` (reads .env).

use salesdash::client::render::{self, Table};
use salesdash::client::summary::{self, SummaryCard};
use salesdash::client::{ClientConfig, ClientError, DashboardClient, DashboardView, YearSelector};
use salesdash::models::filters::YearFilter;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: dashboard <revenue|customers|profit|fraud|returns> [--year <YYYY|all>]";

#[derive(Debug, Clone, Copy)]
enum View {
    Revenue,
    Customers,
    Profit,
    Fraud,
    Returns,
}

impl View {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "revenue" => Some(Self::Revenue),
            "customers" => Some(Self::Customers),
            "profit" => Some(Self::Profit),
            "fraud" => Some(Self::Fraud),
            "returns" => Some(Self::Returns),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Revenue => "Monthly Revenue",
            Self::Customers => "Customer Lifetime Value",
            Self::Profit => "Profit Margin by Category",
            Self::Fraud => "Failed Payment Customers",
            Self::Returns => "Product Returns",
        }
    }
}

struct Args {
    view: View,
    year: Option<YearFilter>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let view = args
        .next()
        .as_deref()
        .and_then(View::parse)
        .ok_or_else(|| anyhow::anyhow!(USAGE))?;

    let mut year = None;
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--year" => {
                let raw = args.next().ok_or_else(|| anyhow::anyhow!(USAGE))?;
                year = Some(raw.parse::<YearFilter>()?);
            }
            other => anyhow::bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }
    Ok(Args { view, year })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "salesdash=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = ClientConfig::from_env();
    let client = DashboardClient::new(&config)?;

    // A failed years lookup still leaves the "All" option usable.
    let years = match client.available_years().await {
        Ok(years) => years,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load available years");
            Vec::new()
        }
    };
    let mut selector = YearSelector::new(years);
    if let Some(year) = args.year {
        if !selector.select(year) {
            anyhow::bail!("no sales recorded for {year}");
        }
    }
    let year = selector.selected();

    println!("=== {} ({year}) ===\n", args.view.title());

    let output = match args.view {
        View::Revenue => {
            show(client.monthly_revenue(year).await, render::revenue_table, summary::revenue_cards)
        }
        View::Customers => show(
            client.customer_lifetime_value(year).await,
            render::customer_table,
            summary::customer_cards,
        ),
        View::Profit => show(
            client.category_profit_margin(year).await,
            render::profit_table,
            summary::profit_cards,
        ),
        View::Fraud => show(
            client.failed_payments(None, None).await,
            render::fraud_table,
            summary::fraud_cards,
        ),
        View::Returns => show(
            client.return_analytics(year).await,
            render::returns_table,
            summary::return_cards,
        ),
    };
    print!("{output}");

    Ok(())
}

fn show<T>(
    result: Result<Vec<T>, ClientError>,
    table: fn(&[T]) -> Table,
    cards: fn(&[T]) -> Vec<SummaryCard>,
) -> String {
    let mut view = DashboardView::new();
    let ticket = view.begin();
    view.complete(ticket, result);
    render::render_view(view.state(), table, cards)
}
