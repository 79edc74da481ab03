//! Dashboard client: fetches analytics rows from the API, tracks per-view
//! request state and renders tables and summary cards.

pub mod api;
pub mod format;
pub mod render;
pub mod summary;
pub mod view;

pub use api::{ClientConfig, ClientError, DashboardClient};
pub use view::{DashboardView, Ticket, ViewState, YearSelector};
