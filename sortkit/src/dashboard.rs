//! Dashboard page: three charts over a date range and a bestsellers table.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domlet::RenderSurface;
use futures::future::join_all;

use crate::chart::{ChartConfig, ChartSource, ColumnChart};
use crate::error::{Error, Result};
use crate::source::{DataSource, PageRequest};
use crate::table::{Column, SortState, SortType, Table, TableConfig};

/// Rows requested for the bestsellers table.
pub const BESTSELLERS_LIMIT: usize = 30;

/// Sort the bestsellers are fetched and shown with.
pub fn bestsellers_sort() -> SortState {
    SortState::desc("quantity")
}

/// Columns of the bestsellers table.
pub fn bestsellers_columns() -> Vec<Column> {
    vec![
        Column::new("title", "Name").sortable(),
        Column::new("subcategory", "Category"),
        Column::new("quantity", "Quantity")
            .sortable()
            .sort_type(SortType::Number),
        Column::new("price", "Price")
            .sortable()
            .sort_type(SortType::Number),
        Column::new("sales", "Sales")
            .sortable()
            .sort_type(SortType::Number),
    ]
}

/// Where the dashboard widgets get their data.
#[derive(Clone)]
pub struct DashboardSources {
    pub orders: Arc<dyn ChartSource>,
    pub sales: Arc<dyn ChartSource>,
    pub customers: Arc<dyn ChartSource>,
    pub bestsellers: Arc<dyn DataSource>,
}

/// Outcome of a range update. Each widget fails independently.
#[derive(Debug, Default)]
pub struct DashboardUpdate {
    /// Widget name and the error it reported.
    pub failures: Vec<(&'static str, Error)>,
}

impl DashboardUpdate {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, widget: &str) -> bool {
        self.failures.iter().any(|(name, _)| *name == widget)
    }
}

pub struct Dashboard {
    pub orders: ColumnChart,
    pub sales: ColumnChart,
    pub customers: ColumnChart,
    pub bestsellers: Table,
    bestsellers_source: Arc<dyn DataSource>,
    range: (DateTime<Utc>, DateTime<Utc>),
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Build the dashboard. `surface_for` is called once per widget with
    /// its name: `ordersChart`, `salesChart`, `customersChart` and
    /// `sortableTable`.
    pub fn new<S, F>(
        sources: DashboardSources,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        mut surface_for: F,
    ) -> Self
    where
        S: RenderSurface + 'static,
        F: FnMut(&str) -> S,
    {
        let orders = ColumnChart::new(
            ChartConfig::new("orders").with_link("/sales"),
            Vec::new(),
            surface_for("ordersChart"),
        )
        .with_source(sources.orders);
        let sales = ColumnChart::new(
            ChartConfig::new("sales").with_heading_format(|total| format!("${total}")),
            Vec::new(),
            surface_for("salesChart"),
        )
        .with_source(sources.sales);
        let customers = ColumnChart::new(
            ChartConfig::new("customers"),
            Vec::new(),
            surface_for("customersChart"),
        )
        .with_source(sources.customers);

        let bestsellers = Table::new(
            bestsellers_columns(),
            TableConfig::local()
                .with_initial_sort(bestsellers_sort())
                .with_row_link_base("/products"),
            surface_for("sortableTable"),
        )
        .with_shared_source(Arc::clone(&sources.bestsellers));

        Self {
            orders,
            sales,
            customers,
            bestsellers,
            bestsellers_source: sources.bestsellers,
            range: (from, to),
        }
    }

    /// Current date range.
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.range
    }

    /// Render the table and load every widget for the current range.
    pub async fn render(&mut self) -> DashboardUpdate {
        let mut update = DashboardUpdate::default();
        if let Err(error) = self.bestsellers.render().await {
            log::error!("Failed to initialize bestsellers table: {error}");
            update.failures.push(("bestsellers", error));
        }

        let (from, to) = self.range;
        let charts = self.update_charts(from, to).await;
        update.failures.extend(charts.failures);
        update
    }

    /// Switch to `[from, to]` and refresh every widget concurrently.
    pub async fn update_range(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DashboardUpdate {
        self.range = (from, to);
        log::debug!("Dashboard range {from} .. {to}");

        let (charts, bestsellers) = futures::join!(
            self.update_charts(from, to),
            self.update_bestsellers(from, to)
        );

        let mut update = charts;
        if let Err(error) = bestsellers {
            update.failures.push(("bestsellers", error));
        }
        update
    }

    async fn update_charts(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> DashboardUpdate {
        let charts = [
            ("orders", &self.orders),
            ("sales", &self.sales),
            ("customers", &self.customers),
        ];
        let results = join_all(charts.iter().map(|(name, chart)| async move {
            (*name, chart.load(from, to).await)
        }))
        .await;

        let mut update = DashboardUpdate::default();
        for (name, result) in results {
            if let Err(error) = result {
                log::error!("Failed to update {name} chart: {error}");
                update.failures.push((name, error));
            }
        }
        update
    }

    async fn update_bestsellers(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<()> {
        let request = PageRequest::range(Some(bestsellers_sort()), 0..BESTSELLERS_LIMIT)
            .with_param("from", from.to_rfc3339())
            .with_param("to", to.to_rfc3339());

        match self.bestsellers_source.fetch_page(&request).await {
            Ok(rows) => self.bestsellers.add_rows(rows),
            Err(error) => {
                log::error!("Failed to update bestsellers: {error}");
                Err(error.into())
            }
        }
    }

    pub fn destroy(&self) {
        self.orders.destroy();
        self.sales.destroy();
        self.customers.destroy();
        self.bestsellers.destroy();
    }
}
