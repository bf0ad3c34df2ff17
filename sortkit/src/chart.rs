//! Column chart.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domlet::{Element, RenderSurface};

use crate::error::{Error, Result};
use crate::source::FetchError;

pub const HEADER: &str = "header";
pub const BODY: &str = "body";
pub const LOADING_CLASS: &str = "column-chart_loading";

/// Formats the chart heading.
pub type HeadingFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Values keyed by date, as served by a chart endpoint.
pub type Series = BTreeMap<String, f64>;

/// Something that serves chart values for a date range.
#[async_trait]
pub trait ChartSource: Send + Sync {
    async fn fetch(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> std::result::Result<Series, FetchError>;
}

/// Chart configuration.
#[derive(Clone)]
pub struct ChartConfig {
    pub label: String,
    /// "View all" link target, if any.
    pub link: Option<String>,
    /// Height of the tallest column.
    ///
    /// Default: 50
    pub chart_height: u32,
    /// Heading value before any data is loaded.
    pub value: f64,
    format_heading: Option<HeadingFormatter>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            link: None,
            chart_height: 50,
            value: 0.0,
            format_heading: None,
        }
    }
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartConfig")
            .field("label", &self.label)
            .field("link", &self.link)
            .field("chart_height", &self.chart_height)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl ChartConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_chart_height(mut self, height: u32) -> Self {
        self.chart_height = height;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_heading_format(
        mut self,
        format: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_heading = Some(Arc::new(format));
        self
    }

    pub fn format_heading(&self, value: f64) -> String {
        match &self.format_heading {
            Some(format) => format(value),
            None => value.to_string(),
        }
    }
}

/// One column of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColumn {
    /// Height in chart units.
    pub value: u64,
    /// Share of the maximum, e.g. `"50%"`.
    pub tooltip: String,
}

/// What the chart shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub heading: String,
    pub columns: Vec<ChartColumn>,
    pub loading: bool,
}

impl ChartView {
    /// Scale `data` so the largest value is `chart_height` tall.
    pub fn columns(data: &[f64], chart_height: u32) -> Vec<ChartColumn> {
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        data.iter()
            .map(|&value| {
                if max <= 0.0 {
                    return ChartColumn {
                        value: 0,
                        tooltip: "0%".to_string(),
                    };
                }
                ChartColumn {
                    value: (value * f64::from(chart_height) / max).floor().max(0.0) as u64,
                    tooltip: format!("{:.0}%", (value / max * 100.0).round()),
                }
            })
            .collect()
    }
}

struct ChartInner {
    config: ChartConfig,
    data: Vec<f64>,
    heading: String,
    surface: Box<dyn RenderSurface>,
}

impl ChartInner {
    fn view(&self) -> ChartView {
        ChartView {
            heading: self.heading.clone(),
            columns: ChartView::columns(&self.data, self.config.chart_height),
            loading: self.data.is_empty(),
        }
    }

    fn paint(&mut self) {
        if !self.surface.is_mounted() {
            return;
        }
        let root = chart_element(&self.config, &self.view());
        self.surface.mount(root);
    }
}

/// A column chart, optionally fed by a [`ChartSource`].
///
/// Cheap-clone handle; no lock is held while a source request is pending.
#[derive(Clone)]
pub struct ColumnChart {
    inner: Arc<RwLock<ChartInner>>,
    source: Option<Arc<dyn ChartSource>>,
}

impl fmt::Debug for ColumnChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnChart")
            .field("view", &self.view())
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl ColumnChart {
    /// Create a chart showing `data` and mount it into `surface`.
    pub fn new(
        config: ChartConfig,
        data: Vec<f64>,
        surface: impl RenderSurface + 'static,
    ) -> Self {
        let heading = config.format_heading(config.value);
        let mut inner = ChartInner {
            config,
            data,
            heading,
            surface: Box::new(surface),
        };
        let root = chart_element(&inner.config, &inner.view());
        inner.surface.mount(root);

        Self {
            inner: Arc::new(RwLock::new(inner)),
            source: None,
        }
    }

    /// Load values from `source` on [`load`](Self::load).
    pub fn with_source(mut self, source: Arc<dyn ChartSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn view(&self) -> Option<ChartView> {
        self.inner.read().ok().map(|g| g.view())
    }

    pub fn data(&self) -> Vec<f64> {
        self.inner
            .read()
            .map(|g| g.data.clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|g| g.data.is_empty()).unwrap_or(true)
    }

    /// Replace the data. An empty series puts the chart in loading state.
    pub fn update(&self, data: Vec<f64>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.data = data;
            guard.paint();
        }
    }

    /// Fetch values for `[from, to]` and show them with their total as the
    /// heading. On failure the chart is left loading and the error returned.
    pub async fn load(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Series> {
        let Some(source) = self.source.clone() else {
            return Err(Error::InvalidState("chart has no data source"));
        };

        if let Ok(mut guard) = self.inner.write() {
            guard.data.clear();
            guard.paint();
        }

        let series = match source.fetch(from, to).await {
            Ok(series) => series,
            Err(error) => {
                log::error!("Failed to load chart data: {error}");
                return Err(error.into());
            }
        };

        if let Ok(mut guard) = self.inner.write() {
            guard.data = series.values().copied().collect();
            if !guard.data.is_empty() {
                let total: f64 = guard.data.iter().sum();
                guard.heading = guard.config.format_heading(total);
            }
            guard.paint();
        }
        Ok(series)
    }

    pub fn destroy(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.surface.unmount();
        }
    }
}

fn chart_element(config: &ChartConfig, view: &ChartView) -> Element {
    let mut title = Element::div()
        .class("column-chart__title")
        .child(Element::text(config.label.clone()));
    if let Some(link) = &config.link {
        title = title.child(
            Element::link(link.clone())
                .class("column-chart__link")
                .child(Element::text("View all")),
        );
    }

    let columns = view.columns.iter().map(|column| {
        Element::div()
            .data("value", column.value.to_string())
            .data("tooltip", column.tooltip.clone())
    });

    let mut root = Element::div()
        .class("column-chart")
        .data("chart-height", config.chart_height.to_string())
        .child(title)
        .child(
            Element::div()
                .class("column-chart__container")
                .child(
                    Element::div()
                        .region(HEADER)
                        .class("column-chart__header")
                        .child(Element::text(view.heading.clone())),
                )
                .child(
                    Element::div()
                        .region(BODY)
                        .class("column-chart__chart")
                        .children(columns),
                ),
        );
    if view.loading {
        root = root.class(LOADING_CLASS);
    }
    root
}

/// Chart values held in memory, keyed by day.
#[derive(Debug, Clone, Default)]
pub struct MemoryChartSource {
    values: BTreeMap<NaiveDate, f64>,
}

impl MemoryChartSource {
    pub fn new(values: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ChartSource for MemoryChartSource {
    async fn fetch(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> std::result::Result<Series, FetchError> {
        let (from, to) = (from.date_naive(), to.date_naive());
        if from > to {
            return Ok(Series::new());
        }
        Ok(self
            .values
            .range(from..=to)
            .map(|(day, value)| (day.format("%Y-%m-%d").to_string(), *value))
            .collect())
    }
}
