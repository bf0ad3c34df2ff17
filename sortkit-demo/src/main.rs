use std::env;
use std::fs::File;
use std::sync::Arc;

use chrono::{Duration, Utc};
use domlet::{Document, Element, Event, MouseButton, Rect, ScrollSignal};
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};
use sortkit::chart::MemoryChartSource;
use sortkit::list::{GRAB_HANDLE, SortableList};
use sortkit::notification::{Notification, NotificationCenter, NotificationConfig};
use sortkit::prelude::*;

const VIEWPORT: Rect = Rect::new(0, 0, 80, 200);

fn init_logging() {
    let level = env::var("SORTKIT_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Debug);
    let path = env::var("SORTKIT_LOG_FILE").unwrap_or_else(|_| "sortkit-demo.log".to_string());

    let log_file = File::create(&path).expect("Failed to create log file");
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");
}

fn products(count: usize) -> Vec<Row> {
    const NAMES: [&str; 6] = ["Ёлка", "apple", "Banana", "елка", "Cherry", "banana"];
    (0..count)
        .map(|i| {
            let row = json!({
                "id": format!("product-{i}"),
                "title": format!("{} {i}", NAMES[i % NAMES.len()]),
                "quantity": (i * 7) % 23,
                "price": 10 + (i * 13) % 90,
                "sales": (i * 31) % 500,
                "subcategory": "fruit",
            });
            Row::try_from(row).unwrap_or_default()
        })
        .collect()
}

async fn table_demo() -> sortkit::Result<()> {
    let document = Document::new();
    let source = MemorySource::new(products(45));
    let table = Table::new(
        vec![
            Column::new("title", "Name").sortable(),
            Column::new("quantity", "Quantity")
                .sortable()
                .sort_type(SortType::Number),
            Column::new("price", "Price")
                .sortable()
                .sort_type(SortType::Number),
        ],
        TableConfig::remote(20).with_row_link_base("/products"),
        document.clone(),
    )
    .with_source(source.clone());

    table.render().await?;
    table.on_header_click("title").await?;
    while table
        .on_scroll(ScrollSignal::new(0, VIEWPORT.height))
        .await?
        != LoadOutcome::Skipped
    {}

    println!("== table ({} rows, {:?})", table.len(), table.load_state());
    for row in table.rows().iter().take(5) {
        println!("  {}", row.get("title").cloned().unwrap_or_default());
    }
    println!("  requests: {}", source.request_count());
    Ok(())
}

fn list_demo() -> sortkit::Result<()> {
    let document = Document::new();
    let row = |text: &str| {
        Element::div()
            .child(Element::span().data(GRAB_HANDLE, "").height(2))
            .child(Element::text(text))
    };
    let list = SortableList::new(
        ["Alpha", "Bravo", "Charlie", "Delta"].map(row),
        document.clone(),
    );

    // Grab the third item and drop it above the second.
    let layout = document.layout(VIEWPORT);
    let third = list.order()[2].to_string();
    let grab_y = layout.get(&third).map(|r| r.y).unwrap_or_default();
    list.handle_event(
        &Event::PointerDown {
            x: 1,
            y: grab_y,
            button: MouseButton::Left,
        },
        &layout,
    )?;
    let layout = document.layout(VIEWPORT);
    list.handle_event(&Event::PointerMove { x: 1, y: 4 }, &layout)?;
    list.handle_event(&Event::PointerUp { x: 1, y: 4 }, &layout)?;

    println!("== list");
    for item in list.items() {
        println!("  {}", item.content().text_content());
    }
    Ok(())
}

async fn dashboard_demo() {
    let today = Utc::now();
    let days = (0..30).map(|d| ((today - Duration::days(d)).date_naive(), (d * 3 % 17) as f64));
    let chart_source: Arc<dyn ChartSource> = Arc::new(MemoryChartSource::new(days));
    let sources = DashboardSources {
        orders: Arc::clone(&chart_source),
        sales: Arc::clone(&chart_source),
        customers: chart_source,
        bestsellers: Arc::new(MemorySource::new(products(12))),
    };

    let mut dashboard =
        Dashboard::new(sources, today - Duration::days(30), today, |_| Document::new());
    let update = dashboard.render().await;
    let update = if update.is_ok() {
        dashboard
            .update_range(today - Duration::days(7), today)
            .await
    } else {
        update
    };

    println!("== dashboard (ok: {})", update.is_ok());
    if let Some(view) = dashboard.sales.view() {
        println!("  sales: {} over {} days", view.heading, view.columns.len());
    }
    println!("  bestsellers: {} rows", dashboard.bestsellers.len());
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = table_demo().await {
        eprintln!("Table error: {}", e);
    }
    if let Err(e) = list_demo() {
        eprintln!("List error: {}", e);
    }
    dashboard_demo().await;

    let notifications = NotificationCenter::new();
    let surface = Document::new();
    notifications.show(
        Notification::new("Demo finished", NotificationConfig::default()),
        surface.clone(),
    );
    println!("{}", surface.outline());
}
