use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::{domain::OrderId, protocol::HostAction};
use widget_core::{
    display, CalendarWidget, Cell, DispatchError, HostChannel, HttpOrderFeed, MonthRef, ViewMode,
};

mod config;

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides the feed endpoint from widget.toml / environment.
    #[arg(long)]
    feed_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the month grid.
    Grid {
        #[arg(long, requires = "month")]
        year: Option<i32>,
        /// 1-12
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
    /// Render the chronological list of days with orders.
    List,
    /// Replay a claim gesture and print the outbound payload.
    Claim { order_id: i64 },
}

/// Stands in for the host's send primitive: the payload goes to stdout.
struct StdoutHostChannel;

impl HostChannel for StdoutHostChannel {
    fn send(&self, action: &HostAction) -> Result<(), DispatchError> {
        println!("-> {}", serde_json::to_string(action)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(feed_url) = cli.feed_url {
        settings.feed_url = feed_url;
    }

    let feed = Arc::new(HttpOrderFeed::new(&settings.feed_url)?);
    let mut widget = CalendarWidget::new(feed, Arc::new(StdoutHostChannel), settings.widget);
    widget.refresh().await;

    match cli.command {
        Command::Grid { year, month } => {
            if let (Some(year), Some(month)) = (year, month) {
                match MonthRef::new(year, month) {
                    Some(target) => widget.navigate(months_between(widget.state().reference(), target)),
                    None => anyhow::bail!("month must be 1-12, got {month}"),
                }
            }
            widget.switch_mode(ViewMode::Grid);
            render_grid(&widget);
        }
        Command::List => {
            widget.switch_mode(ViewMode::List);
            render_list(&widget);
        }
        Command::Claim { order_id } => {
            widget.select(OrderId(order_id));
            if widget.selected_order().is_none() {
                println!("order {order_id} is not in the active feed");
            } else {
                widget.claim();
            }
        }
    }

    Ok(())
}

fn months_between(from: MonthRef, to: MonthRef) -> i32 {
    (to.year() * 12 + to.month() as i32) - (from.year() * 12 + from.month() as i32)
}

fn render_grid(widget: &CalendarWidget) {
    let grid = widget.month_grid();
    println!("{}", display::month_title(grid.month));
    println!(
        "{}",
        display::WEEKDAY_SHORT
            .iter()
            .map(|name| format!("{name:>4}"))
            .collect::<String>()
    );

    let mut row = String::new();
    let mut cells_in_row = 0;
    for cell in &grid.cells {
        match cell {
            Cell::Empty => row.push_str("    "),
            Cell::Day(day) => {
                let marker = if day.orders.is_empty() { ' ' } else { '*' };
                row.push_str(&format!("{:>3}{marker}", day.day));
            }
        }
        cells_in_row += 1;
        if cells_in_row == 7 {
            println!("{row}");
            row.clear();
            cells_in_row = 0;
        }
    }
    if !row.is_empty() {
        println!("{row}");
    }

    for cell in &grid.cells {
        let Cell::Day(day) = cell else { continue };
        if day.orders.is_empty() {
            continue;
        }
        let today = if day.is_today { " (bugun)" } else { "" };
        println!("{:>2}{today}:", day.day);
        for order in &day.orders {
            println!("    {}", display::cell_snippet(order));
        }
        if day.overflow > 0 {
            println!("    +{} ta", day.overflow);
        }
    }
}

fn render_list(widget: &CalendarWidget) {
    let groups = widget.day_list();
    if groups.is_empty() {
        println!("Aktiv buyurtmalar yo'q.");
        return;
    }
    for group in groups {
        println!("{}", display::date_heading(group.date));
        for order in &group.orders {
            let detail = display::order_detail(order);
            println!(
                "  #{} {} | {} | {}",
                order.id.0,
                detail.route,
                detail.passengers,
                detail.price
            );
        }
    }
}
