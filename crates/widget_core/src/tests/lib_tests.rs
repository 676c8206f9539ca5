use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Json, Router};
use shared::domain::OrderStatus;

use super::*;

struct RecordingHostChannel {
    payloads: Mutex<Vec<String>>,
}

impl RecordingHostChannel {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            payloads: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<String> {
        self.payloads.lock().expect("payload lock").clone()
    }
}

impl HostChannel for RecordingHostChannel {
    fn send(&self, action: &HostAction) -> Result<(), DispatchError> {
        let payload = serde_json::to_string(action)?;
        self.payloads.lock().expect("payload lock").push(payload);
        Ok(())
    }
}

struct FailingHostChannel;

impl HostChannel for FailingHostChannel {
    fn send(&self, _action: &HostAction) -> Result<(), DispatchError> {
        Err(DispatchError::Send("bridge torn down".into()))
    }
}

struct ScriptedFeed {
    responses: Mutex<VecDeque<Result<Vec<OrderRecord>, FeedError>>>,
}

impl ScriptedFeed {
    fn new(responses: Vec<Result<Vec<OrderRecord>, FeedError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }

    fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl OrderFeed for ScriptedFeed {
    async fn fetch_active(&self) -> Result<Vec<OrderRecord>, FeedError> {
        self.responses
            .lock()
            .expect("response lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn record(id: i64, pickup: Option<&str>) -> OrderRecord {
    OrderRecord {
        id,
        pickup_time: pickup.map(str::to_string),
        from_location_name: "Toshkent".into(),
        to_location_name: "Samarqand".into(),
        passengers: 2,
        price: 250_000,
        currency: Some("UZS".into()),
        status: "active".into(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn march_widget(feed: Arc<dyn OrderFeed>, host: Arc<dyn HostChannel>) -> CalendarWidget {
    CalendarWidget::new_with_today(feed, host, WidgetConfig::default(), date(2024, 3, 15))
}

async fn spawn_feed_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn refresh_applies_snapshot_and_rebuilds_index() {
    let feed = ScriptedFeed::new(vec![Ok(vec![
        record(7, Some("2024-03-05T09:30:00")),
        record(8, Some("2024-03-05T08:00:00")),
        record(9, None),
    ])]);
    let mut widget = march_widget(feed, RecordingHostChannel::new());

    assert!(widget.refresh().await);

    assert_eq!(widget.store().len(), 3);
    assert_eq!(widget.index().order_count(), 2);
    let ids: Vec<i64> = widget
        .index()
        .bucket(date(2024, 3, 5))
        .iter()
        .map(|o| o.id.0)
        .collect();
    assert_eq!(ids, vec![8, 7]);
}

#[tokio::test]
async fn failed_fetch_keeps_the_previous_snapshot() {
    let feed = ScriptedFeed::new(vec![
        Ok(vec![record(1, Some("2024-03-05T08:00:00"))]),
        Err(FeedError::Url(url::ParseError::EmptyHost)),
    ]);
    let mut widget = march_widget(feed, RecordingHostChannel::new());

    assert!(widget.refresh().await);
    assert!(!widget.refresh().await);

    assert_eq!(widget.store().len(), 1);
    assert_eq!(widget.index().order_count(), 1);
    assert_eq!(widget.store().orders()[0].id, OrderId(1));
}

#[test]
fn starts_in_the_configured_mode_at_the_anchor_month() {
    let config = WidgetConfig {
        default_mode: ViewMode::List,
        ..WidgetConfig::default()
    };
    let widget = CalendarWidget::new_with_today(
        ScriptedFeed::empty(),
        RecordingHostChannel::new(),
        config,
        date(2024, 3, 15),
    );

    assert_eq!(widget.state().mode(), ViewMode::List);
    assert_eq!(widget.state().reference(), MonthRef::of(date(2024, 3, 15)));
    assert_eq!(widget.state().selected(), None);
}

#[test]
fn claim_dispatches_exactly_one_payload_then_clears_selection() {
    let host = RecordingHostChannel::new();
    let mut widget = march_widget(ScriptedFeed::empty(), host.clone());
    widget.apply_snapshot(vec![record(123, Some("2024-03-05T08:00:00"))]);

    widget.select(OrderId(123));
    assert_eq!(widget.selected_order().map(|o| o.id), Some(OrderId(123)));
    widget.claim();

    assert_eq!(
        host.sent(),
        vec![r#"{"action":"take_order","order_id":123}"#.to_string()]
    );
    assert_eq!(widget.state().selected(), None);
}

#[test]
fn claim_without_selection_dispatches_nothing() {
    let host = RecordingHostChannel::new();
    let mut widget = march_widget(ScriptedFeed::empty(), host.clone());
    widget.apply_snapshot(vec![record(1, Some("2024-03-05T08:00:00"))]);

    widget.claim();

    assert!(host.sent().is_empty());
}

#[test]
fn selecting_an_unknown_order_is_ignored() {
    let mut widget = march_widget(ScriptedFeed::empty(), RecordingHostChannel::new());
    widget.apply_snapshot(vec![record(1, Some("2024-03-05T08:00:00"))]);

    widget.select(OrderId(999));

    assert_eq!(widget.state().selected(), None);
    assert!(widget.selected_order().is_none());
}

#[test]
fn claim_after_the_selection_left_the_store_sends_nothing() {
    let host = RecordingHostChannel::new();
    let mut widget = march_widget(ScriptedFeed::empty(), host.clone());
    widget.apply_snapshot(vec![record(1, Some("2024-03-05T08:00:00"))]);
    widget.select(OrderId(1));

    // The host refreshed the feed underneath the open detail view.
    widget.apply_snapshot(vec![record(2, Some("2024-03-06T08:00:00"))]);
    widget.claim();

    assert!(host.sent().is_empty());
    assert!(widget.selected_order().is_none());
}

#[test]
fn failed_dispatch_is_swallowed_and_still_dismisses() {
    let mut widget = march_widget(ScriptedFeed::empty(), Arc::new(FailingHostChannel));
    widget.apply_snapshot(vec![record(5, Some("2024-03-05T08:00:00"))]);

    widget.select(OrderId(5));
    widget.claim();

    assert_eq!(widget.state().selected(), None);
}

#[test]
fn unwired_host_channel_degrades_the_same_way() {
    let mut widget = march_widget(ScriptedFeed::empty(), Arc::new(MissingHostChannel));
    widget.apply_snapshot(vec![record(6, Some("2024-03-05T08:00:00"))]);

    widget.select(OrderId(6));
    widget.claim();

    assert_eq!(widget.state().selected(), None);
}

#[test]
fn select_then_dismiss_leaves_month_and_mode_unchanged() {
    let mut widget = march_widget(ScriptedFeed::empty(), RecordingHostChannel::new());
    widget.apply_snapshot(vec![record(1, Some("2024-03-05T08:00:00"))]);
    let reference = widget.state().reference();
    let mode = widget.state().mode();

    widget.select(OrderId(1));
    widget.dismiss();

    assert_eq!(widget.state().selected(), None);
    assert_eq!(widget.state().reference(), reference);
    assert_eq!(widget.state().mode(), mode);
}

#[test]
fn month_grid_honors_the_configured_truncation() {
    let mut widget = march_widget(ScriptedFeed::empty(), RecordingHostChannel::new());
    widget.apply_snapshot(
        (1..=4)
            .map(|i| record(i, Some(&format!("2024-03-05T0{i}:00:00"))))
            .collect(),
    );

    let grid = widget.month_grid();
    let cell = grid.day(5).expect("day 5 present");
    assert_eq!(cell.orders.len(), 3);
    assert_eq!(cell.overflow, 1);
    assert!(grid.day(15).expect("day 15 present").is_today);
}

#[test]
fn statuses_flow_through_for_presentation_without_affecting_views() {
    let mut taken = record(1, Some("2024-03-05T08:00:00"));
    taken.status = "taken".into();
    let mut widget = march_widget(ScriptedFeed::empty(), RecordingHostChannel::new());
    widget.apply_snapshot(vec![taken, record(2, Some("2024-03-05T09:00:00"))]);

    let bucket = widget.index().bucket(date(2024, 3, 5));
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[0].status, OrderStatus::Taken);
    assert!(!bucket[0].status.is_claimable());
}

#[tokio::test]
async fn http_feed_round_trip_applies_the_snapshot() {
    let records = vec![
        record(7, Some("2024-03-05T09:30:00")),
        record(8, Some("2024-03-05T08:00:00")),
    ];
    let app = Router::new().route(
        "/api/orders/active",
        get(move || {
            let records = records.clone();
            async move { Json(records) }
        }),
    );
    let base = spawn_feed_server(app).await;

    let feed = Arc::new(HttpOrderFeed::new(&base).expect("feed"));
    let mut widget = CalendarWidget::new_with_today(
        feed,
        RecordingHostChannel::new(),
        WidgetConfig::default(),
        date(2024, 3, 15),
    );

    assert!(widget.refresh().await);
    assert_eq!(widget.store().len(), 2);
    assert_eq!(
        widget
            .index()
            .bucket(date(2024, 3, 5))
            .first()
            .map(|o| o.id.0),
        Some(8)
    );
}

#[tokio::test]
async fn http_feed_maps_server_errors_to_transport() {
    let app = Router::new().route(
        "/api/orders/active",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_feed_server(app).await;

    let feed = HttpOrderFeed::new(&base).expect("feed");
    assert!(matches!(
        feed.fetch_active().await,
        Err(FeedError::Transport(_))
    ));
}
