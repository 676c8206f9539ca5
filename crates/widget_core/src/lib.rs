use std::sync::Arc;

use chrono::{Local, NaiveDate};
use shared::{
    domain::{Order, OrderId},
    protocol::{HostAction, OrderRecord},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod dispatch;
pub mod display;
pub mod feed;
pub mod grid;
pub mod index;
pub mod list;
pub mod state;
pub mod store;

pub use config::WidgetConfig;
pub use dispatch::{DispatchError, HostChannel, MissingHostChannel};
pub use feed::{FeedError, HttpOrderFeed, OrderFeed};
pub use grid::{build_grid, Cell, DayCell, MonthGrid};
pub use index::CalendarIndex;
pub use list::{build_list, DayGroup};
pub use state::{MonthRef, ViewMode, ViewState};
pub use store::OrderStore;

/// The order-calendar engine. Owns the store, the derived index, and the
/// navigation state, and brokers the two host boundaries: the feed coming in
/// and the claim action going out. The render layer reads projections and
/// feeds gestures back; it never touches engine state directly.
pub struct CalendarWidget {
    feed: Arc<dyn OrderFeed>,
    host: Arc<dyn HostChannel>,
    config: WidgetConfig,
    store: OrderStore,
    index: CalendarIndex,
    state: ViewState,
    /// When set, "today" stops following the wall clock.
    pinned_today: Option<NaiveDate>,
    fetch_in_flight: bool,
}

impl CalendarWidget {
    /// Widget anchored at the real current month, in the configured mode,
    /// with nothing selected.
    pub fn new(feed: Arc<dyn OrderFeed>, host: Arc<dyn HostChannel>, config: WidgetConfig) -> Self {
        Self::build(feed, host, config, None)
    }

    /// Pins "today" for hosts that render deterministically.
    pub fn new_with_today(
        feed: Arc<dyn OrderFeed>,
        host: Arc<dyn HostChannel>,
        config: WidgetConfig,
        today: NaiveDate,
    ) -> Self {
        Self::build(feed, host, config, Some(today))
    }

    fn build(
        feed: Arc<dyn OrderFeed>,
        host: Arc<dyn HostChannel>,
        config: WidgetConfig,
        pinned_today: Option<NaiveDate>,
    ) -> Self {
        let today = pinned_today.unwrap_or_else(|| Local::now().date_naive());
        let state = ViewState::new(MonthRef::of(today), config.default_mode);
        Self {
            feed,
            host,
            config,
            store: OrderStore::default(),
            index: CalendarIndex::default(),
            state,
            pinned_today,
            fetch_in_flight: false,
        }
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Pulls a fresh snapshot from the feed. Returns whether one was applied.
    ///
    /// A refresh issued while another is outstanding is skipped: letting both
    /// land would leave the store at the mercy of whichever response finishes
    /// last. A failed fetch leaves the previous snapshot standing and is
    /// never surfaced to the user.
    pub async fn refresh(&mut self) -> bool {
        if self.fetch_in_flight {
            warn!("feed: refresh skipped, a fetch is already in flight");
            return false;
        }
        self.fetch_in_flight = true;
        let outcome = self.feed.fetch_active().await;
        self.fetch_in_flight = false;

        match outcome {
            Ok(records) => {
                self.apply_snapshot(records);
                true
            }
            Err(err) => {
                warn!("feed: fetch failed, previous snapshot stands: {err}");
                false
            }
        }
    }

    /// The one store-mutation path, shared by `refresh` and hosts that push
    /// snapshots instead of being polled. Rebuilds the index wholesale.
    pub fn apply_snapshot(&mut self, records: Vec<OrderRecord>) {
        let orders: Vec<Order> = records.into_iter().map(Order::from).collect();
        let undated = orders.iter().filter(|o| o.pickup_time.is_none()).count();
        info!(
            "store: snapshot applied orders={} undated={undated}",
            orders.len()
        );
        self.store.replace(orders);
        self.index = CalendarIndex::from_orders(self.store.orders());
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn index(&self) -> &CalendarIndex {
        &self.index
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Grid projection of the reference month.
    pub fn month_grid(&self) -> MonthGrid {
        grid::build_grid(
            &self.index,
            self.state.reference(),
            self.today(),
            self.config.max_snippets_per_cell,
        )
    }

    /// Chronological list projection.
    pub fn day_list(&self) -> Vec<DayGroup> {
        list::build_list(&self.index)
    }

    pub fn navigate(&mut self, delta: i32) {
        self.state.navigate(delta);
    }

    pub fn switch_mode(&mut self, mode: ViewMode) {
        self.state.switch_mode(mode);
    }

    /// Opens the detail view for `id`. Unknown ids are tolerated, not errors:
    /// the store may have refreshed between render and gesture.
    pub fn select(&mut self, id: OrderId) {
        if !self.store.contains(id) {
            debug!("state: select ignored, order {} not in store", id.0);
            return;
        }
        self.state.select(id);
    }

    pub fn dismiss(&mut self) {
        self.state.dismiss();
    }

    /// The selected order as the detail view should show it. `None` when
    /// nothing is selected or the selection went stale.
    pub fn selected_order(&self) -> Option<&Order> {
        self.state.selected().and_then(|id| self.store.get(id))
    }

    /// Relays the claim gesture for the selected order to the host, then
    /// drops the selection. With no live selection this is a stale gesture
    /// and does nothing. The store is not touched either way; only the next
    /// refresh reflects whether the host actually reassigned the order.
    pub fn claim(&mut self) {
        let Some(id) = self.state.selected() else {
            debug!("state: claim ignored, nothing selected");
            return;
        };
        if !self.store.contains(id) {
            debug!("state: claim ignored, order {} left the store", id.0);
            return;
        }
        let action = HostAction::TakeOrder { order_id: id };
        if let Err(err) = self.host.send(&action) {
            warn!("dispatch: take_order send failed for order {}: {err}", id.0);
        }
        self.state.dismiss();
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
