use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::domain::Order;

/// Orders grouped by their host-local pickup date.
///
/// Rebuilt from scratch whenever the store snapshot changes. Orders without a
/// parseable pickup time cannot be bucketed and are left out; they remain
/// visible through the raw store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CalendarIndex {
    buckets: BTreeMap<NaiveDate, Vec<Order>>,
}

impl CalendarIndex {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut buckets: BTreeMap<NaiveDate, Vec<Order>> = BTreeMap::new();
        for order in orders {
            let Some(date) = order.pickup_date() else {
                continue;
            };
            buckets.entry(date).or_default().push(order.clone());
        }
        // Stable sort: same-clock orders keep their feed order.
        for bucket in buckets.values_mut() {
            bucket.sort_by_key(Order::pickup_clock);
        }
        Self { buckets }
    }

    /// Orders on `date`, earliest pickup first. Empty for dates with none.
    pub fn bucket(&self, date: NaiveDate) -> &[Order] {
        self.buckets.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Non-empty days in ascending calendar order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[Order])> {
        self.buckets
            .iter()
            .map(|(date, orders)| (*date, orders.as_slice()))
    }

    pub fn day_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn order_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
