use chrono::NaiveDate;
use shared::domain::Order;

use crate::index::CalendarIndex;

/// One calendar day's worth of orders for the flat list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub orders: Vec<Order>,
}

/// Chronological projection of the index. Days without orders never appear;
/// grid mode is the view that shows the quiet days. An empty index projects
/// to an empty sequence — the "no orders" affordance belongs to the render
/// layer.
pub fn build_list(index: &CalendarIndex) -> Vec<DayGroup> {
    index
        .days()
        .map(|(date, orders)| DayGroup {
            date,
            orders: orders.to_vec(),
        })
        .collect()
}
