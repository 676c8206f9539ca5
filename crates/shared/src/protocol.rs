use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderId, OrderStatus, DEFAULT_CURRENCY};

/// One order as the host's read endpoint serves it. The feed carries more
/// fields than the widget shows; unknown keys are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "PickupTime", default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(rename = "FromLocationName", default)]
    pub from_location_name: String,
    #[serde(rename = "ToLocationName", default)]
    pub to_location_name: String,
    #[serde(rename = "Passengers", default)]
    pub passengers: u32,
    #[serde(rename = "Price", default)]
    pub price: i64,
    #[serde(rename = "Currency", default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// Pickup timestamps arrive as ISO-8601 strings. The backend stamps them with
/// an offset while the widget reasons in host-local wall-clock, so an offset
/// is tolerated but never applied: only the literal date and clock survive.
pub fn parse_pickup_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(stamped) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamped.naive_local());
    }
    raw.parse::<NaiveDateTime>().ok()
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        let pickup_time = record.pickup_time.as_deref().and_then(parse_pickup_time);
        Order {
            id: OrderId(record.id),
            pickup_time,
            from_location: record.from_location_name,
            to_location: record.to_location_name,
            passengers: record.passengers,
            price: record.price,
            currency: record
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            status: OrderStatus::from_wire(&record.status),
        }
    }
}

/// The single message the widget ever sends back to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostAction {
    TakeOrder { order_id: OrderId },
}
