use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(OrderId);

/// Fallback applied when the feed omits an order's currency code.
pub const DEFAULT_CURRENCY: &str = "RUB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Active,
    Pending,
    Taken,
    Completed,
    Cancelled,
    Unknown,
}

impl OrderStatus {
    /// The feed carries free-form status strings; anything unrecognized maps
    /// to `Unknown` rather than failing the whole snapshot.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "taken" => Self::Taken,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Presentation hint: whether offering a claim gesture makes sense.
    pub fn is_claimable(self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }

    pub fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Host-local wall-clock pickup moment. `None` when the feed value was
    /// absent or unparseable; such orders stay in the store but never reach a
    /// date-keyed view.
    pub pickup_time: Option<NaiveDateTime>,
    pub from_location: String,
    pub to_location: String,
    pub passengers: u32,
    pub price: i64,
    pub currency: String,
    pub status: OrderStatus,
}

impl Order {
    pub fn pickup_date(&self) -> Option<NaiveDate> {
        self.pickup_time.map(|t| t.date())
    }

    pub fn pickup_clock(&self) -> Option<NaiveTime> {
        self.pickup_time.map(|t| t.time())
    }
}
