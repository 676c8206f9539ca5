//! Pure text formatting for the render layer: no markup, no styling, just
//! the strings the original dispatcher UI shows.

use chrono::{Datelike, NaiveDate, Timelike};
use shared::domain::Order;

use crate::state::MonthRef;

pub const MONTH_NAMES: [&str; 12] = [
    "Yanvar", "Fevral", "Mart", "Aprel", "May", "Iyun", "Iyul", "Avgust", "Sentabr", "Oktabr",
    "Noyabr", "Dekabr",
];

/// Sunday-first, indexed by `Weekday::num_days_from_sunday`.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Yakshanba",
    "Dushanba",
    "Seshanba",
    "Chorshanba",
    "Payshanba",
    "Juma",
    "Shanba",
];

/// Monday-first column headers for the grid.
pub const WEEKDAY_SHORT: [&str; 7] = ["Du", "Se", "Ch", "Pa", "Ju", "Sh", "Ya"];

/// "Mart 2024"
pub fn month_title(month: MonthRef) -> String {
    let name = MONTH_NAMES[month.month() as usize - 1];
    format!("{name} {}", month.year())
}

fn clock(order: &Order) -> Option<String> {
    order
        .pickup_clock()
        .map(|c| format!("{:02}:{:02}", c.hour(), c.minute()))
}

/// "09:30 Samarqand" — the one-line entry a grid cell shows.
pub fn cell_snippet(order: &Order) -> String {
    match clock(order) {
        Some(clock) => format!("{clock} {}", order.to_location),
        None => order.to_location.clone(),
    }
}

/// "5-Mart, Seshanba" — the detail view's date heading.
pub fn date_heading(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{}-{month}, {weekday}", date.day())
}

/// Integer amount with thousands groups: 250000 becomes "250 000".
pub fn grouped_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Detail-view text, one field per row of the detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    /// Absent for orders without a pickup date.
    pub heading: Option<String>,
    pub route: String,
    pub clock: String,
    pub passengers: String,
    pub price: String,
}

pub fn order_detail(order: &Order) -> OrderDetail {
    OrderDetail {
        heading: order.pickup_date().map(date_heading),
        route: format!("{} ➞ {}", order.from_location, order.to_location),
        clock: format!("🕒 {}", clock(order).unwrap_or_else(|| "—".into())),
        passengers: format!("👥 {} kishi", order.passengers),
        price: format!("💰 {} {}", grouped_amount(order.price), order.currency),
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{OrderId, OrderStatus};

    use super::*;

    fn order(pickup: Option<&str>) -> Order {
        Order {
            id: OrderId(7),
            pickup_time: pickup.and_then(|raw| raw.parse().ok()),
            from_location: "Toshkent".into(),
            to_location: "Samarqand".into(),
            passengers: 3,
            price: 250_000,
            currency: "UZS".into(),
            status: OrderStatus::Active,
        }
    }

    #[test]
    fn month_title_reads_like_the_header() {
        let march = MonthRef::new(2024, 3).expect("month");
        assert_eq!(month_title(march), "Mart 2024");
    }

    #[test]
    fn cell_snippet_is_clock_then_destination() {
        assert_eq!(
            cell_snippet(&order(Some("2024-03-05T09:30:00"))),
            "09:30 Samarqand"
        );
        assert_eq!(cell_snippet(&order(None)), "Samarqand");
    }

    #[test]
    fn date_heading_names_day_month_weekday() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("date");
        assert_eq!(date_heading(date), "5-Mart, Seshanba");
    }

    #[test]
    fn amounts_group_in_threes() {
        assert_eq!(grouped_amount(0), "0");
        assert_eq!(grouped_amount(999), "999");
        assert_eq!(grouped_amount(1_500), "1 500");
        assert_eq!(grouped_amount(250_000), "250 000");
        assert_eq!(grouped_amount(12_345_678), "12 345 678");
        assert_eq!(grouped_amount(-1_500), "-1 500");
    }

    #[test]
    fn detail_lines_match_the_card() {
        let detail = order_detail(&order(Some("2024-03-05T09:30:00")));
        assert_eq!(detail.heading.as_deref(), Some("5-Mart, Seshanba"));
        assert_eq!(detail.route, "Toshkent ➞ Samarqand");
        assert_eq!(detail.clock, "🕒 09:30");
        assert_eq!(detail.passengers, "👥 3 kishi");
        assert_eq!(detail.price, "💰 250 000 UZS");
    }

    #[test]
    fn undated_detail_has_no_heading_and_a_placeholder_clock() {
        let detail = order_detail(&order(None));
        assert_eq!(detail.heading, None);
        assert_eq!(detail.clock, "🕒 —");
    }
}
