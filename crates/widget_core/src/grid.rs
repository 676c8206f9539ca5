use chrono::{Datelike, NaiveDate};
use shared::domain::Order;

use crate::{index::CalendarIndex, state::MonthRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Leading padding before the first day so weeks align Monday-first.
    Empty,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub is_today: bool,
    /// Bucket entries shown in the cell, truncated to the configured limit.
    /// The index keeps the full bucket for list mode and detail lookups.
    pub orders: Vec<Order>,
    /// How many bucket entries the truncation hid.
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: MonthRef,
    /// Count of leading `Empty` cells, 0..=6.
    pub offset: usize,
    /// Exactly `offset + days-in-month` cells; trailing padding to square off
    /// the last week is left to the render layer.
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find_map(|cell| match cell {
            Cell::Day(d) if d.day == day => Some(d),
            _ => None,
        })
    }
}

/// Lays out one month of the index as a Monday-first cell sequence. `today`
/// is injected so rendering stays deterministic under test.
pub fn build_grid(
    index: &CalendarIndex,
    month: MonthRef,
    today: NaiveDate,
    limit: Option<usize>,
) -> MonthGrid {
    let offset = month.first_day().weekday().num_days_from_monday() as usize;
    let days = month.days();

    let mut cells = Vec::with_capacity(offset + days as usize);
    cells.extend(std::iter::repeat(Cell::Empty).take(offset));

    let mut date = month.first_day();
    for day in 1..=days {
        let bucket = index.bucket(date);
        let (orders, overflow) = match limit {
            Some(limit) if bucket.len() > limit => (bucket[..limit].to_vec(), bucket.len() - limit),
            _ => (bucket.to_vec(), 0),
        };
        cells.push(Cell::Day(DayCell {
            day,
            is_today: date == today,
            orders,
            overflow,
        }));
        if let Some(next) = date.succ_opt() {
            date = next;
        }
    }

    MonthGrid {
        month,
        offset,
        cells,
    }
}
