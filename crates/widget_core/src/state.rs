use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::domain::OrderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Grid,
    List,
}

/// A (year, month) pair, carried as the first day of that month so chrono's
/// month arithmetic handles year wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthRef {
    first: NaiveDate,
}

impl MonthRef {
    /// `month` is 1-based (January = 1).
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Day count, derived as the day before the first of the next month.
    pub fn days(self) -> u32 {
        self.shifted(1).first.pred_opt().map_or(31, |last| last.day())
    }

    /// Moves `delta` months, negative for the past. Saturates at the calendar
    /// bounds instead of wrapping.
    pub fn shifted(self, delta: i32) -> Self {
        let moved = if delta >= 0 {
            self.first.checked_add_months(Months::new(delta as u32))
        } else {
            self.first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        Self {
            first: moved.unwrap_or(self.first),
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// Navigation and selection state. Mutated only through the transitions
/// below; the render layer reads it and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    reference: MonthRef,
    mode: ViewMode,
    selected: Option<OrderId>,
}

impl ViewState {
    pub fn new(reference: MonthRef, mode: ViewMode) -> Self {
        Self {
            reference,
            mode,
            selected: None,
        }
    }

    pub fn reference(&self) -> MonthRef {
        self.reference
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<OrderId> {
        self.selected
    }

    /// Moves the reference month; mode and selection stay put.
    pub fn navigate(&mut self, delta: i32) {
        self.reference = self.reference.shifted(delta);
    }

    pub fn switch_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    // Store-existence guarding lives on the widget, which owns both sides.
    pub(crate) fn select(&mut self, id: OrderId) {
        self.selected = Some(id);
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
    }
}
