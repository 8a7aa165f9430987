use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};
use crate::month::MonthIndex;

/// Which of the two calendars an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    Previous,
    Next,
}

impl NavigationAction {
    pub fn delta(&self) -> i32 {
        match self {
            NavigationAction::Previous => -1,
            NavigationAction::Next => 1,
        }
    }
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(Marker::First),
            "second" => Ok(Marker::Second),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("unknown calendar '{}'", s),
            )),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::First => write!(f, "first"),
            Marker::Second => write!(f, "second"),
        }
    }
}

impl FromStr for NavigationAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prev" | "previous" => Ok(NavigationAction::Previous),
            "next" => Ok(NavigationAction::Next),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("unknown navigation '{}'", s),
            )),
        }
    }
}

impl fmt::Display for NavigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationAction::Previous => write!(f, "previous"),
            NavigationAction::Next => write!(f, "next"),
        }
    }
}

/// Inclusive limits on selectable and navigable dates. Missing ends are
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl Bounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Result<Self> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(Error::new(
                ErrorKind::InvalidBounds,
                &format!("{} > {}", min, max),
            )),
            _ => Ok(Bounds { min, max }),
        }
    }

    pub fn unbounded() -> Self {
        Bounds::default()
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.min.map_or(true, |min| min <= day) && self.max.map_or(true, |max| day <= max)
    }

    pub fn clamp(&self, day: NaiveDate) -> NaiveDate {
        let day = self.min.map_or(day, |min| day.max(min));
        self.max.map_or(day, |max| day.min(max))
    }

    /// Whether any day of `month` is within bounds.
    pub fn allows_month(&self, month: &MonthIndex) -> bool {
        self.min.map_or(true, |min| min <= month.last_day())
            && self.max.map_or(true, |max| month.first_day() <= max)
    }

    pub fn clamp_month(&self, month: MonthIndex) -> MonthIndex {
        let month = self
            .min
            .map(MonthIndex::from)
            .map_or(month, |min| month.max(min));
        self.max.map(MonthIndex::from).map_or(month, |max| month.min(max))
    }
}

/// The two visible months. `second` is always at least one calendar month
/// after `first`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    first: MonthIndex,
    second: MonthIndex,
    bounds: Bounds,
}

impl Navigator {
    pub fn new(first: MonthIndex, bounds: Bounds) -> Self {
        Navigator {
            first,
            second: first.next(),
            bounds,
        }
    }

    /// Falls back to the month after `first` when `second` is not later.
    pub fn with_months(first: MonthIndex, second: MonthIndex, bounds: Bounds) -> Self {
        let second = if second > first { second } else { first.next() };
        Navigator {
            first,
            second,
            bounds,
        }
    }

    pub fn first_month(&self) -> MonthIndex {
        self.first
    }

    pub fn second_month(&self) -> MonthIndex {
        self.second
    }

    pub fn month(&self, marker: Marker) -> MonthIndex {
        match marker {
            Marker::First => self.first,
            Marker::Second => self.second,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn is_adjacent(&self) -> bool {
        self.first.months_until(&self.second) < 2
    }

    pub fn can_navigate(&self, marker: Marker, action: NavigationAction) -> bool {
        let closer = matches!(
            (marker, action),
            (Marker::First, NavigationAction::Next) | (Marker::Second, NavigationAction::Previous)
        );

        if closer && self.is_adjacent() {
            return false;
        }

        self.bounds
            .allows_month(&self.month(marker).shift(action.delta()))
    }

    /// Moves the addressed month by one. Returns whether anything changed.
    pub fn navigate(&mut self, marker: Marker, action: NavigationAction) -> bool {
        if !self.can_navigate(marker, action) {
            log::debug!("Rejected navigation of {} calendar to {}", marker, action);
            return false;
        }

        match marker {
            Marker::First => self.first = self.first.shift(action.delta()),
            Marker::Second => self.second = self.second.shift(action.delta()),
        }
        self.check_invariant();

        true
    }

    /// Brings `day` into view if it lies before the first or after the second
    /// visible month. Days in between are left alone.
    pub fn reveal(&mut self, day: NaiveDate) {
        let month = MonthIndex::from(day);

        if month < self.first {
            log::debug!("Moving first calendar back to {}", month);
            self.first = month;
        } else if month > self.second {
            log::debug!("Moving second calendar forward to {}", month);
            self.second = month;
        }
        self.check_invariant();
    }

    pub fn show_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let first = MonthIndex::from(start);
        let second = MonthIndex::from(end);

        self.first = first;
        self.second = if second > first { second } else { first.next() };
        self.check_invariant();
    }

    fn check_invariant(&self) {
        debug_assert!(
            self.first < self.second,
            "second calendar {} is not after first calendar {}",
            self.second,
            self.first
        );
    }
}
