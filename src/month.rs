use chrono::{Datelike, Duration, Local, Month, NaiveDate, Weekday};
use derive_more::Constructor;
use itertools::Itertools;
use num_traits::FromPrimitive;
use serde_with::DeserializeFromStr;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month.number_from_month() {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A calendar month of a specific year.
///
/// Both visible calendars of the picker are tracked as `MonthIndex` values.
/// Ordering and arithmetic work on the absolute month count, so stepping over
/// a year boundary behaves like any other step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.index.number_from_month() as i64 - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        MonthIndex {
            index: Month::from_i64(ordinal.rem_euclid(12) + 1).unwrap_or(Month::January),
            year: ordinal.div_euclid(12) as i32,
        }
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn shift(&self, delta: i32) -> Self {
        Self::from_ordinal(self.ordinal() + delta as i64)
    }

    /// Number of calendar months from `self` to `other`, negative if `other`
    /// lies before `self`.
    pub fn months_until(&self, other: &MonthIndex) -> i32 {
        (other.ordinal() - self.ordinal()) as i32
    }

    /// First day of the month. Saturates at the limits of `NaiveDate`.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.index.number_from_month(), 1)
            .unwrap_or(if self.year < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            })
    }

    /// Last day of the month. Saturates at the limits of `NaiveDate`.
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(
            self.year,
            self.index.number_from_month(),
            days_of_month(&self.index, self.year),
        )
        .unwrap_or(if self.year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
    }

    pub fn contains(&self, day: &NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.index.number_from_month()
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex::from(Local::now().date_naive())
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(
            Month::from_u32(m.month()).unwrap_or(Month::January),
            m.year(),
        )
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        Self::from_ordinal(self.ordinal() + rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        Self::from_ordinal(self.ordinal() - rhs as i64)
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.index.number_from_month())
    }
}

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub struct WeekStart(pub Weekday);

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart(Weekday::Sun)
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Weekday>().map(WeekStart).map_err(|_| {
            Error::new(
                ErrorKind::InvalidConfig,
                &format!("'{}' is not a day of the week", s),
            )
        })
    }
}

/// One cell of a month grid. Padding cells carry the real date of the
/// neighbouring month and have `in_month` unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

pub type Week = [DayCell; 7];

fn days_from(start: Weekday, day: Weekday) -> i64 {
    (day.num_days_from_monday() as i64 + 7 - start.num_days_from_monday() as i64) % 7
}

/// Sunday-first grid of `month`.
pub fn build_month_grid(month: MonthIndex) -> Vec<Week> {
    build_month_grid_from(month, Weekday::Sun)
}

/// Weeks covering `month`, starting with the week that contains its first
/// day and ending with the week that contains its last day.
pub fn build_month_grid_from(month: MonthIndex, week_start: Weekday) -> Vec<Week> {
    let first = month.first_day();
    let last = month.last_day();

    let lead = days_from(week_start, first.weekday());
    let trail = days_from(last.weekday(), week_start.pred());

    let begin = first
        .checked_sub_signed(Duration::days(lead))
        .unwrap_or(first);
    let end = last.checked_add_signed(Duration::days(trail)).unwrap_or(last);

    let days = begin
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| DayCell::new(day, month.contains(&day)))
        .collect_vec();

    // lead and trail pad the span to whole weeks
    let grid = days
        .chunks_exact(7)
        .filter_map(|week| Week::try_from(week).ok())
        .collect_vec();
    grid
}
