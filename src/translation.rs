use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::month::MonthIndex;
use crate::range::DateRange;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Sunday first
const WEEK_DAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Display texts. None of these influence the selection logic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub start_date: String,
    pub end_date: String,
    pub date_format: String,
    pub months: Vec<String>,
    pub week_days: Vec<String>,
}

impl Default for Translation {
    fn default() -> Self {
        Translation {
            start_date: "Start Date".to_owned(),
            end_date: "End Date".to_owned(),
            date_format: "%B %d, %Y".to_owned(),
            months: MONTHS.iter().map(|&m| m.to_owned()).collect(),
            week_days: WEEK_DAYS.iter().map(|&d| d.to_owned()).collect(),
        }
    }
}

impl Translation {
    pub fn validate(&self) -> Result<()> {
        if self.months.len() != 12 {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                &format!("expected 12 month names, got {}", self.months.len()),
            ));
        }

        if self.week_days.len() != 7 {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                &format!("expected 7 week day names, got {}", self.week_days.len()),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| item == Item::Error) {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                &format!("invalid date format '{}'", self.date_format),
            ));
        }

        Ok(())
    }

    pub fn format_date(&self, day: NaiveDate) -> String {
        day.format(&self.date_format).to_string()
    }

    /// Texts for the start and end slots of the header.
    pub fn header_text(&self, range: &DateRange) -> (String, String) {
        (
            range
                .start_date
                .map_or_else(|| self.start_date.clone(), |d| self.format_date(d)),
            range
                .end_date
                .map_or_else(|| self.end_date.clone(), |d| self.format_date(d)),
        )
    }

    pub fn month_title(&self, month: &MonthIndex) -> String {
        let index = month.month().number_from_month() as usize - 1;
        let name = self
            .months
            .get(index)
            .map_or(MONTHS[index], String::as_str);

        format!("{} {}", name, month.year())
    }

    /// Falls back to the built-in abbreviations where the table is short.
    pub fn week_day_labels(&self, week_start: Weekday) -> Vec<&str> {
        let offset = week_start.num_days_from_sunday() as usize;
        (0..7)
            .map(|i| (offset + i) % 7)
            .map(|day| self.week_days.get(day).map_or(WEEK_DAYS[day], String::as_str))
            .collect()
    }
}
