use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::month::MonthIndex;
use crate::range::DefinedRange;

fn week_of(day: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let into_week = (day.weekday().num_days_from_monday() as i64 + 7
        - week_start.num_days_from_monday() as i64)
        % 7;
    let begin = day - Duration::days(into_week);
    (begin, begin + Duration::days(6))
}

fn defined(label: &str, (start, end): (NaiveDate, NaiveDate)) -> DefinedRange {
    DefinedRange::new(label.to_owned(), start, end)
}

/// Built-in quick picks relative to `today`.
pub fn default_ranges(today: NaiveDate, week_start: Weekday) -> Vec<DefinedRange> {
    let yesterday = today - Duration::days(1);
    let this_month = MonthIndex::from(today);
    let last_month = this_month.prev();

    vec![
        defined("Today", (today, today)),
        defined("Yesterday", (yesterday, yesterday)),
        defined("This Week", week_of(today, week_start)),
        defined("Last Week", week_of(today - Duration::weeks(1), week_start)),
        defined("Last 7 Days", (today - Duration::weeks(1), today)),
        defined("This Month", (this_month.first_day(), this_month.last_day())),
        defined("Last Month", (last_month.first_day(), last_month.last_day())),
    ]
}
