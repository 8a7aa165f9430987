use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Display};

use crate::month::{DayCell, Week};
use crate::navigation::{Marker, NavigationAction};
use crate::picker::DateRangePicker;
use crate::range;

const CELL_WIDTH: usize = 4;
const MONTH_WIDTH: usize = 7 * CELL_WIDTH;
const SEPARATOR: &str = "  |  ";

struct DayView {
    day_num: u32,
    mark: char,
    is_today: bool,
}

impl DayView {
    fn new(cell: &DayCell, picker: &DateRangePicker) -> Option<Self> {
        if !cell.in_month {
            return None;
        }

        Some(DayView {
            day_num: cell.date.day(),
            mark: mark_of(cell.date, picker),
            is_today: cell.date == picker.today(),
        })
    }
}

fn mark_of(day: NaiveDate, picker: &DateRangePicker) -> char {
    let current = picker.date_range();

    if !picker.is_day_enabled(day) {
        'x'
    } else if range::is_range_start(day, &current) {
        '['
    } else if range::is_range_end(day, &current) {
        ']'
    } else if picker.is_in_range(day) {
        '='
    } else if picker.in_hover_range(day) {
        '~'
    } else {
        ' '
    }
}

impl Display for DayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let today = if self.is_today { '*' } else { ' ' };
        write!(f, "{}{}{:>2}", today, self.mark, self.day_num)
    }
}

/// Text rendering of a picker: header, both calendars and the quick picks.
pub struct PickerView<'a> {
    picker: &'a DateRangePicker,
}

impl<'a> PickerView<'a> {
    pub fn new(picker: &'a DateRangePicker) -> Self {
        PickerView { picker }
    }

    fn title(&self, marker: Marker) -> String {
        let arrow = |action, symbol| {
            if self.picker.can_navigate(marker, action) {
                symbol
            } else {
                ' '
            }
        };

        format!(
            "{}{:^width$}{}",
            arrow(NavigationAction::Previous, '<'),
            self.picker
                .translation()
                .month_title(&self.picker.month(marker)),
            arrow(NavigationAction::Next, '>'),
            width = MONTH_WIDTH - 2
        )
    }

    fn week_days(&self) -> String {
        self.picker
            .translation()
            .week_day_labels(self.picker.week_start())
            .iter()
            .map(|label| format!("{:>width$}", label, width = CELL_WIDTH))
            .collect()
    }

    fn week_line(&self, week: Option<&Week>) -> String {
        match week {
            Some(week) => week
                .iter()
                .map(|cell| match DayView::new(cell, self.picker) {
                    Some(day) => day.to_string(),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect(),
            None => " ".repeat(MONTH_WIDTH),
        }
    }
}

impl Display for PickerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.picker.header();
        writeln!(
            f,
            "{:^width$}->{:^width$}",
            start,
            end,
            width = MONTH_WIDTH
        )?;
        writeln!(f, "{}", "-".repeat(2 * MONTH_WIDTH + SEPARATOR.len()))?;

        writeln!(
            f,
            "{}{}{}",
            self.title(Marker::First),
            SEPARATOR,
            self.title(Marker::Second)
        )?;
        let week_days = self.week_days();
        writeln!(f, "{}{}{}", week_days, SEPARATOR, week_days)?;

        let first = self.picker.month_grid(Marker::First);
        let second = self.picker.month_grid(Marker::Second);
        for row in 0..first.len().max(second.len()) {
            writeln!(
                f,
                "{}{}{}",
                self.week_line(first.get(row)),
                SEPARATOR,
                self.week_line(second.get(row))
            )?;
        }

        for (defined, active) in self.picker.defined_ranges() {
            writeln!(f, "{} {}", if active { '>' } else { ' ' }, defined.label)?;
        }

        Ok(())
    }
}
