use chrono::NaiveDate;
use derive_more::Constructor;
use serde::Deserialize;

/// A possibly incomplete selection. When both ends are set,
/// `start_date <= end_date` holds for every range handed out by the picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Constructor, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        DateRange::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange::new(Some(start), Some(end))
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(s), Some(e)) if s > e)
    }

    /// Swaps inverted ends.
    pub fn normalized(self) -> Self {
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) if s > e => DateRange::between(e, s),
            _ => self,
        }
    }
}

/// A named quick-pick range, e.g. "Last 7 Days".
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Deserialize)]
pub struct DefinedRange {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DefinedRange {
    pub fn is_inverted(&self) -> bool {
        self.start_date > self.end_date
    }

    pub fn normalized(self) -> Self {
        if self.is_inverted() {
            DefinedRange::new(self.label, self.end_date, self.start_date)
        } else {
            self
        }
    }

    pub fn as_range(&self) -> DateRange {
        DateRange::between(self.start_date, self.end_date)
    }
}

pub fn is_in_range(day: NaiveDate, range: &DateRange) -> bool {
    match (range.start_date, range.end_date) {
        (Some(start), Some(end)) => start <= day && day <= end,
        _ => false,
    }
}

/// Whether `day` lies between the fixed end of a pending selection and
/// `hover`, in either order. Complete and empty ranges have no preview.
pub fn is_in_hover_range(day: NaiveDate, range: &DateRange, hover: NaiveDate) -> bool {
    let anchor = match (range.start_date, range.end_date) {
        (Some(anchor), None) | (None, Some(anchor)) => anchor,
        _ => return false,
    };

    anchor.min(hover) <= day && day <= anchor.max(hover)
}

pub fn matches_defined_range(range: &DateRange, defined: &DefinedRange) -> bool {
    range.start_date == Some(defined.start_date) && range.end_date == Some(defined.end_date)
}

pub fn is_range_start(day: NaiveDate, range: &DateRange) -> bool {
    range.start_date == Some(day)
}

pub fn is_range_end(day: NaiveDate, range: &DateRange) -> bool {
    range.end_date == Some(day)
}
