use chrono::NaiveDate;

use crate::navigation::{Bounds, Navigator};
use crate::range::{self, DateRange, DefinedRange};

/// Progress of the click protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Empty,
    /// One end is fixed, the next click fixes the other.
    Start(NaiveDate),
    Complete { start: NaiveDate, end: NaiveDate },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Empty
    }
}

impl Selection {
    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Complete { .. })
    }

    /// State after clicking `day`.
    pub fn click(self, day: NaiveDate) -> Selection {
        match self {
            Selection::Empty | Selection::Complete { .. } => Selection::Start(day),
            Selection::Start(anchor) => Selection::Complete {
                start: anchor.min(day),
                end: anchor.max(day),
            },
        }
    }
}

impl From<DateRange> for Selection {
    fn from(range: DateRange) -> Self {
        match (range.start_date, range.end_date) {
            (Some(s), Some(e)) => Selection::Complete {
                start: s.min(e),
                end: s.max(e),
            },
            (Some(anchor), None) | (None, Some(anchor)) => Selection::Start(anchor),
            (None, None) => Selection::Empty,
        }
    }
}

impl From<Selection> for DateRange {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Empty => DateRange::empty(),
            Selection::Start(anchor) => DateRange::new(Some(anchor), None),
            Selection::Complete { start, end } => DateRange::between(start, end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    selection: Selection,
    hover: Option<NaiveDate>,
    bounds: Bounds,
}

impl SelectionController {
    pub fn new(selection: Selection, bounds: Bounds) -> Self {
        SelectionController {
            selection,
            hover: None,
            bounds,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn date_range(&self) -> DateRange {
        self.selection.into()
    }

    pub fn hover_date(&self) -> Option<NaiveDate> {
        self.hover
    }

    pub fn in_hover_range(&self, day: NaiveDate) -> bool {
        self.hover
            .map_or(false, |hover| range::is_in_hover_range(day, &self.date_range(), hover))
    }

    pub fn on_day_click(&mut self, day: NaiveDate, navigator: &mut Navigator) {
        if !self.bounds.contains(day) {
            log::debug!("Ignoring click on {} outside of bounds", day);
            return;
        }

        self.selection = self.selection.click(day);
        self.hover = if self.selection.is_complete() {
            None
        } else {
            Some(day)
        };
        log::debug!("Selection is now {:?}", self.selection);

        navigator.reveal(day);
    }

    pub fn on_day_hover(&mut self, day: NaiveDate) {
        if self.selection.is_complete() || !self.bounds.contains(day) {
            return;
        }

        self.hover = Some(day);
    }

    pub fn select_defined_range(&mut self, defined: &DefinedRange, navigator: &mut Navigator) {
        let start = self.bounds.clamp(defined.start_date.min(defined.end_date));
        let end = self.bounds.clamp(defined.start_date.max(defined.end_date));

        log::debug!("Selecting '{}': {} - {}", defined.label, start, end);
        self.selection = Selection::Complete { start, end };
        self.hover = None;

        navigator.show_range(start, end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::MonthIndex;
    use chrono::Month;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pending(anchor: NaiveDate) -> SelectionController {
        SelectionController::new(Selection::Start(anchor), Bounds::unbounded())
    }

    fn march_2024() -> Navigator {
        Navigator::new(MonthIndex::new(Month::March, 2024), Bounds::unbounded())
    }

    #[test]
    fn click_protocol() {
        let mut nav = march_2024();
        let mut ctrl = SelectionController::new(Selection::Empty, Bounds::unbounded());

        ctrl.on_day_click(ymd(2024, 3, 10), &mut nav);
        assert_eq!(ctrl.date_range(), DateRange::new(Some(ymd(2024, 3, 10)), None));

        ctrl.on_day_click(ymd(2024, 3, 5), &mut nav);
        assert_eq!(
            ctrl.date_range(),
            DateRange::between(ymd(2024, 3, 5), ymd(2024, 3, 10))
        );

        ctrl.on_day_click(ymd(2024, 3, 20), &mut nav);
        assert_eq!(ctrl.date_range(), DateRange::new(Some(ymd(2024, 3, 20)), None));
    }

    #[test]
    fn click_forward_completes_in_order() {
        let mut nav = march_2024();
        let mut ctrl = pending(ymd(2024, 3, 5));

        ctrl.on_day_click(ymd(2024, 4, 2), &mut nav);
        assert_eq!(
            ctrl.selection(),
            Selection::Complete {
                start: ymd(2024, 3, 5),
                end: ymd(2024, 4, 2)
            }
        );
    }

    #[test]
    fn same_day_twice_is_single_day_range() {
        let mut nav = march_2024();
        let mut ctrl = SelectionController::new(Selection::Empty, Bounds::unbounded());

        ctrl.on_day_click(ymd(2024, 3, 7), &mut nav);
        ctrl.on_day_click(ymd(2024, 3, 7), &mut nav);
        assert_eq!(
            ctrl.date_range(),
            DateRange::between(ymd(2024, 3, 7), ymd(2024, 3, 7))
        );
    }

    #[test]
    fn out_of_bounds_events_are_ignored() {
        let bounds = Bounds::new(Some(ymd(2024, 3, 1)), Some(ymd(2024, 3, 31))).unwrap();
        let mut nav = Navigator::new(MonthIndex::new(Month::March, 2024), bounds);
        let mut ctrl = SelectionController::new(Selection::Empty, bounds);

        ctrl.on_day_click(ymd(2024, 2, 29), &mut nav);
        ctrl.on_day_hover(ymd(2024, 4, 1));
        assert_eq!(ctrl.selection(), Selection::Empty);
        assert_eq!(ctrl.hover_date(), None);
        assert_eq!(nav.first_month(), MonthIndex::new(Month::March, 2024));
    }

    #[test]
    fn hover_preview_while_pending() {
        let mut ctrl = pending(ymd(2024, 3, 5));

        ctrl.on_day_hover(ymd(2024, 3, 1));
        assert_eq!(ctrl.hover_date(), Some(ymd(2024, 3, 1)));
        assert!(ctrl.in_hover_range(ymd(2024, 3, 3)));
        assert!(!ctrl.in_hover_range(ymd(2024, 3, 10)));
    }

    #[test]
    fn hover_ignored_once_complete() {
        let mut nav = march_2024();
        let mut ctrl = pending(ymd(2024, 3, 5));

        ctrl.on_day_click(ymd(2024, 3, 8), &mut nav);
        assert_eq!(ctrl.hover_date(), None);

        ctrl.on_day_hover(ymd(2024, 3, 20));
        assert_eq!(ctrl.hover_date(), None);
        assert!(!ctrl.in_hover_range(ymd(2024, 3, 6)));
    }

    #[test]
    fn hover_allowed_before_first_click() {
        let mut ctrl = SelectionController::new(Selection::Empty, Bounds::unbounded());

        ctrl.on_day_hover(ymd(2024, 3, 1));
        assert_eq!(ctrl.hover_date(), Some(ymd(2024, 3, 1)));
        assert!(!ctrl.in_hover_range(ymd(2024, 3, 1)));
    }

    #[test]
    fn click_before_visible_months_moves_first_calendar() {
        let mut nav = march_2024();
        let mut ctrl = SelectionController::new(Selection::Empty, Bounds::unbounded());

        ctrl.on_day_click(ymd(2024, 1, 30), &mut nav);
        assert_eq!(nav.first_month(), MonthIndex::new(Month::January, 2024));
        assert_eq!(nav.second_month(), MonthIndex::new(Month::April, 2024));
    }

    #[test]
    fn click_after_visible_months_moves_second_calendar() {
        let mut nav = march_2024();
        let mut ctrl = pending(ymd(2024, 3, 2));

        // trailing padding cell of the April grid
        ctrl.on_day_click(ymd(2024, 5, 4), &mut nav);
        assert_eq!(nav.first_month(), MonthIndex::new(Month::March, 2024));
        assert_eq!(nav.second_month(), MonthIndex::new(Month::May, 2024));
    }

    #[test]
    fn defined_range_bypasses_click_protocol() {
        let mut nav = march_2024();
        let mut ctrl = pending(ymd(2024, 3, 5));
        let today = DefinedRange::new("Today".to_owned(), ymd(2024, 6, 12), ymd(2024, 6, 12));

        ctrl.select_defined_range(&today, &mut nav);
        assert_eq!(ctrl.date_range(), today.as_range());
        assert_eq!(ctrl.hover_date(), None);
        assert_eq!(nav.first_month(), MonthIndex::new(Month::June, 2024));
        assert_eq!(nav.second_month(), MonthIndex::new(Month::July, 2024));
    }

    #[test]
    fn defined_range_is_clamped_into_bounds() {
        let bounds = Bounds::new(Some(ymd(2024, 3, 1)), Some(ymd(2024, 5, 31))).unwrap();
        let mut nav = Navigator::new(MonthIndex::new(Month::March, 2024), bounds);
        let mut ctrl = SelectionController::new(Selection::Empty, bounds);
        let wide = DefinedRange::new("Wide".to_owned(), ymd(2024, 1, 1), ymd(2024, 12, 31));

        ctrl.select_defined_range(&wide, &mut nav);
        assert_eq!(
            ctrl.date_range(),
            DateRange::between(ymd(2024, 3, 1), ymd(2024, 5, 31))
        );
        assert_eq!(nav.second_month(), MonthIndex::new(Month::May, 2024));
    }

    #[test]
    fn seeded_ranges_convert_to_states() {
        let day = ymd(2024, 3, 5);

        assert_eq!(Selection::from(DateRange::empty()), Selection::Empty);
        assert_eq!(Selection::from(DateRange::new(None, Some(day))), Selection::Start(day));
        assert_eq!(
            Selection::from(DateRange::between(ymd(2024, 3, 9), day)),
            Selection::Complete {
                start: day,
                end: ymd(2024, 3, 9)
            }
        );
    }
}
