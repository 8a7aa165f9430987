use chrono::{Local, NaiveDate, Weekday};

use crate::config::Config;
use crate::defaults::default_ranges;
use crate::error::Result;
use crate::month::{build_month_grid_from, MonthIndex, Week};
use crate::navigation::{Bounds, Marker, NavigationAction, Navigator};
use crate::range::{self, DateRange, DefinedRange};
use crate::selection::{Selection, SelectionController};
use crate::translation::Translation;

/// One open picker: both visible months, the current selection and the
/// resolved configuration.
pub struct DateRangePicker {
    navigator: Navigator,
    selection: SelectionController,
    ranges: Vec<DefinedRange>,
    translation: Translation,
    week_start: Weekday,
    today: NaiveDate,
}

impl DateRangePicker {
    pub fn new(config: &Config, today: NaiveDate) -> Result<Self> {
        let bounds = Bounds::new(config.min_date, config.max_date)?;
        config.translation.validate()?;

        let seed = seed_range(&config.initial_date_range, &bounds);
        let navigator = initial_navigator(&seed, today, bounds);

        let mut ranges: Vec<DefinedRange> = config
            .defined_ranges
            .iter()
            .cloned()
            .inspect(|r| {
                if r.is_inverted() {
                    log::warn!("Swapping inverted bounds of defined range '{}'", r.label)
                }
            })
            .map(DefinedRange::normalized)
            .collect();

        if config.default_ranges {
            ranges.extend(default_ranges(today, config.week_start.0));
        }

        // stored clamped so a selected quick pick still matches its entry
        let ranges = ranges
            .into_iter()
            .map(|r| clamp_defined_range(r, &bounds))
            .collect();

        Ok(DateRangePicker {
            navigator,
            selection: SelectionController::new(Selection::from(seed), bounds),
            ranges,
            translation: config.translation.clone(),
            week_start: config.week_start.0,
            today,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn date_range(&self) -> DateRange {
        self.selection.date_range()
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    pub fn hover_date(&self) -> Option<NaiveDate> {
        self.selection.hover_date()
    }

    pub fn first_month(&self) -> MonthIndex {
        self.navigator.first_month()
    }

    pub fn second_month(&self) -> MonthIndex {
        self.navigator.second_month()
    }

    pub fn month(&self, marker: Marker) -> MonthIndex {
        self.navigator.month(marker)
    }

    pub fn bounds(&self) -> &Bounds {
        self.navigator.bounds()
    }

    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Quick picks in display order, each with whether it equals the current
    /// selection.
    pub fn defined_ranges(&self) -> impl Iterator<Item = (&DefinedRange, bool)> + '_ {
        let current = self.date_range();
        self.ranges
            .iter()
            .map(move |r| (r, range::matches_defined_range(&current, r)))
    }

    pub fn defined_range(&self, label: &str) -> Option<&DefinedRange> {
        self.ranges.iter().find(|r| r.label == label)
    }

    pub fn on_day_click(&mut self, day: NaiveDate) {
        self.selection.on_day_click(day, &mut self.navigator);
    }

    pub fn on_day_hover(&mut self, day: NaiveDate) {
        self.selection.on_day_hover(day);
    }

    pub fn navigate(&mut self, marker: Marker, action: NavigationAction) -> bool {
        self.navigator.navigate(marker, action)
    }

    pub fn select_defined_range(&mut self, defined: &DefinedRange) {
        self.selection
            .select_defined_range(defined, &mut self.navigator);
    }

    /// Returns false if no quick pick carries `label`.
    pub fn select_defined_range_by_label(&mut self, label: &str) -> bool {
        match self.ranges.iter().find(|r| r.label == label) {
            Some(defined) => {
                self.selection
                    .select_defined_range(defined, &mut self.navigator);
                true
            }
            None => false,
        }
    }

    pub fn is_in_range(&self, day: NaiveDate) -> bool {
        range::is_in_range(day, &self.date_range())
    }

    pub fn in_hover_range(&self, day: NaiveDate) -> bool {
        self.selection.in_hover_range(day)
    }

    pub fn can_navigate(&self, marker: Marker, action: NavigationAction) -> bool {
        self.navigator.can_navigate(marker, action)
    }

    pub fn is_day_enabled(&self, day: NaiveDate) -> bool {
        self.bounds().contains(day)
    }

    pub fn month_grid(&self, marker: Marker) -> Vec<Week> {
        build_month_grid_from(self.month(marker), self.week_start)
    }

    pub fn header(&self) -> (String, String) {
        self.translation.header_text(&self.date_range())
    }
}

fn seed_range(seed: &DateRange, bounds: &Bounds) -> DateRange {
    if seed.is_inverted() {
        log::warn!("Swapping inverted initial date range");
    }

    let clamped = DateRange::new(
        seed.start_date.map(|d| bounds.clamp(d)),
        seed.end_date.map(|d| bounds.clamp(d)),
    )
    .normalized();

    if clamped != seed.normalized() {
        log::warn!("Initial date range clamped into {:?}", bounds);
    }

    clamped
}

fn clamp_defined_range(defined: DefinedRange, bounds: &Bounds) -> DefinedRange {
    let start = bounds.clamp(defined.start_date);
    let end = bounds.clamp(defined.end_date);

    if (start, end) != (defined.start_date, defined.end_date) {
        log::debug!("Defined range '{}' clamped into {:?}", defined.label, bounds);
    }

    DefinedRange::new(defined.label, start, end)
}

fn initial_navigator(seed: &DateRange, today: NaiveDate, bounds: Bounds) -> Navigator {
    let anchor = seed.start_date.or(seed.end_date).unwrap_or(today);
    let first = bounds.clamp_month(MonthIndex::from(anchor));

    match seed.end_date.map(MonthIndex::from) {
        Some(second) if seed.start_date.is_some() => {
            Navigator::with_months(first, second, bounds)
        }
        _ => Navigator::new(first, bounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    use Marker::*;
    use NavigationAction::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker(config: &Config) -> DateRangePicker {
        DateRangePicker::new(config, ymd(2024, 3, 13)).unwrap()
    }

    #[test]
    fn opens_on_current_month() {
        let p = picker(&Config::default());

        assert_eq!(p.first_month(), MonthIndex::new(Month::March, 2024));
        assert_eq!(p.second_month(), MonthIndex::new(Month::April, 2024));
        assert_eq!(p.date_range(), DateRange::empty());
        assert_eq!(p.hover_date(), None);
        assert_eq!(p.defined_ranges().count(), 0);
    }

    #[test]
    fn opens_on_seeded_range() {
        let mut config = Config::default();
        config.initial_date_range = DateRange::between(ymd(2023, 11, 2), ymd(2024, 1, 5));
        let p = picker(&config);

        assert_eq!(p.first_month(), MonthIndex::new(Month::November, 2023));
        assert_eq!(p.second_month(), MonthIndex::new(Month::January, 2024));
        assert!(p.selection().is_complete());
    }

    #[test]
    fn inverted_seed_is_swapped() {
        let mut config = Config::default();
        config.initial_date_range = DateRange::between(ymd(2024, 5, 9), ymd(2024, 5, 1));
        let p = picker(&config);

        assert_eq!(p.date_range(), DateRange::between(ymd(2024, 5, 1), ymd(2024, 5, 9)));
        assert_eq!(p.first_month(), MonthIndex::new(Month::May, 2024));
        assert_eq!(p.second_month(), MonthIndex::new(Month::June, 2024));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut config = Config::default();
        config.min_date = Some(ymd(2024, 5, 1));
        config.max_date = Some(ymd(2024, 4, 1));

        assert!(DateRangePicker::new(&config, ymd(2024, 3, 13)).is_err());
    }

    #[test]
    fn today_outside_bounds_opens_within() {
        let mut config = Config::default();
        config.min_date = Some(ymd(2025, 2, 10));
        let p = picker(&config);

        assert_eq!(p.first_month(), MonthIndex::new(Month::February, 2025));
        assert!(!p.can_navigate(First, Previous));
        assert!(!p.is_day_enabled(ymd(2025, 2, 9)));
    }

    #[test]
    fn click_scenario() {
        let mut p = picker(&Config::default());

        p.on_day_click(ymd(2024, 3, 10));
        assert_eq!(p.date_range(), DateRange::new(Some(ymd(2024, 3, 10)), None));

        p.on_day_click(ymd(2024, 3, 5));
        assert_eq!(p.date_range(), DateRange::between(ymd(2024, 3, 5), ymd(2024, 3, 10)));
        assert!(p.is_in_range(ymd(2024, 3, 7)));

        p.on_day_click(ymd(2024, 3, 20));
        assert_eq!(p.date_range(), DateRange::new(Some(ymd(2024, 3, 20)), None));
        assert!(!p.is_in_range(ymd(2024, 3, 7)));
    }

    #[test]
    fn hover_scenario() {
        let mut p = picker(&Config::default());

        p.on_day_click(ymd(2024, 3, 5));
        p.on_day_hover(ymd(2024, 3, 1));
        assert_eq!(p.hover_date(), Some(ymd(2024, 3, 1)));
        assert!(p.in_hover_range(ymd(2024, 3, 3)));
        assert!(!p.in_hover_range(ymd(2024, 3, 10)));
    }

    #[test]
    fn defined_range_today() {
        let mut config = Config::default();
        config.default_ranges = true;
        let mut p = picker(&config);

        assert!(p.select_defined_range_by_label("Today"));
        assert_eq!(p.date_range(), DateRange::between(ymd(2024, 3, 13), ymd(2024, 3, 13)));
        assert_eq!(p.first_month(), MonthIndex::new(Month::March, 2024));
        assert_eq!(p.second_month(), MonthIndex::new(Month::April, 2024));

        let active: Vec<&str> = p
            .defined_ranges()
            .filter(|(_, active)| *active)
            .map(|(r, _)| r.label.as_str())
            .collect();
        assert_eq!(active, vec!["Today"]);
        assert!(!p.select_defined_range_by_label("Someday"));
    }

    #[test]
    fn clamped_quick_pick_stays_active() {
        let mut config = Config::default();
        config.default_ranges = true;
        config.max_date = Some(ymd(2024, 3, 13));
        let mut p = picker(&config);

        assert!(p.select_defined_range_by_label("This Month"));
        assert_eq!(p.date_range(), DateRange::between(ymd(2024, 3, 1), ymd(2024, 3, 13)));

        let this_month = p.defined_range("This Month").unwrap();
        assert_eq!(this_month.end_date, ymd(2024, 3, 13));

        let active: Vec<&str> = p
            .defined_ranges()
            .filter(|(_, active)| *active)
            .map(|(r, _)| r.label.as_str())
            .collect();
        assert_eq!(active, vec!["This Month"]);
    }

    #[test]
    fn caller_ranges_come_first_and_are_normalized() {
        let mut config = Config::default();
        config.default_ranges = true;
        config.defined_ranges = vec![DefinedRange::new(
            "Backwards".to_owned(),
            ymd(2024, 2, 1),
            ymd(2024, 1, 1),
        )];
        let mut p = picker(&config);

        let (first, _) = p.defined_ranges().next().unwrap();
        assert_eq!(first.label, "Backwards");
        assert_eq!(first.start_date, ymd(2024, 1, 1));

        let backwards = p.defined_range("Backwards").cloned().unwrap();
        p.select_defined_range(&backwards);
        assert_eq!(p.first_month(), MonthIndex::new(Month::January, 2024));
        assert_eq!(p.second_month(), MonthIndex::new(Month::February, 2024));
    }

    #[test]
    fn navigation_through_picker() {
        let mut p = picker(&Config::default());

        assert!(!p.navigate(First, Next));
        assert!(p.navigate(Second, Next));
        assert!(p.can_navigate(First, Next));
        assert!(p.navigate(First, Next));
        assert_eq!(p.first_month(), MonthIndex::new(Month::April, 2024));
        assert_eq!(p.second_month(), MonthIndex::new(Month::May, 2024));
    }

    #[test]
    fn grid_and_header_follow_state() {
        let mut p = picker(&Config::default());

        let grid = p.month_grid(Second);
        assert!(grid.iter().flatten().any(|c| c.in_month && c.date == ymd(2024, 4, 30)));

        p.on_day_click(ymd(2024, 3, 5));
        let (start, end) = p.header();
        assert_eq!(start, "March 05, 2024");
        assert_eq!(end, "End Date");
    }
}
