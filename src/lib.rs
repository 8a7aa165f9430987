pub mod command;
pub mod config;
pub mod defaults;
pub mod error;
pub mod month;
pub mod navigation;
pub mod picker;
pub mod range;
pub mod selection;
pub mod translation;
pub mod view;

pub use error::{Error, ErrorKind, Result};
pub use month::{build_month_grid, DayCell, MonthIndex, Week};
pub use navigation::{Bounds, Marker, NavigationAction, Navigator};
pub use picker::DateRangePicker;
pub use range::{
    is_in_hover_range, is_in_range, matches_defined_range, DateRange, DefinedRange,
};
pub use selection::{Selection, SelectionController};
