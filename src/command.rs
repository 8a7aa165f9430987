use chrono::NaiveDate;
use std::str::FromStr;

use nom::{
    bytes::complete::tag,
    character::complete::{alpha1, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize, rest, verify},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Error, ErrorKind, Result};
use crate::navigation::{Marker, NavigationAction};
use crate::picker::DateRangePicker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click(NaiveDate),
    Hover(NaiveDate),
    Navigate(Marker, NavigationAction, u32),
    Range(String),
    Show,
    Quit,
}

enum Action {
    NoArg(fn() -> Command),
    Date(fn(NaiveDate) -> Command),
    Navigation,
    Label,
}

const COMMANDS: &[(&str, Action)] = &[
    ("click", Action::Date(Command::Click)),
    ("hover", Action::Date(Command::Hover)),
    ("nav", Action::Navigation),
    ("range", Action::Label),
    ("show", Action::NoArg(|| Command::Show)),
    ("quit", Action::NoArg(|| Command::Quit)),
];

fn date(input: &str) -> IResult<&str, NaiveDate> {
    map_res(
        recognize(tuple((digit1, tag("-"), digit1, tag("-"), digit1))),
        |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d"),
    )(input)
}

fn marker(input: &str) -> IResult<&str, Marker> {
    map_res(alpha1, Marker::from_str)(input)
}

fn action(input: &str) -> IResult<&str, NavigationAction> {
    map_res(alpha1, NavigationAction::from_str)(input)
}

/// Largest accepted repeat count, a century of months.
pub const MAX_REPEAT: u32 = 1200;

fn count(input: &str) -> IResult<&str, u32> {
    verify(map_res(digit1, u32::from_str), |n: &u32| *n <= MAX_REPEAT)(input)
}

fn navigation(input: &str) -> IResult<&str, (Marker, NavigationAction, Option<u32>)> {
    all_consuming(tuple((
        preceded(space1, marker),
        preceded(space1, action),
        opt(preceded(space1, count)),
    )))(input)
}

fn label(input: &str) -> IResult<&str, &str> {
    all_consuming(preceded(space1, verify(rest, |s: &str| !s.trim().is_empty())))(input)
}

fn no_arg(input: &str) -> IResult<&str, &str> {
    all_consuming(space0)(input)
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (args, name): (&str, &str) = alpha1::<_, nom::error::Error<&str>>(line)?;

        let (_, act) = COMMANDS
            .iter()
            .find(|(cmd, _)| *cmd == name)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CommandParse,
                    &format!("unknown command '{}'", name),
                )
            })?;

        match act {
            Action::NoArg(cmd) => {
                no_arg(args)?;
                Ok(cmd())
            }
            Action::Date(cmd) => {
                let (_, day) = all_consuming(preceded(space1, date))(args)?;
                Ok(cmd(day))
            }
            Action::Navigation => {
                let (_, (marker, action, repeat)) = navigation(args)?;
                Ok(Command::Navigate(marker, action, repeat.unwrap_or(1)))
            }
            Action::Label => {
                let (_, label) = label(args)?;
                Ok(Command::Range(label.trim().to_owned()))
            }
        }
    }
}

impl Command {
    /// Feeds the command into `picker`. `Show` and `Quit` are left to the
    /// caller.
    pub fn apply(&self, picker: &mut DateRangePicker) -> Result<()> {
        match self {
            Command::Click(day) => picker.on_day_click(*day),
            Command::Hover(day) => picker.on_day_hover(*day),
            Command::Navigate(marker, action, repeat) => {
                for _ in 0..(*repeat).min(MAX_REPEAT) {
                    if !picker.navigate(*marker, *action) {
                        log::info!("Cannot move {} calendar any further", marker);
                        break;
                    }
                }
            }
            Command::Range(label) => {
                if !picker.select_defined_range_by_label(label) {
                    return Err(Error::new(
                        ErrorKind::CommandParse,
                        &format!("no defined range labelled '{}'", label),
                    ));
                }
            }
            Command::Show | Command::Quit => {}
        }

        Ok(())
    }
}
