extern crate rangepick as lib;

use chrono::NaiveDate;
use flexi_logger::{FileSpec, Logger};
use lib::command::Command;
use lib::picker::DateRangePicker;
use lib::view::PickerView;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rangepick",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Rangepick - pick a date range on two side-by-side calendars."
)]
pub struct Args {
    #[structopt(
        help = "file with one command per line, stdin if omitted",
        parse(from_os_str)
    )]
    pub script: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "today", help = "pretend today is this date (YYYY-MM-DD)")]
    pub today: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn run(
    picker: &mut DateRangePicker,
    input: impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    for (num, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                log::warn!("line {}: {}", num + 1, e);
                eprintln!("line {}: {}", num + 1, e);
                continue;
            }
        };

        match cmd {
            Command::Quit => break,
            Command::Show => print!("{}", PickerView::new(picker)),
            cmd => {
                if let Err(e) = cmd.apply(picker) {
                    log::warn!("line {}: {}", num + 1, e);
                    eprintln!("line {}: {}", num + 1, e);
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        println!("Rangepick ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut picker = match args.today {
        Some(today) => DateRangePicker::new(&config, today)?,
        None => DateRangePicker::from_config(&config)?,
    };

    match args.script {
        Some(path) => run(&mut picker, BufReader::new(File::open(path)?))?,
        None => run(&mut picker, io::stdin().lock())?,
    }

    print!("{}", PickerView::new(&picker));

    Ok(())
}
