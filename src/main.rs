mod app;
mod help;
use crate::app::App;
use anyhow::Context;
use calpick::{CalendarConfig, DateExt, DateRange, RangeCalendar, SingleCalendar};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    first_day: Option<u8>,
    min_date: Option<Date>,
    max_date: Option<Date>,
    log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("first-day") => {
                    opts.first_day = Some(parser.value()?.parse()?);
                }
                Arg::Long("min") => opts.min_date = Some(parse_date(parser.value()?.string()?)?),
                Arg::Long("max") => opts.max_date = Some(parse_date(parser.value()?.string()?)?),
                Arg::Long("log") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(parse_date(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = opts.log_file.as_deref() {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut config = CalendarConfig::new()
                    .bounds(opts.min_date, opts.max_date)
                    .context("invalid date bounds")?;
                if let Some(index) = opts.first_day {
                    config = config
                        .first_day_index(index)
                        .context("invalid --first-day")?;
                }
                let start = opts.date.unwrap_or(today);
                let single = SingleCalendar::new(today)
                    .with_config(config.clone())
                    .with_default_active_date(start)
                    .with_value(None);
                let mut range = RangeCalendar::new(today)
                    .with_config(config)
                    .with_default_active_date(start);
                if let Some(seed) = seed_range(start) {
                    range = range.with_default_value(seed);
                }
                log::info!("Starting on {start} (today is {today})");
                with_terminal(|terminal| {
                    App::new(single, range)
                        .run(terminal)
                        .context("failed to run calendar")
                })
            }
            Command::Help => {
                println!("Usage: calpick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date and a date range from terminal calendars");
                println!();
                println!("Options:");
                println!("  -f, --first-day N  First day of the week, 0 (Sunday) to 6 (Saturday)");
                println!("      --min DATE     Earliest date that may be picked");
                println!("      --max DATE     Latest date that may be picked");
                println!("      --log FILE     Write a debug log to FILE");
                println!("  -h, --help         Display this help message and exit");
                println!("  -V, --version      Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: String) -> Result<Date, lexopt::Error> {
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

// The range calendar starts out showing the 12th through 15th of the month
// before the starting date
fn seed_range(start: Date) -> Option<DateRange> {
    let month = start.add_months(-1).ok()?;
    Some(DateRange::new(
        month.replace_day(12).ok()?,
        month.replace_day(15).ok()?,
    ))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Best effort; the terminal is being torn down either way
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    r
}
