mod app;
mod calendar;
mod digest;
mod document;
mod fetch;
mod help;
mod html;
mod index;
mod jumpto;
mod theme;
mod viewer;
use crate::app::App;
use crate::fetch::{EntrySource, HttpSource};
use crate::index::{iso, YMD_FMT};
use crate::viewer::Viewer;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{Date, OffsetDateTime};
use url::Url;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { base: Url, date: Option<Date> },
    Export { base: Url, date: Date },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut base: Option<Url> = None;
        let mut date: Option<Date> = None;
        let mut export = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('x') | Arg::Long("export") => export = true,
                Arg::Value(value) if base.is_none() => {
                    let value = value.string()?;
                    match Url::parse(&value) {
                        Ok(u) => base = Some(u),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let Some(base) = base else {
            return Err(lexopt::Error::MissingValue { option: None });
        };
        if export {
            let Some(date) = date else {
                return Err(lexopt::Error::MissingValue {
                    option: Some(String::from("export")),
                });
            };
            Ok(Command::Export { base, date })
        } else {
            Ok(Command::Run { base, date })
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { base, date } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut viewer = Viewer::new(HttpSource::new(base), today);
                viewer.startup(date);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(viewer).run(terminal)?;
                    Ok(())
                })
            }
            Command::Export { base, date } => {
                let source = HttpSource::new(base);
                let entries = source.load_index().context("failed to load entry index")?;
                let Some(path) = entries.path_for(date) else {
                    anyhow::bail!("no entry for {}", iso(date));
                };
                let doc = source
                    .load_document(path)
                    .with_context(|| format!("failed to load entry for {}", iso(date)))?;
                print!("{}", html::render_html(&doc));
                Ok(())
            }
            Command::Help => {
                println!("Usage: newscal [OPTIONS] URL [DATE]");
                println!();
                println!("Terminal calendar for browsing daily news digests");
                println!();
                println!("Arguments:");
                println!("  URL     Base URL of the published digest site");
                println!("  DATE    Day to open at startup (YYYY-MM-DD)");
                println!();
                println!("Options:");
                println!("  -x, --export      Print DATE's digest as HTML instead of starting the UI");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
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

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
