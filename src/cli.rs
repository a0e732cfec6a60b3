use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) const USAGE: &str = "\
Usage: autosnake [<options>]

Self-driving snake in the terminal

Options:
  -c, --config <PATH>     Read configuration from the given file
      --log-file <PATH>   Write log messages to the given file
      --log-level <LEVEL> Log messages at or above LEVEL [off, error, warn,
                          info, debug, trace]
      --seed <N>          Seed the random number generator for reproducible
                          food placement
      --autopilot         Start with the autopilot engaged
      --manual            Start with the autopilot disengaged
  -h, --help              Show this help and exit
  -V, --version           Show the program version and exit
";

pub(crate) const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// What the program was asked to do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

/// Options for a normal run.  Anything left unset falls back to the
/// configuration file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) log_level: Option<LevelFilter>,
    pub(crate) seed: Option<u64>,
    pub(crate) autopilot: Option<bool>,
}

impl Invocation {
    pub(crate) fn from_env() -> Result<Invocation, UsageError> {
        Invocation::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Invocation, UsageError> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => args.log_level = Some(parser.value()?.parse()?),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("autopilot") => args.autopilot = Some(true),
                Arg::Long("manual") => args.autopilot = Some(false),
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Debug, Error)]
#[error("{0}\nRun `autosnake --help` for usage.")]
pub(crate) struct UsageError(#[from] lexopt::Error);
