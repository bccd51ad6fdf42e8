use std::ffi::OsString;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use thiserror::Error;

pub const USAGE: &str = "\
Parameters are incorrect! Please check again
Optional parameters:
\t-a char: obstacle symbol. Only the first character is used if more than one is given.
\t-b char: spaceship symbol. Only the first character is used if more than one is given.
\t-s number: seed for obstacle generation. Defaults to the current time.";

const FLAGS: [&str; 3] = ["-a", "-b", "-s"];

#[derive(Parser, Debug)]
#[command(
    name = "rustdodge",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Args {
    #[arg(
        short = 'a',
        default_value = "-",
        allow_hyphen_values = true,
        value_parser = parse_symbol
    )]
    obstacle: char,

    #[arg(
        short = 'b',
        default_value = "*",
        allow_hyphen_values = true,
        value_parser = parse_symbol
    )]
    ship: char,

    #[arg(short = 's')]
    seed: Option<u64>,
}

fn parse_symbol(value: &str) -> Result<char, String> {
    value
        .chars()
        .next()
        .ok_or_else(|| "symbol must not be empty".to_string())
}

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("expected flag/value pairs, got {0} argument(s)")]
    OddArgumentCount(usize),
    #[error("unknown flag {0:?}")]
    UnknownFlag(String),
    #[error(transparent)]
    Invalid(#[from] clap::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub obstacle_symbol: char,
    pub ship_symbol: char,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            obstacle_symbol: '-',
            ship_symbol: '*',
            seed: None,
        }
    }
}

impl Settings {
    /// The configured seed, or one taken from the clock.
    pub fn seed_or_now(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

/// Parses the full argument list, program name first.
pub fn parse_args<I, T>(args: I) -> Result<Settings, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let given = args.len().saturating_sub(1);
    if given % 2 != 0 {
        return Err(ArgsError::OddArgumentCount(given));
    }
    // Each pair is a bare flag then its value; clap alone would also take `-a#` or `-a=#`.
    for pair in args[1..].chunks(2) {
        let flag = &pair[0];
        if !flag.to_str().is_some_and(|f| FLAGS.contains(&f)) {
            return Err(ArgsError::UnknownFlag(flag.to_string_lossy().into_owned()));
        }
    }
    let parsed = Args::try_parse_from(args)?;
    Ok(Settings {
        obstacle_symbol: parsed.obstacle,
        ship_symbol: parsed.ship,
        seed: parsed.seed,
    })
}
