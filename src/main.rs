mod debug_report;

use chrono::{Local, NaiveDateTime};
use curbside::{Direction, Options, StreetInterval, build_intervals_with, is_allowed, parse_verbose};
use geo::{Coord, LineString, Point};
use std::io::{self, IsTerminal, Read};
use std::process::exit;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            println!("{}", help_text());
            return;
        }
        Ok(Command::Version) => {
            println!("curbside {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let options = match Options::from_env() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            exit(2);
        }
    };

    let input = match cli.description.clone() {
        Some(text) => text,
        None => match read_stdin() {
            Ok(text) if !text.trim().is_empty() => text.trim_end().to_string(),
            Ok(_) => {
                eprintln!("error: no input provided\n\n{}", help_text());
                exit(2);
            }
            Err(err) => {
                eprintln!("{err}");
                exit(2);
            }
        },
    };

    let at = cli.at.unwrap_or_else(|| Local::now().naive_local());
    let res = parse_verbose(&input);

    let intervals = match &cli.placement {
        Some(placement) => match build_intervals_with(&placement.street, placement.sign, cli.direction, &options) {
            Ok(intervals) => Some(intervals),
            Err(err) => {
                eprintln!("error: {err}");
                exit(1);
            }
        },
        None => None,
    };

    if cli.json {
        let payload = serde_json::json!({
            "rule": &res.rule,
            "at": at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "allowed": is_allowed(&res.rule, at),
            "options": {
                "interval_length": options.interval_length,
                "fallback_offset": options.fallback_offset,
                "search_radius_m": options.search_radius_m,
            },
            "direction": cli.direction,
            "intervals": intervals.as_deref().map(intervals_json),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to serialize rule: {err}");
                exit(1);
            }
        }
        return;
    }

    debug_report::print_run(&input, &res.rule, &res.details, at, cli.color);
    if let Some(intervals) = &intervals {
        debug_report::print_intervals(intervals, cli.direction, &options, cli.color);
    }
}

fn intervals_json(intervals: &[StreetInterval]) -> serde_json::Value {
    intervals
        .iter()
        .map(|interval| {
            serde_json::json!({
                "anchor": [interval.anchor_point.x(), interval.anchor_point.y()],
                "geometry": interval.geometry.0.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>(),
            })
        })
        .collect()
}

enum Command {
    Run(Cli),
    Help,
    Version,
}

/// A street and a sign on it, given as `x,y` coordinates.
#[derive(Debug, PartialEq)]
struct Placement {
    street: LineString<f64>,
    sign: Point<f64>,
}

#[derive(Debug, PartialEq)]
struct Cli {
    description: Option<String>,
    at: Option<NaiveDateTime>,
    json: bool,
    color: bool,
    direction: Direction,
    placement: Option<Placement>,
}

impl Cli {
    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
        let mut args = args.into_iter();
        let mut words: Vec<String> = Vec::new();
        let mut at = None;
        let mut json = false;
        let mut color = io::stdout().is_terminal();
        let mut direction = Direction::BothSides;
        let mut street = None;
        let mut sign = None;

        while let Some(arg) = args.next() {
            // `--flag=value` and `--flag value` are both accepted.
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
                _ => (arg.clone(), None),
            };
            let value = |args: &mut dyn Iterator<Item = String>| {
                inline.clone().or_else(|| args.next()).ok_or_else(|| format!("error: {flag} expects a value"))
            };

            match flag.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-V" | "--version" => return Ok(Command::Version),
                "--color" => color = true,
                "--no-color" => color = false,
                "--json" => json = true,
                "--at" => at = Some(parse_instant(&value(&mut args)?)?),
                "--arrow" => direction = parse_direction(&value(&mut args)?),
                "--street" => street = Some(parse_street(&value(&mut args)?)?),
                "--sign" => sign = Some(Point::from(parse_coord(&value(&mut args)?)?)),
                "-i" | "--input" => words.push(value(&mut args)?),
                "--" => words.extend(args.by_ref()),
                // Sign descriptions start with `\P` or `\A`, never with a dash.
                other if other.starts_with('-') => return Err(format!("error: unknown option '{other}'")),
                other => words.push(other.to_string()),
            }
        }

        let placement = match (street, sign) {
            (Some(street), Some(sign)) => Some(Placement { street, sign }),
            (None, None) => None,
            _ => return Err("error: --street and --sign must be given together".to_string()),
        };
        let description = if words.is_empty() { None } else { Some(words.join(" ")) };

        Ok(Command::Run(Cli { description, at, json, color, direction, placement }))
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_instant(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("error: invalid --at '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

/// Arrow code (`0`..`3`) or label (`left`, `up`, ...).
fn parse_direction(value: &str) -> Direction {
    match value.trim().parse::<i64>() {
        Ok(code) => Direction::from_arrow_code(code),
        Err(_) => Direction::from_label(value),
    }
}

fn parse_coord(value: &str) -> Result<Coord<f64>, String> {
    let bad = || format!("error: invalid coordinate '{value}' (expected x,y)");
    let (x, y) = value.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse::<f64>().map_err(|_| bad())?;
    let y = y.trim().parse::<f64>().map_err(|_| bad())?;
    Ok(Coord { x, y })
}

/// `x,y;x,y;...`
fn parse_street(value: &str) -> Result<LineString<f64>, String> {
    let coords = value.split(';').filter(|part| !part.trim().is_empty()).map(parse_coord).collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn help_text() -> String {
    format!(
        "curbside {version}

Parse a parking-sign description and tell whether parking is allowed.

Usage:
  curbside [OPTIONS] [--] <description...>
  curbside [OPTIONS] --input <text>

Options:
  -i, --input <text>         Sign description. If omitted, uses the positional
                             words, or stdin when there are none.
  --at <timestamp>           Instant to evaluate, YYYY-MM-DDTHH:MM:SS.
                             Default: now (local time)
  --street <x,y;x,y;...>     Street polyline; with --sign, prints the covered intervals.
  --sign <x,y>               Sign position.
  --arrow <code|label>       Arrow code 0-3 or both_sides|left|right|up. Default: 0
  --json                     Print the parsed rule and verdict as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter, e.g. curbside=trace. Default: warn
  CURBSIDE_INTERVAL_LENGTH   Length of an \"up\" interval. Default: 50
  CURBSIDE_FALLBACK_OFFSET   Half-width of the fallback interval. Default: 0.0001
  CURBSIDE_SEARCH_RADIUS_M   Street search radius in meters. Default: 100

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, configuration or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Cli {
        match Cli::from_args(args.iter().map(|s| s.to_string())) {
            Ok(Command::Run(cli)) => cli,
            Ok(_) => panic!("expected a run for {args:?}"),
            Err(err) => panic!("{err}"),
        }
    }

    #[test]
    fn positional_words_form_the_description() {
        let cli = run(&[r"\P", "LUN", "AU", "VEN", "--json", "--no-color"]);
        assert_eq!(cli.description.as_deref(), Some(r"\P LUN AU VEN"));
        assert!(cli.json);
        assert!(!cli.color);
        assert_eq!(cli.placement, None);
    }

    #[test]
    fn inline_and_separate_values() {
        let cli = run(&["--at=2023-10-10T09:30:00", "--arrow", "up", "--input", r"\A 7h-9h"]);
        assert_eq!(cli.at, Some(parse_instant("2023-10-10T09:30:00").unwrap()));
        assert_eq!(cli.direction, Direction::Up);
        assert_eq!(cli.description.as_deref(), Some(r"\A 7h-9h"));
    }

    #[test]
    fn street_and_sign_go_together() {
        let cli = run(&["--street", "0,0;100,0", "--sign=10,5", "--arrow=2", "x"]);
        let placement = cli.placement.unwrap();
        assert_eq!(placement.street, LineString::from(vec![(0.0, 0.0), (100.0, 0.0)]));
        assert_eq!(placement.sign, Point::new(10.0, 5.0));
        assert_eq!(cli.direction, Direction::Left);

        assert!(Cli::from_args(["--sign".to_string(), "1,2".to_string()]).is_err());
    }

    #[test]
    fn bad_arguments_are_rejected() {
        for args in [vec!["--at", "tomorrow"], vec!["--frobnicate"], vec!["--street", "0,0;1"], vec!["--at"]] {
            assert!(Cli::from_args(args.iter().map(|s| s.to_string())).is_err(), "{args:?}");
        }
    }
}
