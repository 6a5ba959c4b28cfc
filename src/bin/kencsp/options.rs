use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use kencsp::model::GridModel;
use kencsp::propagate::Propagator;
use kencsp::search::{ValueOrder, VariableOrder};

const DEFAULT_PUZZLE_WIDTH: usize = 4;

#[derive(Clone)]
pub(crate) struct Options {
    source: Source,
    propagator: Propagator,
    variable_order: VariableOrder,
    value_order: ValueOrder,
    model: GridModel,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else if let Some(n) = parse_value::<usize>(matches, "queens")? {
            Source::Queens(n)
        } else if let Some(n) = parse_value::<usize>(matches, "grid")? {
            Source::Grid(n)
        } else {
            Source::Generate(Generate {
                count: parse_value(matches, "count")?.unwrap_or(1),
                width: parse_value(matches, "width")?.unwrap_or(DEFAULT_PUZZLE_WIDTH),
            })
        };
        Ok(Self {
            source,
            propagator: parse_value(matches, "propagator")?.unwrap_or_default(),
            variable_order: parse_value(matches, "ordering")?.unwrap_or_default(),
            value_order: parse_value(matches, "value_order")?.unwrap_or_default(),
            model: parse_value(matches, "model")?.unwrap_or_default(),
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn propagator(&self) -> Propagator {
        self.propagator
    }

    pub fn variable_order(&self) -> VariableOrder {
        self.variable_order
    }

    pub fn value_order(&self) -> ValueOrder {
        self.value_order
    }

    pub fn model(&self) -> GridModel {
        self.model
    }
}

fn parse_value<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {} \"{}\"", name, s)))
        .transpose()
}

#[derive(Clone)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(Generate),
    Queens(usize),
    Grid(usize),
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub count: u32,
    pub width: usize,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("kencsp")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Solve constraint satisfaction problems: KenKen puzzles, Latin grids and N-Queens")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input", "queens", "grid"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate and solve random KenKen puzzle(s)")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read a KenKen puzzle from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("queens")
                .short("q")
                .long("queens")
                .takes_value(true)
                .value_name("N")
                .help("place N queens on an N by N board")
                .display_order(1),
        )
        .arg(
            Arg::with_name("grid")
                .long("grid")
                .takes_value(true)
                .value_name("N")
                .help("fill an N by N Latin square")
                .display_order(1),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .value_name("WIDTH")
                .requires("generate")
                .help("set the width and height of the generated puzzle"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .requires("generate")
                .help("the number of puzzles to generate"),
        )
        .arg(
            Arg::with_name("propagator")
                .short("p")
                .long("propagator")
                .takes_value(true)
                .possible_values(&["bt", "plain", "fc", "gac"])
                .help("constraint propagation after each assignment [default: gac]"),
        )
        .arg(
            Arg::with_name("ordering")
                .long("ordering")
                .takes_value(true)
                .possible_values(&["first", "mrv", "degree", "mrv-degree"])
                .help("variable ordering heuristic [default: mrv]"),
        )
        .arg(
            Arg::with_name("value_order")
                .long("value-order")
                .takes_value(true)
                .possible_values(&["domain", "lcv"])
                .help("value ordering heuristic [default: domain]"),
        )
        .arg(
            Arg::with_name("model")
                .short("m")
                .long("model")
                .takes_value(true)
                .possible_values(&["binary", "nary"])
                .help("row and column constraints of grids [default: binary]"),
        )
}

#[cfg(test)]
mod tests {
    use kencsp::model::GridModel;
    use kencsp::propagate::Propagator;
    use kencsp::search::VariableOrder;

    use crate::options::{clap_app, Options, Source};

    fn options(args: &[&str]) -> Options {
        let matches = clap_app().get_matches_from(args);
        Options::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn defaults() {
        let options = options(&["kencsp", "--generate"]);
        assert_eq!(Propagator::gac(), options.propagator());
        assert_eq!(VariableOrder::Mrv, options.variable_order());
        assert_eq!(GridModel::Binary, options.model());
        match options.source() {
            Source::Generate(generate) => assert_eq!((1, 4), (generate.count, generate.width)),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn queens() {
        let options = options(&["kencsp", "-q", "8", "-p", "fc", "--ordering", "first"]);
        assert!(matches!(options.source(), Source::Queens(8)));
        assert_eq!(Propagator::forward_checking(), options.propagator());
        assert_eq!(VariableOrder::First, options.variable_order());
    }

    #[test]
    fn invalid_number() {
        let matches = clap_app().get_matches_from(&["kencsp", "--grid", "x"]);
        assert!(Options::from_arg_matches(&matches).is_err());
    }
}
