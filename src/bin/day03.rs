use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use im::HashSet as ImHashSet;
use thiserror::Error;

use aoc2015::parser::{read_and_parse, ReadError};
use aoc2015::source::{Config, Source, SourceError};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn displacement(self) -> (i64, i64) {
        use Direction::*;

        match self {
            Up => (0, 1),
            Right => (1, 0),
            Down => (0, -1),
            Left => (-1, 0),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
struct Position {
    x: i64,
    y: i64,
}

impl Position {
    fn moved(self, direction: Direction) -> Position {
        let (dx, dy) = direction.displacement();

        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    fn manhattan(self) -> u64 {
        self.x.unsigned_abs() + self.y.unsigned_abs()
    }
}

/// Where the walker is, and every cell it has stood on so far.
///
/// Steps never modify a state in place: each one builds a new state whose
/// visited set shares structure with the previous one.
#[derive(Clone, Debug)]
struct WalkState {
    position: Position,
    visited: ImHashSet<Position>,
}

impl Default for WalkState {
    fn default() -> WalkState {
        let origin = Position::default();

        WalkState {
            position: origin,
            visited: ImHashSet::unit(origin),
        }
    }
}

impl WalkState {
    fn step(&self, direction: Direction) -> WalkState {
        let position = self.position.moved(direction);

        WalkState {
            position,
            visited: self.visited.update(position),
        }
    }

    fn summary(&self) -> Summary {
        Summary {
            visited: self.visited.len(),
            distance: self.position.manhattan(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Summary {
    visited: usize,
    distance: u64,
}

/// Every state after each instruction, in order. Doesn't include the start.
fn trail<I>(directions: I) -> impl Iterator<Item = WalkState>
where
    I: IntoIterator<Item = Direction>,
{
    directions
        .into_iter()
        .scan(WalkState::default(), |state, direction| {
            *state = state.step(direction);
            Some(state.clone())
        })
}

fn run<I>(directions: I) -> Summary
where
    I: IntoIterator<Item = Direction>,
{
    directions
        .into_iter()
        .fold(WalkState::default(), |state, direction| state.step(direction))
        .summary()
}

#[derive(Debug, Error)]
enum Error {
    #[error("source unavailable")]
    SourceUnavailable(#[from] SourceError),

    #[error("invalid symbol {symbol:?} at index {index}")]
    InvalidSymbol { symbol: char, index: usize },

    #[error("could not write output")]
    Output(#[from] std::io::Error),
}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Error {
        match e {
            ReadError::Source(e) => Error::SourceUnavailable(e),
            // Directions are all ASCII, so everything before the failure is one
            // byte per character and the offset doubles as a character index.
            ReadError::Parse(failure) => match failure.found {
                Some(symbol) => Error::InvalidSymbol {
                    symbol,
                    index: failure.offset,
                },
                // The terminator accepts end of input, so failures always have
                // a character left.
                None => unreachable!("instruction grammar failed at end of input"),
            },
        }
    }
}

fn load(source: &Source) -> Result<Vec<Direction>, Error> {
    Ok(read_and_parse(source, parser::instructions)?)
}

/// Loads, walks and writes the answers. Nothing is written unless the whole
/// input parsed.
fn execute<W: Write>(config: &Config, out: &mut W) -> Result<(), Error> {
    let source = config.source();
    let directions = load(&source)?;

    let summary = run(directions.iter().copied());

    writeln!(out, "{}", summary.visited)?;

    if config.verbose {
        writeln!(out, "{}", summary.distance)?;

        let furthest = trail(directions.iter().copied())
            .map(|state| state.position.manhattan())
            .max()
            .unwrap_or(0);
        eprintln!(
            "{} instructions from {}, furthest distance {}",
            directions.len(),
            source,
            furthest
        );
    }

    Ok(())
}

fn report(e: &dyn std::error::Error) {
    eprintln!("error: {}", e);

    let mut cause = e.source();
    while let Some(e) = cause {
        eprintln!("  caused by: {}", e);
        cause = e.source();
    }
}

pub fn main() -> ExitCode {
    let config = Config::parse();

    match execute(&config, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

mod parser {
    use super::*;

    use nom::branch::alt;
    use nom::character::complete::{char, multispace0};
    use nom::combinator::{eof, value};
    use nom::multi::many_till;
    use nom::sequence::tuple;
    use nom::{IResult, Parser};

    fn direction(input: &str) -> IResult<&str, Direction> {
        alt((
            value(Direction::Up, char('^')),
            value(Direction::Right, char('>')),
            value(Direction::Down, char('v')),
            value(Direction::Left, char('<')),
        ))
        .parse(input)
    }

    // Trailing whitespace is allowed, anything else after the last direction
    // fails at the offending character.
    pub(super) fn instructions(input: &str) -> IResult<&str, Vec<Direction>> {
        many_till(direction, tuple((multispace0, eof)))
            .map(|(directions, _)| directions)
            .parse(input)
    }
}
