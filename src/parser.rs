use nom::error::ErrorKind;
use nom::{Finish, Parser};
use thiserror::Error;

use crate::source::{Source, SourceError};

/// An owned copy of nom's error, with the failure location expressed as an
/// offset into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error ({kind:?}) at offset {offset}")]
pub struct ParseFailure {
    pub offset: usize,
    /// The character parsing stopped on, `None` at end of input.
    pub found: Option<char>,
    pub kind: ErrorKind,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

// Lifetime hacks to make the `?` operator usable with nom results.
//
// The borrowed error can't outlive the input buffer, so it gets turned into an
// offset before returning.
pub fn parse_complete<O, P>(mut parser: P, input: &str) -> Result<O, ParseFailure>
where
    P: for<'i> Parser<&'i str, O, nom::error::Error<&'i str>>,
{
    match parser.parse(input).finish() {
        Ok((_i, o)) => Ok(o),
        Err(nom::error::Error { input: rest, code }) => Err(ParseFailure {
            offset: input.len() - rest.len(),
            found: rest.chars().next(),
            kind: code,
        }),
    }
}

pub fn read_and_parse<O, P>(source: &Source, parser: P) -> Result<O, ReadError>
where
    P: for<'i> Parser<&'i str, O, nom::error::Error<&'i str>>,
{
    let buffer = source.read_to_string()?;
    Ok(parse_complete(parser, &buffer)?)
}
