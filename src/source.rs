use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read input from {location}")]
    Unavailable {
        location: Source,
        #[source]
        source: std::io::Error,
    },
}

/// Where puzzle input comes from. Defaults to stdin like every other day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn read_to_string(&self) -> Result<String, SourceError> {
        let mut buffer = String::new();

        let result = match self {
            Source::Stdin => std::io::stdin().read_to_string(&mut buffer),
            Source::File(path) => {
                std::fs::File::open(path).and_then(|mut f| f.read_to_string(&mut buffer))
            }
        };

        match result {
            Ok(_) => Ok(buffer),
            Err(source) => Err(SourceError::Unavailable {
                location: self.clone(),
                source,
            }),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "stdin"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Shared command line for the puzzle binaries.
#[derive(Parser, Debug, Clone, PartialEq, Eq, Default)]
#[command(about = "Advent of Code 2015", long_about = None)]
pub struct Config {
    /// Puzzle input file, reads stdin when omitted or `-`
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Also print the secondary answer
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn source(&self) -> Source {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => Source::File(path.clone()),
            _ => Source::Stdin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(args)
    }

    #[test]
    fn test_defaults_to_stdin() {
        let config = parse(&["day03"]).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.source(), Source::Stdin);
    }

    #[test]
    fn test_dash_is_stdin() {
        assert_eq!(parse(&["day03", "-"]).unwrap().source(), Source::Stdin);
    }

    #[test]
    fn test_path_and_verbose() {
        let config = parse(&["day03", "--verbose", "input.txt"]).unwrap();

        assert!(config.verbose);
        assert_eq!(config.source(), Source::File(PathBuf::from("input.txt")));
        assert!(parse(&["day03", "input.txt", "-v"]).unwrap().verbose);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(parse(&["day03", "--part2"]).is_err());
    }

    #[test]
    fn test_rejects_second_source() {
        assert!(parse(&["day03", "a.txt", "b.txt"]).is_err());
        assert!(parse(&["day03", "a.txt", "-"]).is_err());
        assert!(parse(&["day03", "-", "a.txt"]).is_err());
    }

    #[test]
    fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("aoc2015-source-{}.txt", std::process::id()));
        std::fs::write(&path, "^>v<\n").unwrap();

        let contents = Source::File(path.clone()).read_to_string().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(contents, "^>v<\n");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = Source::File(PathBuf::from("/nonexistent/aoc2015/day03.txt"));
        let err = source.read_to_string().unwrap_err();

        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert_eq!(
            err.to_string(),
            "could not read input from /nonexistent/aoc2015/day03.txt"
        );
    }
}
