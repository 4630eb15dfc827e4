use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, try `h` for help")]
    Unknown(String),
    #[error("Expected `{0} X Y`")]
    MissingCoords(String),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
}

pub const HELP: &str = "\
commands:
  r X Y   reveal a cell
  f X Y   flag or unflag a cell
  c X Y   reveal around a satisfied number
  n       new game
  q       quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(verb, &mut tokens)?),
            "f" | "flag" => Command::Flag(parse_coords(verb, &mut tokens)?),
            "c" | "chord" => Command::Chord(parse_coords(verb, &mut tokens)?),
            "n" | "new" => Command::New,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };
        Ok(command)
    }
}

fn parse_coords<'a>(
    verb: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || {
        let token = tokens
            .next()
            .ok_or_else(|| CommandError::MissingCoords(verb.to_owned()))?;
        token
            .parse::<Coord>()
            .map_err(|_| CommandError::InvalidCoord(token.to_owned()))
    };
    Ok((next()?, next()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  F 0 12 ".parse::<Command>(), Ok(Command::Flag((0, 12))));
        assert_eq!("chord 1 1".parse::<Command>(), Ok(Command::Chord((1, 1))));
        assert_eq!("n".parse::<Command>(), Ok(Command::New));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "x 1 1".parse::<Command>(),
            Err(CommandError::Unknown("x".into()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingCoords("r".into()))
        );
        assert_eq!(
            "f 1 300".parse::<Command>(),
            Err(CommandError::InvalidCoord("300".into()))
        );
        assert_eq!(
            "r -1 0".parse::<Command>(),
            Err(CommandError::InvalidCoord("-1".into()))
        );
    }
}
