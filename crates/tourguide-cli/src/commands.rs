//! Line commands read from stdin.

use std::str::FromStr;

use thiserror::Error;
use tourguide_core::clock::Clock;
use tourguide_core::error::TourError;
use tourguide_core::geo::RawPosition;
use tourguide_session::application::runtime::TourHandle;
use tracing::warn;

use crate::console::{ConsolePositionProvider, ConsoleRecognizer};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `place <name>`: submit the initial place.
    Place(String),
    /// `fix <lat> <lon> [real]`: deliver a position, simulated unless `real`.
    Fix {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
        /// Whether the position is reported as simulated.
        simulated: bool,
    },
    /// `ask [text]`: submit a question, replacing the query text first when
    /// text is given.
    Ask(Option<String>),
    /// `type <text>`: edit the query text.
    Type(String),
    /// `tap <name>`: tap a map marker.
    Tap(String),
    /// `mic`: press the microphone button.
    Mic,
    /// `say <transcript>`: speak into an active capture.
    Say(String),
    /// `quit`: leave the tour.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank.
    #[error("empty command")]
    Empty,
    /// The first word is not a command.
    #[error("unknown command {0:?}")]
    Unknown(String),
    /// The arguments did not match.
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn required(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest.to_owned())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word.to_ascii_lowercase().as_str() {
            "place" => required(rest, "place <name>").map(Self::Place),
            "fix" => parse_fix(rest),
            "ask" => Ok(Self::Ask((!rest.is_empty()).then(|| rest.to_owned()))),
            "type" => Ok(Self::Type(rest.to_owned())),
            "tap" => required(rest, "tap <name>").map(Self::Tap),
            "mic" => Ok(Self::Mic),
            "say" => required(rest, "say <transcript>").map(Self::Say),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn parse_fix(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "fix <lat> <lon> [real]";
    let mut parts = rest.split_whitespace();
    let mut coordinate = || {
        parts
            .next()
            .and_then(|p| p.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or(CommandError::Usage(USAGE))
    };
    let latitude = coordinate()?;
    let longitude = coordinate()?;
    let simulated = match parts.next() {
        None => true,
        Some(flag) if flag.eq_ignore_ascii_case("real") => false,
        Some(_) => return Err(CommandError::Usage(USAGE)),
    };
    if parts.next().is_some() {
        return Err(CommandError::Usage(USAGE));
    }
    Ok(Command::Fix {
        latitude,
        longitude,
        simulated,
    })
}

impl Command {
    /// Applies the command to a running tour. `Quit` is handled by the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn apply(
        self,
        handle: &TourHandle,
        positions: &ConsolePositionProvider,
        recognizer: &ConsoleRecognizer,
        clock: &dyn Clock,
    ) -> Result<(), TourError> {
        match self {
            Self::Place(name) => handle.submit_place(name),
            Self::Fix {
                latitude,
                longitude,
                simulated,
            } => {
                let delivered = positions.push(RawPosition {
                    latitude,
                    longitude,
                    simulated,
                    timestamp: clock.now(),
                });
                if !delivered {
                    warn!("no position watch yet; enter a place first");
                }
                Ok(())
            }
            Self::Ask(text) => {
                if let Some(text) = text {
                    handle.set_query_text(text)?;
                }
                handle.ask()
            }
            Self::Type(text) => handle.set_query_text(text),
            Self::Tap(name) => handle.tap_marker(name),
            Self::Mic => handle.toggle_voice(),
            Self::Say(transcript) => {
                if !recognizer.say(&transcript) {
                    warn!("not listening; use `mic` first");
                }
                Ok(())
            }
            Self::Quit => handle.exit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_keeps_spaces() {
        assert_eq!(
            "place  Red Fort ".parse(),
            Ok(Command::Place("Red Fort".into()))
        );
    }

    #[test]
    fn test_parse_fix_defaults_to_simulated() {
        assert_eq!(
            "fix 28.6140 77.2091".parse(),
            Ok(Command::Fix {
                latitude: 28.614,
                longitude: 77.2091,
                simulated: true,
            })
        );
    }

    #[test]
    fn test_parse_fix_real_flag() {
        let command: Command = "fix 28.6140 77.2091 real".parse().unwrap();

        assert!(matches!(command, Command::Fix { simulated: false, .. }));
    }

    #[test]
    fn test_parse_fix_rejects_bad_coordinates() {
        assert_eq!(
            "fix north 77.2".parse::<Command>(),
            Err(CommandError::Usage("fix <lat> <lon> [real]"))
        );
        assert!("fix 1.0".parse::<Command>().is_err());
        assert!("fix 1.0 2.0 fake".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_ask_with_and_without_text() {
        assert_eq!(
            "ask What year was it built?".parse(),
            Ok(Command::Ask(Some("What year was it built?".into())))
        );
        assert_eq!("ask".parse(), Ok(Command::Ask(None)));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("MIC".parse(), Ok(Command::Mic));
        assert_eq!("quit".parse(), Ok(Command::Quit));
        assert_eq!("tap Jama Masjid".parse(), Ok(Command::Tap("Jama Masjid".into())));
        assert_eq!("say hello there".parse(), Ok(Command::Say("hello there".into())));
        assert_eq!("type".parse(), Ok(Command::Type(String::new())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(
            "place".parse::<Command>(),
            Err(CommandError::Usage("place <name>"))
        );
    }
}
