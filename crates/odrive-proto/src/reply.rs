use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::number::{parse_float_lenient, parse_float_strict};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty reply")]
    Empty,
    #[error("no separator in reply {0:?}")]
    MissingSeparator(String),
    #[error("not a number: {0:?}")]
    InvalidNumber(String),
}

/// Position and velocity reported for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub position: f32,
    pub velocity: f32,
}

impl Feedback {
    /// Parse a `"<pos> <vel>"` reply.
    ///
    /// The line is split at its first space. Each half is read leniently, and
    /// a line without any space yields zeros.
    pub fn parse(line: &str) -> Self {
        match line.split_once(' ') {
            Some((pos, vel)) => Self {
                position: parse_float_lenient(pos),
                velocity: parse_float_lenient(vel),
            },
            None => Self::default(),
        }
    }

    pub fn try_parse(line: &str) -> Result<Self, ParseError> {
        if line.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let (pos, vel) = line
            .split_once(' ')
            .ok_or_else(|| ParseError::MissingSeparator(line.to_string()))?;
        Ok(Self {
            position: parse_float_strict(pos)?,
            velocity: parse_float_strict(vel)?,
        })
    }
}

/// Feedback from two axes, gathered by two separate exchanges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DualFeedback {
    pub position1: f32,
    pub velocity1: f32,
    pub position2: f32,
    pub velocity2: f32,
}

impl DualFeedback {
    pub fn from_halves(first: Feedback, second: Feedback) -> Self {
        Self {
            position1: first.position,
            velocity1: first.velocity,
            position2: second.position,
            velocity2: second.velocity,
        }
    }

    pub fn first(&self) -> Feedback {
        Feedback {
            position: self.position1,
            velocity: self.velocity1,
        }
    }

    pub fn second(&self) -> Feedback {
        Feedback {
            position: self.position2,
            velocity: self.velocity2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_and_velocity() {
        let fb = Feedback::parse("1.2500 -3.0000");
        assert_eq!(fb, Feedback { position: 1.25, velocity: -3.0 });
    }

    #[test]
    fn no_space_means_zeros() {
        assert_eq!(Feedback::parse("garbage"), Feedback::default());
        assert_eq!(Feedback::parse(""), Feedback::default());
    }

    #[test]
    fn splits_on_first_space_only() {
        // the remainder after the first space is parsed as one token
        let fb = Feedback::parse("2.0 4.5 9.9");
        assert_eq!(fb, Feedback { position: 2.0, velocity: 4.5 });

        let fb = Feedback::parse("abc 1.0");
        assert_eq!(fb, Feedback { position: 0.0, velocity: 1.0 });
    }

    #[test]
    fn carriage_return_is_tolerated() {
        let fb = Feedback::parse("0.5000 0.2500\r");
        assert_eq!(fb, Feedback { position: 0.5, velocity: 0.25 });
    }

    #[test]
    fn strict_parse_reports_failures() {
        assert_eq!(Feedback::try_parse(""), Err(ParseError::Empty));
        assert_eq!(
            Feedback::try_parse("garbage"),
            Err(ParseError::MissingSeparator("garbage".into()))
        );
        assert!(matches!(
            Feedback::try_parse("1.0 fast"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert_eq!(
            Feedback::try_parse("1.0 2.0"),
            Ok(Feedback { position: 1.0, velocity: 2.0 })
        );
    }

    #[test]
    fn dual_halves() {
        let dual = DualFeedback::from_halves(
            Feedback { position: 1.0, velocity: 2.0 },
            Feedback::default(),
        );
        assert_eq!(dual.first(), Feedback { position: 1.0, velocity: 2.0 });
        assert_eq!(dual.second(), Feedback::default());
    }
}
