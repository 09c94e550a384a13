//! Parsing of human-readable rotation angles such as `"35d"` or `"0.6 rad"`.

use thiserror::Error;

use crate::{deg, rad, Angle};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseAngleError {
    #[error("empty angle specification")]
    Empty,

    #[error("cannot parse `{0}` as a number")]
    Number(String),

    #[error("unknown angle unit `{0}`: use `d`, `deg`, `°`, `rad` or no unit for radians")]
    Unit(String),
}

/// Parse an angle given as a number followed by an optional unit.
///
/// Degrees are written `35d`, `35deg`, `35 degrees` or `35°`; radians as
/// `0.6rad`, `0.6 r` or just `0.6`.
pub fn parse_angle(s: &str) -> Result<Angle, ParseAngleError> {
    let s = s.trim();
    if s.is_empty() { return Err(ParseAngleError::Empty) }

    let numeric = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E');
    let split = s.find(|c| !numeric(c)).unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let value: f64 = number.parse()
        .map_err(|_| ParseAngleError::Number(number.to_string()))?;

    match unit.trim() {
        ""  | "r" | "rad" | "radian" | "radians" => Ok(rad(value)),
        "d" | "°" | "deg" | "degree" | "degrees" => Ok(deg(value)),
        other => Err(ParseAngleError::Unit(other.to_string())),
    }
}
