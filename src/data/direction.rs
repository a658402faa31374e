//! Compass-point codec for the wind product's cardinal direction column.

use std::fmt;
use std::str::FromStr;

/// Code used for an empty or unrecognized direction token.
pub const UNKNOWN_DIRECTION: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::North,
        CompassPoint::NorthNorthEast,
        CompassPoint::NorthEast,
        CompassPoint::EastNorthEast,
        CompassPoint::East,
        CompassPoint::EastSouthEast,
        CompassPoint::SouthEast,
        CompassPoint::SouthSouthEast,
        CompassPoint::South,
        CompassPoint::SouthSouthWest,
        CompassPoint::SouthWest,
        CompassPoint::WestSouthWest,
        CompassPoint::West,
        CompassPoint::WestNorthWest,
        CompassPoint::NorthWest,
        CompassPoint::NorthNorthWest,
    ];

    /// Clockwise index starting from north (0..=15).
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthNorthEast => "NNE",
            CompassPoint::NorthEast => "NE",
            CompassPoint::EastNorthEast => "ENE",
            CompassPoint::East => "E",
            CompassPoint::EastSouthEast => "ESE",
            CompassPoint::SouthEast => "SE",
            CompassPoint::SouthSouthEast => "SSE",
            CompassPoint::South => "S",
            CompassPoint::SouthSouthWest => "SSW",
            CompassPoint::SouthWest => "SW",
            CompassPoint::WestSouthWest => "WSW",
            CompassPoint::West => "W",
            CompassPoint::WestNorthWest => "WNW",
            CompassPoint::NorthWest => "NW",
            CompassPoint::NorthNorthWest => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCompassPoint(pub String);

impl FromStr for CompassPoint {
    type Err = UnknownCompassPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompassPoint::ALL
            .into_iter()
            .find(|p| p.abbreviation() == s)
            .ok_or_else(|| UnknownCompassPoint(s.to_string()))
    }
}

/// Encode a direction token as its compass code.
///
/// Empty and unrecognized tokens map to `UNKNOWN_DIRECTION` instead of failing.
pub fn encode(token: &str) -> i32 {
    let token = token.trim();
    if token.is_empty() {
        return UNKNOWN_DIRECTION;
    }
    match token.parse::<CompassPoint>() {
        Ok(point) => point.code(),
        Err(UnknownCompassPoint(raw)) => {
            tracing::debug!(token = %raw, "unrecognized direction token");
            UNKNOWN_DIRECTION
        }
    }
}
