use std::{fmt, str::FromStr};

use crate::error::AxisError;

/// A four-character variation axis tag such as `wght` or `opsz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisTag(String);

impl AxisTag {
    pub fn new(tag: &str) -> Result<Self, AxisError> {
        if tag.chars().count() != 4 {
            return Err(AxisError::InvalidTag(tag.to_string()));
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AxisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AxisTag {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A user-space coordinate: bare ASCII digits, kept as written.
///
/// The text goes to `varLib.instancer` untouched, so there is no upper bound
/// and leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate(String);

impl Coordinate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for Coordinate {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for Coordinate {
    type Err = AxisError;

    /// No sign, no whitespace, no decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AxisError::InvalidLimitation(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an axis is limited when instancing.
///
/// Renders back to the `varLib.instancer` syntax: `drop`, `400` or `400:700`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limitation {
    /// Remove the axis, pinning it at its default.
    Drop,
    /// Pin the axis at a single user-space value.
    Pin(Coordinate),
    /// Restrict the axis to `low..=high`.
    Range(Coordinate, Coordinate),
}

impl Limitation {
    pub fn pin(value: u32) -> Self {
        Self::Pin(value.into())
    }

    pub fn range(low: u32, high: u32) -> Self {
        Self::Range(low.into(), high.into())
    }
}

impl FromStr for Limitation {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |_| AxisError::InvalidLimitation(s.to_string());

        if s == "drop" {
            return Ok(Self::Drop);
        }

        match s.split_once(':') {
            Some((low, high)) => Ok(Self::Range(
                low.parse().map_err(invalid)?,
                high.parse().map_err(invalid)?,
            )),
            None => s.parse().map(Self::Pin).map_err(invalid),
        }
    }
}

impl fmt::Display for Limitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Pin(value) => write!(f, "{value}"),
            Self::Range(low, high) => write!(f, "{low}:{high}"),
        }
    }
}

/// One `{tag: limitation}` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLimit {
    pub tag: AxisTag,
    pub limitation: Limitation,
}

impl AxisLimit {
    pub fn new(tag: AxisTag, limitation: Limitation) -> Self {
        Self { tag, limitation }
    }

    /// Parse a tag and a limitation string.
    ///
    /// ```
    /// use font_instancer::{AxisLimit, Limitation};
    ///
    /// let limit = AxisLimit::parse("wght", "400:700").unwrap();
    /// assert_eq!(limit.limitation, Limitation::range(400, 700));
    /// assert_eq!(limit.to_string(), "wght=400:700");
    /// ```
    pub fn parse(tag: &str, limitation: &str) -> Result<Self, AxisError> {
        Ok(Self::new(AxisTag::new(tag)?, limitation.parse()?))
    }
}

/// Renders as a `varLib.instancer` positional argument, `tag=value`.
impl fmt::Display for AxisLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.limitation)
    }
}
