//! Unit-of-measure values for part dimensions.
//!
//! Every [`Length`] is canonicalized to millimeters on construction, so
//! downstream geometry code never needs to know which unit a dimension was
//! written in. Imperial dimensions convert at 25.4 mm per inch.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::CadError;

/// Millimeters per inch.
const MM_PER_INCH: f64 = 25.4;

/// A physical length, stored internally in millimeters.
///
/// # Example
///
/// ```
/// use efficio::Length;
///
/// let shaft = Length::millimeters(12.0);
/// let stock = Length::inches(3.0 / 8.0).times(80.0);
/// assert!((stock.mm() - Length::inches(30.0).mm()).abs() < 1e-9);
/// assert_eq!(shaft.mm(), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length {
    mm: f64,
}

impl Length {
    /// A length of the given number of millimeters.
    pub fn millimeters(value: f64) -> Self {
        Self { mm: value }
    }

    /// A length of the given number of inches.
    pub fn inches(value: f64) -> Self {
        Self {
            mm: value * MM_PER_INCH,
        }
    }

    /// A zero length.
    pub fn zero() -> Self {
        Self { mm: 0.0 }
    }

    /// The value in millimeters.
    pub fn mm(&self) -> f64 {
        self.mm
    }

    /// A compound measure: `count` repetitions of this length.
    ///
    /// Useful for assemblies sized as a multiple of a stock dimension,
    /// e.g. eighty 3/8-inch components laid end to end.
    pub fn times(&self, count: f64) -> Self {
        Self {
            mm: self.mm * count,
        }
    }

    /// Parse a length from a CLI-style string.
    ///
    /// Accepted forms: a bare number (millimeters), a number suffixed with
    /// `mm` or `in`, and simple fractions such as `3/8in`.
    pub fn parse(input: &str) -> Result<Self, CadError> {
        let trimmed = input.trim();
        let (number, unit): (&str, fn(f64) -> Length) =
            if let Some(stripped) = trimmed.strip_suffix("mm") {
                (stripped, Length::millimeters)
            } else if let Some(stripped) = trimmed.strip_suffix("in") {
                (stripped, Length::inches)
            } else {
                (trimmed, Length::millimeters)
            };

        let number = number.trim();
        let value = if let Some((numer, denom)) = number.split_once('/') {
            let numer: f64 = numer
                .trim()
                .parse()
                .map_err(|_| CadError::InvalidParameter(format!("not a measure: {input:?}")))?;
            let denom: f64 = denom
                .trim()
                .parse()
                .map_err(|_| CadError::InvalidParameter(format!("not a measure: {input:?}")))?;
            if denom == 0.0 {
                return Err(CadError::InvalidParameter(format!(
                    "zero denominator in measure: {input:?}"
                )));
            }
            numer / denom
        } else {
            number
                .parse()
                .map_err(|_| CadError::InvalidParameter(format!("not a measure: {input:?}")))?
        };

        Ok(unit(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.mm)
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length {
            mm: self.mm + rhs.mm,
        }
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length {
            mm: self.mm - rhs.mm,
        }
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length { mm: self.mm * rhs }
    }
}
