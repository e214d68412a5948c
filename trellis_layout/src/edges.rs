// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer insets used for margins, borders and padding.

use core::fmt;
use core::num::ParseIntError;
use core::ops::{Add, Mul, Neg, Sub};
use core::str::FromStr;

use kurbo::{Size, Vec2};

/// Error returned when a string is not a valid [`Edges`] value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseEdgesError {
    /// The input was empty or only whitespace.
    #[error("empty edges string")]
    Empty,
    /// A component was not an integer.
    #[error("invalid edge value '{value}' in '{input}'")]
    Number {
        /// Full input string.
        input: String,
        /// The offending component.
        value: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// Exactly three components were given.
    #[error("edges '{0}' must have 1, 2 or 4 components")]
    Count(String),
    /// More than four components were given.
    #[error("too many edges specified in '{0}' (cannot have more than 4)")]
    TooMany(String),
}

/// Distances from each side of a rectangle.
///
/// Negative values are allowed; a negative margin pulls the view outside of
/// its nominal layout slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    /// Left inset.
    pub left: i32,
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl Edges {
    /// All zero.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Explicit left, top, right and bottom insets.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every side.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom.
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Parse from the comma-separated form accepted by [`FromStr`].
    ///
    /// ```rust
    /// use trellis_layout::Edges;
    ///
    /// assert_eq!(Edges::parse("10").unwrap(), Edges::all(10));
    /// assert_eq!(Edges::parse("4, 8").unwrap(), Edges::new(4, 8, 4, 8));
    /// assert_eq!(Edges::parse("4,8,4,8").unwrap().to_string(), "4, 8, 4, 8");
    /// assert!(Edges::parse("1,2,3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ParseEdgesError> {
        s.parse()
    }

    /// Sum of the left and right insets, saturating at the `i32` range.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of the top and bottom insets, saturating at the `i32` range.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Space taken on each axis.
    pub fn total(&self) -> Size {
        Size::new(
            f64::from(self.left) + f64::from(self.right),
            f64::from(self.top) + f64::from(self.bottom),
        )
    }

    /// Offset from the outer top-left corner to the inner one.
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(f64::from(self.left), f64::from(self.top))
    }

    /// Copy with the top and bottom insets zeroed.
    #[must_use]
    pub fn horizontal_only(&self) -> Self {
        Self::new(self.left, 0, self.right, 0)
    }

    /// Copy with the left and right insets zeroed.
    #[must_use]
    pub fn vertical_only(&self) -> Self {
        Self::new(0, self.top, 0, self.bottom)
    }
}

impl FromStr for Edges {
    type Err = ParseEdgesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseEdgesError::Empty);
        }
        let mut values = [0_i32; 4];
        let mut count = 0;
        for part in s.split(',') {
            if count == values.len() {
                return Err(ParseEdgesError::TooMany(s.to_owned()));
            }
            let part = part.trim();
            values[count] = part.parse().map_err(|source| ParseEdgesError::Number {
                input: s.to_owned(),
                value: part.to_owned(),
                source,
            })?;
            count += 1;
        }
        let [a, b, c, d] = values;
        match count {
            1 => Ok(Self::all(a)),
            2 => Ok(Self::symmetric(a, b)),
            4 => Ok(Self::new(a, b, c, d)),
            _ => Err(ParseEdgesError::Count(s.to_owned())),
        }
    }
}

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl Neg for Edges {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(
            self.left.saturating_neg(),
            self.top.saturating_neg(),
            self.right.saturating_neg(),
            self.bottom.saturating_neg(),
        )
    }
}

impl Add for Edges {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.left.saturating_add(rhs.left),
            self.top.saturating_add(rhs.top),
            self.right.saturating_add(rhs.right),
            self.bottom.saturating_add(rhs.bottom),
        )
    }
}

impl Sub for Edges {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Mul<i32> for Edges {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(
            self.left.saturating_mul(rhs),
            self.top.saturating_mul(rhs),
            self.right.saturating_mul(rhs),
            self.bottom.saturating_mul(rhs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_component_counts() {
        assert_eq!(Edges::parse("10"), Ok(Edges::new(10, 10, 10, 10)));
        assert_eq!(Edges::parse("3,5"), Ok(Edges::new(3, 5, 3, 5)));
        assert_eq!(Edges::parse(" 1, 2 ,3,4 "), Ok(Edges::new(1, 2, 3, 4)));
        assert_eq!(
            Edges::parse("1,2,3"),
            Err(ParseEdgesError::Count("1,2,3".into()))
        );
        assert_eq!(
            Edges::parse("1,2,3,4,5"),
            Err(ParseEdgesError::TooMany("1,2,3,4,5".into()))
        );
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert!(matches!(
            Edges::parse("1,x"),
            Err(ParseEdgesError::Number { ref value, .. }) if value == "x"
        ));
        assert!(matches!(Edges::parse("1,"), Err(ParseEdgesError::Number { .. })));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(Edges::parse(""), Err(ParseEdgesError::Empty));
        assert_eq!(Edges::parse("  \t"), Err(ParseEdgesError::Empty));
        assert_eq!(ParseEdgesError::Empty.to_string(), "empty edges string");
    }

    #[test]
    fn display_round_trips() {
        let edges = Edges::parse("4,8,4,8").unwrap();
        assert_eq!(edges.to_string(), "4, 8, 4, 8");
        assert_eq!(Edges::parse(&edges.to_string()), Ok(edges));
    }

    #[test]
    fn totals_and_arithmetic() {
        let edges = Edges::new(1, 2, 3, 4);
        assert_eq!(edges.horizontal(), 4);
        assert_eq!(edges.vertical(), 6);
        assert_eq!(edges.total(), Size::new(4.0, 6.0));
        assert_eq!(edges.top_left(), Vec2::new(1.0, 2.0));
        assert_eq!(edges.horizontal_only(), Edges::new(1, 0, 3, 0));
        assert_eq!(edges.vertical_only(), Edges::new(0, 2, 0, 4));
        assert_eq!(-edges, Edges::new(-1, -2, -3, -4));
        assert_eq!(edges + Edges::all(1), Edges::new(2, 3, 4, 5));
        assert_eq!(edges - edges, Edges::NONE);
        assert_eq!(edges * 2, Edges::new(2, 4, 6, 8));
    }

    #[test]
    fn arithmetic_saturates_at_extremes() {
        let max = Edges::parse(&i32::MAX.to_string()).unwrap();
        assert_eq!(max, Edges::all(i32::MAX));
        assert_eq!(max + Edges::all(1), Edges::all(i32::MAX));
        assert_eq!(max * 2, Edges::all(i32::MAX));
        assert_eq!(-Edges::all(i32::MIN), Edges::all(i32::MAX));
        assert_eq!(Edges::all(i32::MIN) - max, Edges::all(i32::MIN));
        assert_eq!(max.horizontal(), i32::MAX);
        assert_eq!(max.vertical(), i32::MAX);
        let total = 2.0 * f64::from(i32::MAX);
        assert_eq!(max.total(), Size::new(total, total));
    }
}
