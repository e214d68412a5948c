// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional sizing rules and the two-axis [`LayoutParameters`] built from them.

use core::fmt;
use core::num::ParseFloatError;
use core::str::FromStr;

use kurbo::Size;

/// Error returned when a string is not a valid [`Length`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseLengthError {
    /// The string is none of `content`, `stretch`, `<number>px` or `<number>%`.
    #[error(
        "invalid length '{0}': must be one of 'content', 'stretch', or a number followed by 'px' or '%'"
    )]
    Unrecognized(String),
    /// The unit suffix was recognized but the number in front of it was not.
    #[error("invalid number in length '{input}'")]
    Number {
        /// Full input string.
        input: String,
        /// Underlying float parse failure.
        #[source]
        source: ParseFloatError,
    },
}

/// Sizing rule for a single axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Length {
    /// Size to the content, whatever it measures.
    #[default]
    Content,
    /// Fixed size in pixels, regardless of available space.
    Px(f64),
    /// Percentage (0-100) of the available space.
    Percent(f64),
    /// Take all of the available space.
    Stretch,
}

impl Length {
    /// Resolve to a pixel length.
    ///
    /// `content` is only invoked for [`Length::Content`]. The result is not clamped
    /// to `available`, so callers can detect overflow before clamping themselves.
    ///
    /// ```rust
    /// use trellis_layout::Length;
    ///
    /// assert_eq!(Length::Px(50.0).resolve(100.0, || 999.0), 50.0);
    /// assert_eq!(Length::Percent(50.0).resolve(200.0, || 0.0), 100.0);
    /// assert_eq!(Length::Stretch.resolve(80.0, || 0.0), 80.0);
    /// assert_eq!(Length::Content.resolve(80.0, || 42.0), 42.0);
    /// ```
    pub fn resolve(self, available: f64, content: impl FnOnce() -> f64) -> f64 {
        match self {
            Self::Content => content(),
            Self::Px(px) => px,
            Self::Percent(percent) => available * percent / 100.0,
            Self::Stretch => available,
        }
    }

    /// Whether this is [`Length::Stretch`].
    pub fn is_stretch(self) -> bool {
        matches!(self, Self::Stretch)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => f.write_str("content"),
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Stretch => f.write_str("stretch"),
        }
    }
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = |digits: &str| {
            digits
                .parse::<f64>()
                .map_err(|source| ParseLengthError::Number {
                    input: s.to_owned(),
                    source,
                })
        };
        match s {
            "content" => Ok(Self::Content),
            "stretch" => Ok(Self::Stretch),
            _ => {
                if let Some(digits) = s.strip_suffix("px") {
                    number(digits).map(Self::Px)
                } else if let Some(digits) = s.strip_suffix('%') {
                    number(digits).map(Self::Percent)
                } else {
                    Err(ParseLengthError::Unrecognized(s.to_owned()))
                }
            }
        }
    }
}

/// Width and height sizing rules with optional limits.
///
/// The default is [`LayoutParameters::fit_content`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutParameters {
    /// Horizontal sizing rule.
    pub width: Length,
    /// Vertical sizing rule.
    pub height: Length,
    /// Lower bound applied after resolving [`Self::width`].
    pub min_width: Option<f64>,
    /// Upper bound applied after resolving [`Self::width`] and to [`Self::limits`].
    pub max_width: Option<f64>,
    /// Lower bound applied after resolving [`Self::height`].
    pub min_height: Option<f64>,
    /// Upper bound applied after resolving [`Self::height`] and to [`Self::limits`].
    pub max_height: Option<f64>,
}

impl LayoutParameters {
    /// Stretch horizontally, fit content vertically. Typical for rows of a list.
    pub fn auto_row() -> Self {
        Self {
            width: Length::Stretch,
            height: Length::Content,
            ..Self::default()
        }
    }

    /// Stretch on both axes.
    pub fn fill() -> Self {
        Self {
            width: Length::Stretch,
            height: Length::Stretch,
            ..Self::default()
        }
    }

    /// Fit content on both axes.
    pub fn fit_content() -> Self {
        Self::default()
    }

    /// Fixed pixel size on both axes.
    pub fn fixed_size(width: f64, height: f64) -> Self {
        Self {
            width: Length::Px(width),
            height: Length::Px(height),
            ..Self::default()
        }
    }

    /// Largest content box that a view with these parameters may use.
    ///
    /// Axes whose length does not depend on content resolve to their real size;
    /// content-sized axes are limited only by `available`. Both are then capped by
    /// the maximum, if any.
    pub fn limits(&self, available: Size) -> Size {
        let width = self
            .width
            .resolve(available.width, || available.width)
            .min(self.max_width.unwrap_or(f64::INFINITY));
        let height = self
            .height
            .resolve(available.height, || available.height)
            .min(self.max_height.unwrap_or(f64::INFINITY));
        Size::new(width, height)
    }

    /// Resolve the final size of a view.
    ///
    /// `content_size` is invoked at most once, and only if an axis is
    /// [`Length::Content`]. Each axis is then clamped to its min and max.
    pub fn resolve(&self, available: Size, content_size: impl FnOnce() -> Size) -> Size {
        let mut content_size = Some(content_size);
        let mut cached: Option<Size> = None;
        let mut content = move || -> Size {
            if let Some(size) = cached {
                return size;
            }
            let size = content_size.take().map_or(Size::ZERO, |f| f());
            cached = Some(size);
            size
        };
        let width = self.width.resolve(available.width, || content().width);
        let height = self.height.resolve(available.height, || content().height);
        Size::new(
            clamp(width, self.min_width, self.max_width),
            clamp(height, self.min_height, self.max_height),
        )
    }
}

fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    // Unlike `f64::clamp`, tolerates min > max (max wins).
    value
        .max(min.unwrap_or(f64::NEG_INFINITY))
        .min(max.unwrap_or(f64::INFINITY))
}

impl fmt::Display for LayoutParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn axis(
            f: &mut fmt::Formatter<'_>,
            length: Length,
            min: Option<f64>,
            max: Option<f64>,
        ) -> fmt::Result {
            write!(f, "{length}")?;
            if min.is_none() && max.is_none() {
                return Ok(());
            }
            f.write_str("[")?;
            if let Some(min) = min {
                write!(f, "{min}")?;
            }
            f.write_str("..")?;
            if let Some(max) = max {
                write!(f, "{max}")?;
            }
            f.write_str("]")
        }
        axis(f, self.width, self.min_width, self.max_width)?;
        f.write_str(" ")?;
        axis(f, self.height, self.min_height, self.max_height)
    }
}
