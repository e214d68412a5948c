// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform cell sizing along a grid's primary axis.

/// How a grid sizes its cells along the primary orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GridItemLayout {
    /// A fixed number of cells per lane; the cell length divides the available space.
    Count(usize),
    /// A fixed cell length; as many cells per lane as fit.
    Length(f64),
}

impl Default for GridItemLayout {
    fn default() -> Self {
        Self::Count(5)
    }
}

impl GridItemLayout {
    /// Cell length and number of cells per lane for a primary axis of
    /// `available` pixels with `spacing` pixels between cells.
    ///
    /// Degenerate inputs still produce at least one cell per lane.
    ///
    /// ```rust
    /// use trellis_layout::GridItemLayout;
    ///
    /// assert_eq!(GridItemLayout::Count(4).item_length_and_count(110.0, 10.0), (20.0, 4));
    /// assert_eq!(GridItemLayout::Length(20.0).item_length_and_count(110.0, 10.0), (20.0, 4));
    /// ```
    pub fn item_length_and_count(&self, available: f64, spacing: f64) -> (f64, usize) {
        match *self {
            Self::Count(count) => {
                let count = count.max(1);
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Cell counts are far below 2^52."
                )]
                let length = (available + spacing) / count as f64 - spacing;
                (length, count)
            }
            Self::Length(px) => {
                if px + spacing <= 0.0 {
                    return (1.0, 1);
                }
                let exact = (available + spacing) / (px + spacing);
                // Truncate after a small epsilon so rounding error cannot wrap early.
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "Saturating float to integer conversion is intended here."
                )]
                let count = (exact + 4.0 * f64::EPSILON) as usize;
                (px, count.max(1))
            }
        }
    }
}
