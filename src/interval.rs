//! Integer intervals.
//!
//! An [`Interval`] is a pair of endpoints `[low, high]`. The type does not
//! enforce `low <= high`: building sound intervals is the caller's
//! responsibility, and every operation below works on endpoints
//! *positionally*, never re-sorting them.
//!
//! In particular:
//! - [`Interval::neg`] maps `[l, h]` to `[-l, -h]`, which is reversed for any
//!   non-degenerate input.
//! - [`Interval::mul`] multiplies corresponding endpoints, which is not the
//!   true interval product (`[-2, 3] * [-2, 3]` yields `[4, 9]`, missing `-6`).
//! - [`Interval::div`] only rejects a divisor whose *endpoint* is zero; a
//!   divisor such as `[-1, 1]` is accepted.
//!
//! These are known soundness gaps kept for result compatibility.

use std::cmp::{max, min};
use std::fmt;

use crate::num::Num;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub low: Num,
    pub high: Num,
}

impl Interval {
    pub fn new(low: impl Into<Num>, high: impl Into<Num>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }

    /// The degenerate interval `[value, value]`.
    pub fn constant(value: impl Into<Num>) -> Self {
        let value = value.into();
        Self {
            low: value.clone(),
            high: value,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.low == self.high
    }

    /// Smallest interval containing both: `[min(lows), max(highs)]`.
    pub fn join(&self, other: &Interval) -> Interval {
        Interval {
            low: min(&self.low, &other.low).clone(),
            high: max(&self.high, &other.high).clone(),
        }
    }

    pub fn add(&self, other: &Interval) -> Interval {
        Interval {
            low: self.low.add(&other.low),
            high: self.high.add(&other.high),
        }
    }

    pub fn sub(&self, other: &Interval) -> Interval {
        Interval {
            low: self.low.sub(&other.low),
            high: self.high.sub(&other.high),
        }
    }

    pub fn mul(&self, other: &Interval) -> Interval {
        Interval {
            low: self.low.mul(&other.low),
            high: self.high.mul(&other.high),
        }
    }

    /// Returns `None` if either endpoint of `other` is zero.
    pub fn div(&self, other: &Interval) -> Option<Interval> {
        Some(Interval {
            low: self.low.div(&other.low)?,
            high: self.high.div(&other.high)?,
        })
    }

    pub fn neg(&self) -> Interval {
        Interval {
            low: self.low.neg(),
            high: self.high.neg(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
