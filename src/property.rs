//! Abstract properties of a single variable.
//!
//! ```text
//!              Unknown
//!             /       \
//!   Num([l, h])       Arr([l, h])
//! ```
//!
//! Scalars and arrays never mix: joining a `Num` with an `Arr` gives
//! `Unknown`, which is absorbing. Absence from a [`State`][crate::state::State]
//! plays the role of bottom.

use std::fmt;

use crate::interval::Interval;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    /// A scalar whose value lies in the interval.
    Num(Interval),
    /// An array whose length lies in the interval.
    Arr(Interval),
    /// No information.
    Unknown,
}

impl Property {
    pub fn num(interval: Interval) -> Self {
        Property::Num(interval)
    }

    pub fn arr(interval: Interval) -> Self {
        Property::Arr(interval)
    }

    /// `Num([value, value])`.
    pub fn constant(value: impl Into<crate::num::Num>) -> Self {
        Property::Num(Interval::constant(value))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Property::Unknown)
    }

    /// Least upper bound. Same-kind properties join their intervals;
    /// anything else is `Unknown`.
    pub fn join(&self, other: &Property) -> Property {
        match (self, other) {
            (Property::Num(a), Property::Num(b)) => Property::Num(a.join(b)),
            (Property::Arr(a), Property::Arr(b)) => Property::Arr(a.join(b)),
            _ => Property::Unknown,
        }
    }

    /// Applies `op` when both sides are scalars; otherwise `Unknown`.
    /// A failing `op` (division by zero) also yields `Unknown`.
    fn lift2<F>(&self, other: &Property, op: F) -> Property
    where
        F: FnOnce(&Interval, &Interval) -> Option<Interval>,
    {
        match (self, other) {
            (Property::Num(a), Property::Num(b)) => op(a, b).map_or(Property::Unknown, Property::Num),
            _ => Property::Unknown,
        }
    }

    pub fn add(&self, other: &Property) -> Property {
        self.lift2(other, |a, b| Some(a.add(b)))
    }

    pub fn sub(&self, other: &Property) -> Property {
        self.lift2(other, |a, b| Some(a.sub(b)))
    }

    pub fn mul(&self, other: &Property) -> Property {
        self.lift2(other, |a, b| Some(a.mul(b)))
    }

    pub fn div(&self, other: &Property) -> Property {
        self.lift2(other, |a, b| a.div(b))
    }

    pub fn neg(&self) -> Property {
        match self {
            Property::Num(a) => Property::Num(a.neg()),
            _ => Property::Unknown,
        }
    }

    /// `len(a)`: an array's length bound becomes a scalar bound.
    pub fn length(&self) -> Property {
        match self {
            Property::Arr(a) => Property::Num(a.clone()),
            _ => Property::Unknown,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Num(i) => write!(f, "num{}", i),
            Property::Arr(i) => write!(f, "arr{}", i),
            Property::Unknown => write!(f, "unknown"),
        }
    }
}
