//! Scalar endpoints of intervals.
//!
//! [`Num`] wraps an arbitrary-precision integer, so endpoint arithmetic never
//! overflows. The only partial operation is [`Num::div`], which refuses a zero
//! divisor.

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

/// A boxed integer.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Num(BigInt);

impl Num {
    pub fn new(value: impl Into<BigInt>) -> Self {
        Num(value.into())
    }

    pub fn zero() -> Self {
        Num(BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn add(&self, other: &Num) -> Num {
        Num(&self.0 + &other.0)
    }

    /// `x - y`, defined as `x + (-y)`.
    pub fn sub(&self, other: &Num) -> Num {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Num) -> Num {
        Num(&self.0 * &other.0)
    }

    /// Truncating division. Returns `None` when `other` is zero.
    pub fn div(&self, other: &Num) -> Option<Num> {
        if other.is_zero() {
            None
        } else {
            Some(Num(&self.0 / &other.0))
        }
    }

    pub fn neg(&self) -> Num {
        Num(-&self.0)
    }
}

impl From<i32> for Num {
    fn from(value: i32) -> Self {
        Num(BigInt::from(value))
    }
}

impl From<i64> for Num {
    fn from(value: i64) -> Self {
        Num(BigInt::from(value))
    }
}

impl From<usize> for Num {
    fn from(value: usize) -> Self {
        Num(BigInt::from(value))
    }
}

impl From<BigInt> for Num {
    fn from(value: BigInt) -> Self {
        Num(value)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn n(v: i64) -> Num {
        Num::from(v)
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(n(2).add(&n(3)), n(5));
        assert_eq!(n(2).sub(&n(3)), n(-1));
        assert_eq!(n(-4).sub(&n(-4)), n(0));
    }

    #[test]
    fn test_mul_neg() {
        assert_eq!(n(-3).mul(&n(4)), n(-12));
        assert_eq!(n(7).neg(), n(-7));
        assert_eq!(n(0).neg(), n(0));
    }

    #[test]
    fn test_div_truncates() {
        assert_eq!(n(7).div(&n(2)), Some(n(3)));
        assert_eq!(n(-7).div(&n(2)), Some(n(-3)));
    }

    #[test]
    fn test_div_by_zero() {
        for a in [-5, 0, 1, 100] {
            assert_eq!(n(a).div(&n(0)), None);
        }
    }

    #[test]
    fn test_no_overflow() {
        let big = n(i64::MAX);
        let sum = big.add(&big);
        assert!(sum > big);
        assert_eq!(sum.to_string(), "18446744073709551614");
    }
}
