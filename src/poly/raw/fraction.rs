use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::{PolyError, Result};
use crate::parser;
use crate::poly::field::Field;

/// An exact rational number `num / den` in lowest terms with `den > 0`.
///
/// Arithmetic is carried out in `i128` and narrowed back after normalization. The
/// operators panic with "coefficient overflow" if the reduced result does not fit
/// in an `i64`; the `checked_*` methods return `None` instead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Constructs `num / den`, normalized. Fails if `den` is zero.
    pub fn new(num: i64, den: i64) -> Result<Fraction> {
        if den == 0 {
            return Err(PolyError::DivideByZero);
        }
        Fraction::from_wide(num as i128, den as i128).ok_or(PolyError::Overflow("fraction"))
    }

    #[inline]
    pub fn numerator(&self) -> i64 {
        self.num
    }

    #[inline]
    pub fn denominator(&self) -> i64 {
        self.den
    }

    /// Normalizes a wide fraction and narrows it to `i64`.
    fn from_wide(mut num: i128, mut den: i128) -> Option<Fraction> {
        debug_assert!(den != 0);
        if den < 0 {
            num = -num;
            den = -den;
        }
        let gcd = num.gcd(&den);
        if gcd > 1 {
            num /= gcd;
            den /= gcd;
        }
        Some(Fraction {
            num: i64::try_from(num).ok()?,
            den: i64::try_from(den).ok()?,
        })
    }

    fn expect_fit(f: Option<Fraction>) -> Fraction {
        match f {
            Some(f) => f,
            None => panic!("coefficient overflow: result does not fit in i64"),
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "\\frac{{{}}}{{{}}}", self.num, self.den)
        }
    }
}

impl CheckedAdd for Fraction {
    fn checked_add(&self, other: &Self) -> Option<Self> {
        let (a, b) = (self.num as i128, self.den as i128);
        let (c, d) = (other.num as i128, other.den as i128);
        Fraction::from_wide(a * d + c * b, b * d)
    }
}

impl CheckedSub for Fraction {
    fn checked_sub(&self, other: &Self) -> Option<Self> {
        let (a, b) = (self.num as i128, self.den as i128);
        let (c, d) = (other.num as i128, other.den as i128);
        Fraction::from_wide(a * d - c * b, b * d)
    }
}

impl CheckedMul for Fraction {
    fn checked_mul(&self, other: &Self) -> Option<Self> {
        Fraction::from_wide(
            self.num as i128 * other.num as i128,
            self.den as i128 * other.den as i128,
        )
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Fraction::expect_fit(self.checked_add(&other))
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Fraction::expect_fit(self.checked_sub(&other))
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Fraction::expect_fit(self.checked_mul(&other))
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.num.checked_neg() {
            Some(num) => Fraction { num, den: self.den },
            None => panic!("coefficient overflow: cannot negate {}", self),
        }
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Fraction { num: 0, den: 1 }
    }

    fn is_zero(&self) -> bool {
        self.num == 0
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction { num: 1, den: 1 }
    }

    fn is_one(&self) -> bool {
        self.num == 1 && self.den == 1
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num as i128 * other.den as i128).cmp(&(other.num as i128 * self.den as i128))
    }
}

impl Field for Fraction {
    fn inv(&self) -> Result<Self> {
        if self.num == 0 {
            return Err(PolyError::DivideByZero);
        }
        Fraction::from_wide(self.den as i128, self.num as i128)
            .ok_or(PolyError::Overflow("fraction inverse"))
    }

    fn from_i64(n: i64) -> Self {
        Fraction { num: n, den: 1 }
    }

    fn from_fraction(num: i64, den: i64) -> Result<Self> {
        Fraction::new(num, den)
    }

    fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// `0^0` is 1, `0^e` is 0 for positive `e`, and fails for negative `e`.
    fn pow(&self, e: i64) -> Result<Self> {
        if e < 0 {
            return Ok(self.inv()?.pow_unsigned(e.unsigned_abs()));
        }
        if self.num == 0 {
            return Ok(if e == 0 { Fraction::one() } else { Fraction::zero() });
        }
        Ok(self.pow_unsigned(e as u64))
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::from_i64(n)
    }
}

impl FromStr for Fraction {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_coefficient(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn normalization() {
        assert_eq!(q(2, 10), q(1, 5));
        assert_eq!(q(-6, -9), q(2, 3));
        assert_eq!(q(3, -6).numerator(), -1);
        assert_eq!(q(3, -6).denominator(), 2);
        assert_eq!(q(0, -5), Fraction::zero());
        assert_eq!(Fraction::new(1, 0), Err(PolyError::DivideByZero));
    }

    #[test]
    fn arithmetic() {
        let mut f1 = q(1, 5).inv().unwrap();
        let mut f2 = q(2, 3);
        assert_eq!(f1, Fraction::from(5));
        f1 = f1 + f2;
        assert_eq!(f1, q(17, 3));
        f2 = f2 + f2 + f2 + f2;
        assert_eq!(f2, q(8, 3));
        f2 = f2.pow(0).unwrap();
        assert_eq!(f2, Fraction::one());
        let f3 = ((f1 + f2) * f1).div(&(f1 - f2)).unwrap();
        assert_eq!(f3, q(170, 21));
        let f3 = f3.div(&Fraction::from(10)).unwrap();
        assert_eq!(f3, q(17, 21));
        assert!((f3 - q(17, 21)).is_zero());
        assert_eq!(-q(1, 2) * Fraction::from(-6), Fraction::from(3));
    }

    #[test]
    fn ordering() {
        let (a, b, c) = (Fraction::zero(), q(8, 3), q(17, 3));
        assert!(a < b && b < c && c > a);
        assert!(q(-1, 2) < q(-1, 3));
        assert_eq!(q(2, 4).cmp(&q(1, 2)), Ordering::Equal);
    }

    #[test]
    fn pow() {
        assert_eq!(q(8, 3).pow(0).unwrap(), Fraction::one());
        assert_eq!(Fraction::zero().pow(1_000_000_000_000_000_000).unwrap(), Fraction::zero());
        assert_eq!(q(1, 2).pow(30).unwrap(), q(1, 1 << 30));
        assert_eq!(q(-2, 3).pow(3).unwrap(), q(-8, 27));
        assert_eq!(q(-2, 3).pow(-2).unwrap(), q(9, 4));
        assert_eq!(Fraction::zero().pow(-1), Err(PolyError::DivideByZero));
    }

    #[test]
    fn inverse_round_trip() {
        for &(n, d) in &[(1, 5), (-7, 3), (12, -12), (i64::MAX, 2), (-3, i64::MAX)] {
            let f = q(n, d);
            assert_eq!(f.inv().unwrap().inv().unwrap(), f);
        }
        assert_eq!(Fraction::zero().inv(), Err(PolyError::DivideByZero));
    }

    #[test]
    fn checked_overflow() {
        let big = Fraction::from(i64::MAX);
        assert_eq!(big.checked_add(&Fraction::one()), None);
        assert_eq!(big.checked_mul(&Fraction::from(2)), None);
        assert_eq!(big.checked_sub(&Fraction::one()), Some(Fraction::from(i64::MAX - 1)));
    }

    #[test]
    #[should_panic(expected = "coefficient overflow")]
    fn overflow_panics() {
        let _ = Fraction::from(i64::MAX) * Fraction::from(i64::MAX);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("-\\frac{-16}{-8}".parse::<Fraction>().unwrap(), Fraction::from(-2));
        assert_eq!("42".parse::<Fraction>().unwrap(), Fraction::from(42));
        assert_eq!(q(-1, 2).to_string(), "\\frac{-1}{2}");
        assert_eq!(Fraction::from(-4).to_string(), "-4");
        assert_eq!("\\frac{1}{0}".parse::<Fraction>(), Err(PolyError::DivideByZero));
        assert!(matches!(
            "\\frac{1}{2".parse::<Fraction>(),
            Err(PolyError::MalformedInput(_))
        ));
    }
}
