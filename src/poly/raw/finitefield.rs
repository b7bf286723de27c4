use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::{PolyError, Result};
use crate::parser;
use crate::poly::field::Field;
use crate::poly::raw::zp;

/// An element of Z/PZ, stored as its representative in `[0, P)`.
///
/// `P` must be prime for [`Field::inv`] to produce inverses; this is not checked.
/// A `P` outside `2..=zp::MAX_MODULUS` is rejected when the type is first constructed.
/// The derived order compares residues and carries no field meaning.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FiniteField<const P: i64> {
    n: i64,
}

impl<const P: i64> FiniteField<P> {
    const MODULUS_OK: () = assert!(
        zp::is_valid_modulus(P),
        "the modulus must satisfy 2 <= P and P * P <= i64::MAX"
    );

    pub fn new(n: i64) -> FiniteField<P> {
        #[allow(clippy::let_unit_value)]
        let () = Self::MODULUS_OK;
        FiniteField {
            n: zp::reduce(n, P),
        }
    }

    /// The residue in `[0, P)`.
    #[inline]
    pub fn value(&self) -> i64 {
        self.n
    }

    #[inline]
    pub const fn modulus() -> i64 {
        P
    }
}

impl<const P: i64> Default for FiniteField<P> {
    fn default() -> Self {
        FiniteField::new(0)
    }
}

/// Runtime counterpart of the construction-time modulus check.
pub fn check_modulus(p: i64) -> Result<()> {
    if zp::is_valid_modulus(p) {
        Ok(())
    } else {
        Err(PolyError::InvariantViolation(format!(
            "modulus {} is outside 2..={}",
            p,
            zp::MAX_MODULUS
        )))
    }
}

impl<const P: i64> fmt::Display for FiniteField<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.n)
    }
}

impl<const P: i64> Add for FiniteField<P> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        FiniteField {
            n: zp::add(self.n, other.n, P),
        }
    }
}

impl<const P: i64> Sub for FiniteField<P> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        FiniteField {
            n: zp::sub(self.n, other.n, P),
        }
    }
}

impl<const P: i64> Mul for FiniteField<P> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        FiniteField {
            n: zp::mul(self.n, other.n, P),
        }
    }
}

impl<const P: i64> Neg for FiniteField<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FiniteField {
            n: zp::neg(self.n, P),
        }
    }
}

impl<const P: i64> Zero for FiniteField<P> {
    fn zero() -> Self {
        FiniteField::new(0)
    }

    fn is_zero(&self) -> bool {
        self.n == 0
    }
}

impl<const P: i64> One for FiniteField<P> {
    fn one() -> Self {
        FiniteField::new(1)
    }
}

impl<const P: i64> Field for FiniteField<P> {
    fn inv(&self) -> Result<Self> {
        if self.n == 0 {
            return Err(PolyError::DivideByZero);
        }
        Ok(FiniteField {
            n: zp::inv(self.n, P),
        })
    }

    fn from_i64(n: i64) -> Self {
        FiniteField::new(n)
    }

    fn from_fraction(num: i64, den: i64) -> Result<Self> {
        Err(PolyError::MalformedInput(format!(
            "\\frac{{{}}}{{{}}} is not a coefficient of Z/{}",
            num, den, P
        )))
    }

    /// Reduces digit by digit, so literals of any length are accepted.
    fn from_literal(digits: &str) -> Result<Self> {
        let mut n = 0;
        for c in digits.chars() {
            let d = c
                .to_digit(10)
                .ok_or_else(|| PolyError::MalformedInput(format!("expected digit, got {:?}", c)))?;
            n = zp::add(zp::mul(n, 10 % P, P), zp::reduce(d as i64, P), P);
        }
        Ok(FiniteField::new(n))
    }

    fn is_negative(&self) -> bool {
        false
    }

    fn pow(&self, e: i64) -> Result<Self> {
        if e < 0 {
            return Ok(FiniteField {
                n: zp::pow(self.inv()?.n, e.unsigned_abs(), P),
            });
        }
        Ok(FiniteField {
            n: zp::pow(self.n, e as u64, P),
        })
    }
}

impl<const P: i64> From<i64> for FiniteField<P> {
    fn from(n: i64) -> Self {
        FiniteField::new(n)
    }
}

impl<const P: i64> FromStr for FiniteField<P> {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_coefficient(s)
    }
}
