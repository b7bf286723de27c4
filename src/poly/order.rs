use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::PolyError;
use crate::poly::field::Field;
use crate::poly::raw::monomial::Monomial;
use crate::poly::variable::VariableOrder;

/// A total order on power products. Coefficients are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MonomialOrder {
    /// Lexicographic on the exponent tuples, most significant variable first.
    Lex,
    /// Total degree, ties broken by `Lex`.
    Grlex,
    /// Total degree, ties broken by the reverse of the least significant variable.
    Grevlex,
}

impl Default for MonomialOrder {
    fn default() -> MonomialOrder {
        MonomialOrder::Grlex
    }
}

impl MonomialOrder {
    pub fn cmp<F: Field, V: VariableOrder>(&self, a: &Monomial<F, V>, b: &Monomial<F, V>) -> Ordering {
        match *self {
            MonomialOrder::Lex => lex(a, b),
            MonomialOrder::Grlex => a.degree().cmp(&b.degree()).then_with(|| lex(a, b)),
            MonomialOrder::Grevlex => a.degree().cmp(&b.degree()).then_with(|| grevlex_tie(a, b)),
        }
    }
}

/// Compares `(variable, degree)` pairs from the most significant variable down.
/// When one sequence is a prefix of the other, the shorter one is smaller.
fn lex<F: Field, V: VariableOrder>(a: &Monomial<F, V>, b: &Monomial<F, V>) -> Ordering {
    a.exponent_map()
        .iter()
        .rev()
        .cmp(b.exponent_map().iter().rev())
}

/// Scans from the least significant variable up. At the first difference, a
/// monomial that uses a less significant variable, or more of it, is smaller.
fn grevlex_tie<F: Field, V: VariableOrder>(a: &Monomial<F, V>, b: &Monomial<F, V>) -> Ordering {
    for ((va, da), (vb, db)) in a.exponent_map().iter().zip(b.exponent_map().iter()) {
        if va != vb {
            return va.cmp(vb);
        }
        if da != db {
            return db.cmp(da);
        }
    }
    b.exponent_map().len().cmp(&a.exponent_map().len())
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Grlex => "grlex",
            MonomialOrder::Grevlex => "grevlex",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MonomialOrder {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<MonomialOrder, PolyError> {
        match s.to_ascii_lowercase().as_str() {
            "lex" => Ok(MonomialOrder::Lex),
            "grlex" => Ok(MonomialOrder::Grlex),
            "grevlex" => Ok(MonomialOrder::Grevlex),
            _ => Err(PolyError::MalformedInput(format!(
                "unknown monomial order {:?}",
                s
            ))),
        }
    }
}
