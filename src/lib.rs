//! Gröbner bases of polynomial ideals over the rationals and over Z/p.
//!
//! ```
//! use groebner::{Fraction, Ideal, InverseAsciiOrder, MonomialOrder};
//!
//! let mut ideal: Ideal<Fraction, InverseAsciiOrder> =
//!     Ideal::from_strs(MonomialOrder::Grlex, &["xz - y^2", "x^3 - z^2"]).unwrap();
//! ideal.make_reduced_groebner_basis();
//! assert_eq!(ideal.len(), 5);
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

pub mod error;
pub mod ideal;
pub mod parser;
pub mod poly;


pub use crate::error::{PolyError, Result};
pub use crate::ideal::{BasisType, Ideal};
pub use crate::poly::{
    AsciiOrder, FiniteField, Field, Fraction, InverseAsciiOrder, Monomial, MonomialOrder,
    Polynomial, Variable, VariableOrder,
};
