pub mod field;
pub mod order;
pub mod raw;
pub mod variable;

pub use self::field::Field;
pub use self::order::MonomialOrder;
pub use self::raw::finitefield::FiniteField;
pub use self::raw::fraction::Fraction;
pub use self::raw::monomial::Monomial;
pub use self::raw::multivar::Polynomial;
pub use self::variable::{AsciiOrder, InverseAsciiOrder, Variable, VariableOrder};
