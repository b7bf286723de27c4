pub mod finitefield;
pub mod fraction;
pub mod monomial;
pub mod multivar;
pub mod zp;
