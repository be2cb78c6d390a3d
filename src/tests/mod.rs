use num_bigint::BigInt;
use num_rational::BigRational;

mod expr;
mod repeat;
mod sample;

/// Shorthand for an exact weight
fn ratio(numer: i64, denom: i64) -> BigRational {
	BigRational::new(BigInt::from(numer), BigInt::from(denom))
}
