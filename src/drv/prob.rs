//! Representations of probability weights.
//!
//! A [`Drv`](super::Drv) stores its weights in exactly one representation, selected by its `P` type parameter:
//! [`BigRational`] for exact arithmetic (the default), or [`f64`] for faster but approximate arithmetic.

use core::{
	fmt,
	ops::{Add, AddAssign, Div, Mul, Sub},
};

use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Absolute tolerance allowed when checking that approximate weights sum to one
pub const TOLERANCE: f64 = 1e-9;

/// A probability weight that can be stored in a [`Drv`](super::Drv).
pub trait Probability:
	Clone
	+ PartialOrd
	+ fmt::Debug
	+ fmt::Display
	+ Zero
	+ One
	+ Add<Output = Self>
	+ AddAssign
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Div<Output = Self>
{
	/// Converts the weight to its nearest floating-point approximation.
	#[must_use]
	fn to_f64(&self) -> f64;

	/// Checks whether the weight is usable at all (finite and non-negative).
	#[must_use]
	fn is_valid(&self) -> bool;

	/// Checks whether the weight is one (exactly, or within [`TOLERANCE`] for approximate weights).
	#[must_use]
	fn is_unit(&self) -> bool;

	/// Checks whether the weight is strictly greater than a random draw from the unit interval.
	#[must_use]
	fn exceeds(&self, draw: f64) -> bool;
}

impl Probability for BigRational {
	#[inline]
	fn to_f64(&self) -> f64 {
		ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
	}

	#[inline]
	fn is_valid(&self) -> bool {
		!self.is_negative()
	}

	#[inline]
	fn is_unit(&self) -> bool {
		self.is_one()
	}

	/// Compares against the exact rational value of the draw, so no rounding is involved.
	#[inline]
	fn exceeds(&self, draw: f64) -> bool {
		Self::from_float(draw).is_some_and(|draw| *self > draw)
	}
}

impl Probability for f64 {
	#[inline]
	fn to_f64(&self) -> f64 {
		*self
	}

	#[inline]
	fn is_valid(&self) -> bool {
		self.is_finite() && *self >= 0.0
	}

	#[inline]
	fn is_unit(&self) -> bool {
		(self - 1.0).abs() <= TOLERANCE
	}

	#[inline]
	fn exceeds(&self, draw: f64) -> bool {
		*self > draw
	}
}

/// Checks whether two weights differ by no more than the larger of `rel_tol` (relative to the larger magnitude) and
/// `abs_tol`.
#[must_use]
pub(crate) fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
	if a == b {
		return true;
	}
	let diff = (a - b).abs();
	diff <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}
