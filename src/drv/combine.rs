//! Combination of independent distributions with binary operators.
//!
//! Every arithmetic and comparison operation between two distributions is a call to [`Drv::combine()`] (or its
//! fallible sibling [`Drv::try_combine()`]) with the matching operator on individual outcomes.

use alloc::{format, string::ToString};
use core::{
	fmt,
	ops::{Add, Mul, Sub},
};

use num_integer::Integer;
use num_traits::{CheckedDiv, Zero};

use super::{Accumulator, Drv, Error, Probability, Value};
use crate::expr::{BinOp, Expr};

/// Generates implementations of a [`core::ops`] arithmetic trait for distributions (by reference and by value).
/// The outcome type must implement the same trait, which is applied to every pair of outcomes.
macro_rules! binary_op_impl {
	($trait:ident, $method:ident, $op:expr) => {
		impl<V, P> $trait<&Drv<V, P>> for &Drv<V, P>
		where
			V: Value + $trait<Output = V>,
			P: Probability,
		{
			type Output = Drv<V, P>;

			fn $method(self, rhs: &Drv<V, P>) -> Self::Output {
				self.combine(rhs, |a, b| $trait::$method(a.clone(), b.clone()))
					.with_expr(Expr::binary($op, self.expr.as_ref(), rhs.expr.as_ref()))
			}
		}

		impl<V, P> $trait for Drv<V, P>
		where
			V: Value + $trait<Output = V>,
			P: Probability,
		{
			type Output = Self;

			#[inline]
			fn $method(self, rhs: Self) -> Self::Output {
				$trait::$method(&self, &rhs)
			}
		}
	};
}

binary_op_impl!(Add, add, BinOp::Add);
binary_op_impl!(Sub, sub, BinOp::Sub);
binary_op_impl!(Mul, mul, BinOp::Mul);

impl<V: Value, P: Probability> Drv<V, P> {
	/// Creates the distribution of `op` applied to one independent draw from each of `self` and `other`.
	///
	/// The probability of each pair of outcomes is the product of their weights, and pairs for which `op` gives equal
	/// results have their probabilities summed. This takes time proportional to the product of the two support sizes.
	///
	/// Combining a distribution with itself represents two independent draws, *not* the pairs `(x, x)`.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let d6 = d(6)?;
	/// let highest = d6.combine(&d6, |&a, &b| a.max(b));
	/// assert_eq!(highest.weight_of(&6), BigRational::new(11.into(), 36.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn combine<W: Value, X: Value>(&self, other: &Drv<W, P>, mut op: impl FnMut(&V, &W) -> X) -> Drv<X, P> {
		let mut acc = Accumulator::new();
		for (a, a_weight) in &self.entries {
			for (b, b_weight) in &other.entries {
				acc.add(op(a, b), a_weight.clone() * b_weight.clone());
			}
		}
		acc.finish()
	}

	/// Same as [`Self::combine()`], but with an operator that can fail for some pairs of outcomes.
	///
	/// # Errors
	/// If `op` fails for any pair of outcomes, the whole combination fails with [`Error::OperatorDomain`] identifying
	/// that pair. No partial distribution is ever produced.
	pub fn try_combine<W: Value, X: Value, E: fmt::Display>(
		&self,
		other: &Drv<W, P>,
		mut op: impl FnMut(&V, &W) -> Result<X, E>,
	) -> Result<Drv<X, P>, Error> {
		let mut acc = Accumulator::new();
		for (a, a_weight) in &self.entries {
			for (b, b_weight) in &other.entries {
				let value = op(a, b).map_err(|err| Error::OperatorDomain {
					left: format!("{a:?}"),
					right: format!("{b:?}"),
					reason: err.to_string(),
				})?;
				acc.add(value, a_weight.clone() * b_weight.clone());
			}
		}
		Ok(acc.finish())
	}

	/// Divides draws from `self` by draws from `other`, using the outcome type's own division.
	///
	/// For integer outcomes this truncates towards zero, so `d6 / 2` has the values 0 to 3. For exact quotients, map
	/// the outcomes to rationals first (e.g. `drv.map(|&x| BigRational::from_integer(x.into()))`).
	///
	/// # Errors
	/// If any possible value of `other` is zero, or any division overflows, [`Error::OperatorDomain`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational, Drv};
	///
	/// let halved = d(6)?.checked_div(&Drv::constant(2))?;
	/// assert_eq!(halved.weight_of(&1), BigRational::new(1.into(), 3.into()));
	/// assert_eq!(halved.to_string(), "(d6 / 2)");
	///
	/// let two = BigRational::from_integer(2.into());
	/// let exact = d(6)?.map(|&x| BigRational::from_integer(x.into())).checked_div(&Drv::constant(two))?;
	/// assert_eq!(exact.weight_of(&BigRational::new(1.into(), 2.into())), BigRational::new(1.into(), 6.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn checked_div(&self, other: &Self) -> Result<Self, Error>
	where
		V: CheckedDiv + Zero,
	{
		let quotient = self.try_combine(other, |a, b| {
			if b.is_zero() {
				return Err("division by zero");
			}
			CheckedDiv::checked_div(a, b).ok_or("division overflow")
		})?;
		Ok(quotient.with_expr(Expr::binary(BinOp::Div, self.expr.as_ref(), other.expr.as_ref())))
	}

	/// Divides draws from `self` by draws from `other`, rounding towards negative infinity.
	///
	/// # Errors
	/// If any possible value of `other` is zero, or any division overflows, [`Error::OperatorDomain`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{BigRational, Drv};
	///
	/// let floored = Drv::<i64>::uniform([-3, 3])?.floor_div(&Drv::constant(2))?;
	/// assert_eq!(floored.weight_of(&-2), BigRational::new(1.into(), 2.into()));
	/// assert_eq!(floored.weight_of(&1), BigRational::new(1.into(), 2.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn floor_div(&self, other: &Self) -> Result<Self, Error>
	where
		V: Integer + CheckedDiv,
	{
		let quotient = self.try_combine(other, |a, b| {
			if b.is_zero() {
				return Err("division by zero");
			}
			CheckedDiv::checked_div(a, b).ok_or("division overflow")?;
			Ok(a.div_floor(b))
		})?;
		Ok(quotient.with_expr(Expr::binary(BinOp::FloorDiv, self.expr.as_ref(), other.expr.as_ref())))
	}

	/// Creates the distribution of whether independent draws from `self` and `other` are equal.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let d6 = d(6)?;
	/// assert_eq!(d6.equal(&d6).p(), BigRational::new(1.into(), 6.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn equal(&self, other: &Self) -> Drv<bool, P> {
		self.compare(other, BinOp::Eq, |a, b| a == b)
	}

	/// Creates the distribution of whether independent draws from `self` and `other` differ.
	#[must_use]
	pub fn not_equal(&self, other: &Self) -> Drv<bool, P> {
		self.compare(other, BinOp::Ne, |a, b| a != b)
	}

	/// Creates the distribution of whether a draw from `self` is less than an independent draw from `other`.
	#[must_use]
	pub fn less(&self, other: &Self) -> Drv<bool, P>
	where
		V: PartialOrd,
	{
		self.compare(other, BinOp::Lt, |a, b| a < b)
	}

	/// Creates the distribution of whether a draw from `self` is at most an independent draw from `other`.
	#[must_use]
	pub fn less_eq(&self, other: &Self) -> Drv<bool, P>
	where
		V: PartialOrd,
	{
		self.compare(other, BinOp::Le, |a, b| a <= b)
	}

	/// Creates the distribution of whether a draw from `self` is greater than an independent draw from `other`.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let d6 = d(6)?;
	/// let beats = d6.greater(&d6);
	/// assert_eq!(beats.weight_of(&true), BigRational::new(15.into(), 36.into()));
	/// assert_eq!(beats.weight_of(&false), BigRational::new(21.into(), 36.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn greater(&self, other: &Self) -> Drv<bool, P>
	where
		V: PartialOrd,
	{
		self.compare(other, BinOp::Gt, |a, b| a > b)
	}

	/// Creates the distribution of whether a draw from `self` is at least an independent draw from `other`.
	#[must_use]
	pub fn greater_eq(&self, other: &Self) -> Drv<bool, P>
	where
		V: PartialOrd,
	{
		self.compare(other, BinOp::Ge, |a, b| a >= b)
	}

	/// Combines with a comparison operator, naming the result after the comparison.
	fn compare(&self, other: &Self, op: BinOp, cmp: impl FnMut(&V, &V) -> bool) -> Drv<bool, P> {
		self.combine(other, cmp)
			.with_expr(Expr::binary(op, self.expr.as_ref(), other.expr.as_ref()))
	}
}
