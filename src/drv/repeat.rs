//! Repeated combination of independent draws from one distribution.

use alloc::{format, string::ToString, vec::Vec};
use core::ops::Add;

use num_traits::Zero;

use super::{Drv, Error, Probability, Value};
use crate::expr::{BinOp, Expr};

impl<V: Value, P: Probability> Drv<V, P> {
	/// Creates the distribution of `op` applied across `count` independent draws from this distribution. `op` must be
	/// associative, and `identity` must be its identity element (it is the only possible result when `count` is zero).
	///
	/// Draws are combined by repeated squaring, so this makes a number of calls to [`Self::combine()`] proportional to
	/// the logarithm of `count` rather than to `count` itself. When `count` is one, this distribution is returned
	/// unchanged.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// // Highest of four dice
	/// let best = d(6)?.repeat(4, 0, |&a, &b| a.max(b));
	/// assert_eq!(best.weight_of(&1), BigRational::new(1.into(), 1296.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn repeat(&self, count: usize, identity: V, mut op: impl FnMut(&V, &V) -> V) -> Self {
		let mut remaining = count;
		let mut term = self.clone();
		let mut result: Option<Self> = None;

		while remaining > 0 {
			if (remaining & 1) == 1 {
				result = Some(match result {
					Some(acc) => acc.combine(&term, &mut op),
					None => term.clone(),
				});
			}

			remaining >>= 1;
			if remaining > 0 {
				term = term.combine(&term, &mut op);
			}
		}

		result.unwrap_or_else(|| Self::point(identity))
	}

	/// Creates the distribution of the sum of `count` independent draws from this distribution.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let d6 = d(6)?;
	/// let three_d6 = d6.repeat_sum(3);
	/// assert_eq!(three_d6.weight_of(&3), BigRational::new(1.into(), 216.into()));
	/// assert_eq!(three_d6.to_string(), "(3 @ d6)");
	/// assert!(d6.repeat_sum(2).is_same(&(&d6 + &d6)));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn repeat_sum(&self, count: usize) -> Self
	where
		V: Add<Output = V> + Zero,
	{
		self.repeat(count, V::zero(), |a, b| a.clone() + b.clone())
			.with_expr(Expr::binary_with_atom(BinOp::Repeat, count, self.expr.as_ref()))
	}

	/// Creates the distribution of the sum of a random number of independent draws from this distribution, where the
	/// number of draws is itself drawn from `count`.
	///
	/// # Errors
	/// If any possible value of `count` can't be used as a number of draws (e.g. it's negative), an
	/// [`Error::OperatorDomain`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// // Roll a d2 to find out how many d2s to roll
	/// let d2 = d(2)?;
	/// let total = d2.repeat_sum_by(&d2)?;
	/// assert_eq!(total.weight_of(&1), BigRational::new(1.into(), 4.into()));
	/// assert_eq!(total.weight_of(&4), BigRational::new(1.into(), 8.into()));
	/// assert_eq!(total.to_string(), "(d2 @ d2)");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn repeat_sum_by<C>(&self, count: &Drv<C, P>) -> Result<Self, Error>
	where
		V: Add<Output = V> + Zero,
		C: Value + TryInto<usize>,
	{
		let mut counts = Vec::with_capacity(count.entries.len());
		for (value, weight) in &count.entries {
			let Ok(draws) = TryInto::<usize>::try_into(value.clone()) else {
				return Err(Error::OperatorDomain {
					left: format!("{value:?}"),
					right: self.to_string(),
					reason: "number of draws must be a non-negative integer".to_string(),
				});
			};
			counts.push((draws, weight));
		}
		counts.sort_by_key(|&(draws, _)| draws);

		// Each sum extends the previous one by the difference in draws
		let mut mixture = Vec::with_capacity(counts.len());
		let mut previous: Option<(usize, Self)> = None;
		for (draws, weight) in counts {
			let sum = match &previous {
				Some((previous_draws, previous_sum)) => previous_sum.combine(
					&self.repeat(draws - *previous_draws, V::zero(), |a, b| a.clone() + b.clone()),
					|a, b| a.clone() + b.clone(),
				),
				None => self.repeat(draws, V::zero(), |a, b| a.clone() + b.clone()),
			};
			mixture.push((weight.clone(), sum.clone()));
			previous = Some((draws, sum));
		}

		Ok(Self::weighted_average(mixture)?.with_expr(Expr::binary(
			BinOp::Repeat,
			count.expr.as_ref(),
			self.expr.as_ref(),
		)))
	}
}
