//! Conditioning a distribution on a predicate, and mixing several distributions together.

use core::borrow::Borrow;

use super::{Accumulator, Drv, Error, Probability, Value};

impl<V: Value, P: Probability> Drv<V, P> {
	/// Creates the distribution of this one, given that its outcome satisfies `predicate`. Outcomes that don't satisfy
	/// it are removed, and the weights of the rest are scaled up so that they sum to one again.
	///
	/// # Errors
	/// If no possible outcome satisfies `predicate`, [`Error::ZeroProbabilityCondition`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let high = d(6)?.given(|&x| x >= 4)?;
	/// assert_eq!(high.weight_of(&4), BigRational::new(1.into(), 3.into()));
	/// assert_eq!(high.weight_of(&1), BigRational::from_integer(0.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn given(&self, mut predicate: impl FnMut(&V) -> bool) -> Result<Self, Error> {
		let mut acc = Accumulator::new();
		let mut total = P::zero();

		for (value, weight) in self.entries.iter().filter(|(value, _)| predicate(value)) {
			total += weight.clone();
			acc.add(value.clone(), weight.clone());
		}

		if total.is_zero() {
			return Err(Error::ZeroProbabilityCondition);
		}
		Ok(acc.finish_scaled(&total))
	}

	/// Creates a mixture of distributions: one of the given distributions is selected with probability proportional to
	/// its weight, then drawn from. Distributions may share values, in which case the weights are combined.
	///
	/// # Errors
	/// If any weight is negative (or not finite), or the weights sum to zero (including when there are no entries) or
	/// to more than can be represented, [`Error::MalformedDistribution`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational, Drv};
	///
	/// // Roll a d4 one time in three, otherwise a d8
	/// let one = BigRational::from_integer(1.into());
	/// let two = BigRational::from_integer(2.into());
	/// let mixed = Drv::weighted_average([(one, &d(4)?), (two, &d(8)?)])?;
	/// assert_eq!(mixed.weight_of(&1), BigRational::new(1.into(), 6.into()));
	/// assert_eq!(mixed.weight_of(&8), BigRational::new(1.into(), 12.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn weighted_average<D>(entries: impl IntoIterator<Item = (P, D)>) -> Result<Self, Error>
	where
		D: Borrow<Self>,
	{
		let mut acc = Accumulator::new();
		let mut total = P::zero();

		for (weight, drv) in entries {
			if !weight.is_valid() {
				return Err(Error::MalformedDistribution("mixture weights must be finite and non-negative"));
			}
			if weight.is_zero() {
				continue;
			}

			for (value, prob) in &drv.borrow().entries {
				acc.add(value.clone(), weight.clone() * prob.clone());
			}
			total += weight;
		}

		if total.is_zero() {
			return Err(Error::MalformedDistribution("mixture weights must have a positive total"));
		}
		if !total.is_valid() {
			return Err(Error::MalformedDistribution("mixture weights must have a finite total"));
		}
		Ok(acc.finish_scaled(&total))
	}
}
