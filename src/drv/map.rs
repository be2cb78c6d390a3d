//! Mapping the outcomes of a distribution to new values or to whole new distributions.

use alloc::format;
use core::ops::{Add, Neg};

use num_rational::BigRational;

use super::{Accumulator, Drv, Probability, Value};
use crate::expr::Expr;

/// Number of rerolls allowed by [`Drv::explode()`]
pub const DEFAULT_REROLLS: u32 = 50;

/// Result of mapping a single outcome with [`Drv::map_outcomes()`]: either a plain value, or a distribution to draw
/// the final value from.
#[derive(Debug, Clone)]
#[expect(clippy::exhaustive_enums, reason = "An outcome is either a value or a distribution, nothing else")]
pub enum Outcome<V, P = BigRational> {
	/// The outcome maps to exactly this value
	Value(V),

	/// The outcome maps to a draw from this distribution
	Drv(Drv<V, P>),
}

impl<V: Value, P: Probability> Drv<V, P> {
	/// Creates the distribution of applying `f` to a draw from this distribution, and then (if `f` gave a distribution
	/// rather than a plain value) drawing from the result.
	///
	/// The weight of a source outcome is split across the distribution it maps to, in proportion to that
	/// distribution's weights. Values reached from more than one source outcome have their weights summed.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, drv::Outcome, BigRational};
	///
	/// // Reroll 1s once
	/// let d6 = d(6)?;
	/// let rerolled = d6.map_outcomes(|&x| if x == 1 { Outcome::Drv(d6.clone()) } else { Outcome::Value(x) });
	/// assert_eq!(rerolled.weight_of(&1), BigRational::new(1.into(), 36.into()));
	/// assert_eq!(rerolled.weight_of(&6), BigRational::new(7.into(), 36.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn map_outcomes<W: Value>(&self, mut f: impl FnMut(&V) -> Outcome<W, P>) -> Drv<W, P> {
		let mut acc = Accumulator::with_capacity(self.entries.len());
		for (value, weight) in &self.entries {
			match f(value) {
				Outcome::Value(mapped) => acc.add(mapped, weight.clone()),
				Outcome::Drv(drv) => {
					for (mapped, mapped_weight) in drv.entries {
						acc.add(mapped, weight.clone() * mapped_weight);
					}
				}
			}
		}
		acc.finish()
	}

	/// Creates the distribution of applying `f` to a draw from this distribution. If `f` maps several values to the same
	/// result, their weights are summed.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let parity = d(6)?.map(|x| x % 2 == 0);
	/// assert_eq!(parity.p(), BigRational::new(1.into(), 2.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn map<W: Value>(&self, mut f: impl FnMut(&V) -> W) -> Drv<W, P> {
		self.map_outcomes(|value| Outcome::Value(f(value)))
	}

	/// Creates the distribution of drawing from this distribution, then drawing from the distribution `f` gives for
	/// that value.
	#[must_use]
	pub fn bind<W: Value>(&self, mut f: impl FnMut(&V) -> Drv<W, P>) -> Drv<W, P> {
		self.map_outcomes(|value| Outcome::Drv(f(value)))
	}

	/// Creates the distribution of an "exploding" version of this die: whenever the highest possible value is drawn,
	/// draw again and add the new value to the total. At most [`DEFAULT_REROLLS`] extra draws are made.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational, Drv};
	///
	/// let exploding = d(6)?.explode();
	/// assert_eq!(exploding.greater(&Drv::constant(6)).p(), BigRational::new(1.into(), 6.into()));
	/// assert_eq!(exploding.greater(&Drv::constant(12)).p(), BigRational::new(1.into(), 36.into()));
	/// assert_eq!(exploding.to_string(), "d6.explode()");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn explode(&self) -> Self
	where
		V: Ord + Add<Output = V>,
	{
		self.exploded(DEFAULT_REROLLS)
			.with_expr(Expr::postfix(self.expr.as_ref(), ".explode()"))
	}

	/// Same as [`Self::explode()`], with a specific limit on the number of extra draws. The chance of exploding past
	/// the limit is given to the total of all-maximum draws.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational, Drv};
	///
	/// let exploding = d(6)?.explode_limited(1);
	/// assert_eq!(exploding.weight_of(&12), BigRational::new(1.into(), 36.into()));
	/// assert_eq!(exploding.greater(&Drv::constant(12)).p(), BigRational::from_integer(0.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn explode_limited(&self, rerolls: u32) -> Self
	where
		V: Ord + Add<Output = V>,
	{
		self.exploded(rerolls)
			.with_expr(Expr::postfix(self.expr.as_ref(), format!(".explode({rerolls})")))
	}

	/// Builds the exploded distribution, without any expression.
	fn exploded(&self, rerolls: u32) -> Self
	where
		V: Ord + Add<Output = V>,
	{
		let Some((max_value, max_weight)) = self.entries.iter().max_by(|a, b| a.0.cmp(&b.0)) else {
			return self.clone();
		};

		let mut acc = Accumulator::new();
		let mut offset: Option<V> = None;
		let mut scale = P::one();

		for _ in 0..=rerolls {
			for (value, weight) in self.entries.iter().filter(|(value, _)| value != max_value) {
				let total = match &offset {
					Some(offset) => offset.clone() + value.clone(),
					None => value.clone(),
				};
				acc.add(total, weight.clone() * scale.clone());
			}

			offset = Some(match offset {
				Some(offset) => offset + max_value.clone(),
				None => max_value.clone(),
			});
			scale = scale * max_weight.clone();
		}

		if let Some(offset) = offset {
			acc.add(offset, scale);
		}
		acc.finish()
	}
}

impl<V, P> Neg for &Drv<V, P>
where
	V: Value + Neg<Output = V>,
	P: Probability,
{
	type Output = Drv<V, P>;

	/// Creates the distribution of the negated values of this distribution.
	fn neg(self) -> Self::Output {
		self.map(|value| -value.clone())
			.with_expr(Expr::neg(self.expr.as_ref()))
	}
}

impl<V, P> Neg for Drv<V, P>
where
	V: Value + Neg<Output = V>,
	P: Probability,
{
	type Output = Self;

	#[inline]
	fn neg(self) -> Self::Output {
		-&self
	}
}
