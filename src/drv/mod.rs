//! All functionality for creating discrete random variables, combining them, and working with their distributions.
//!
//! This is the home of the distribution "primitive", [`Drv`]. Everything else in the crate is built from the handful of
//! operations defined here and in the submodules: pairwise combination ([`Drv::combine()`]), outcome mapping
//! ([`Drv::map_outcomes()`]), repeated combination ([`Drv::repeat()`]), conditioning ([`Drv::given()`]), mixing
//! ([`Drv::weighted_average()`]) and sampling ([`Drv::roll()`]).

pub mod combine;
pub mod condition;
pub mod map;
pub mod prob;
pub mod repeat;
pub mod sample;

use alloc::{
	format,
	string::{String, ToString},
	sync::Arc,
	vec::Vec,
};
use core::{fmt, hash::Hash, iter};
use std::collections::HashMap;

use num_rational::BigRational;

pub use self::{map::Outcome, prob::Probability, sample::Source};
use crate::expr::Expr;

/// Capability required of every outcome value: it must be comparable for equality, hashable, and cheap enough to copy
/// into new distributions. `Debug` is used to identify outcomes in error messages.
///
/// This is implemented automatically for every type that meets those requirements.
pub trait Value: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Value for T {}

/// A discrete random variable: an immutable mapping from outcome values to the probability of each occurring.
///
/// Every stored weight is positive, the weights sum to one (exactly for [`BigRational`] weights, within
/// [`prob::TOLERANCE`] for [`f64`] weights), and no value appears more than once. A `Drv` is never empty.
///
/// Comparison operations such as [`Drv::equal()`] and [`Drv::less()`] produce new distributions over [`bool`] rather
/// than a plain `bool`, so `Drv` intentionally implements neither [`PartialEq`] nor [`Hash`] and can't be used as a key:
///
/// ```compile_fail
/// use std::collections::HashSet;
/// use omnidice::d;
///
/// let mut set = HashSet::new();
/// set.insert(d(6)?);
/// # Ok::<(), omnidice::Error>(())
/// ```
///
/// Nor can one be used directly as a condition:
///
/// ```compile_fail
/// use omnidice::d;
///
/// let d6 = d(6)?;
/// if d6.greater(&d6) {}
/// # Ok::<(), omnidice::Error>(())
/// ```
///
/// # Examples
/// ```
/// use omnidice::{BigRational, Drv};
///
/// let coin: Drv<&str> = Drv::uniform(["heads", "tails"])?;
/// assert_eq!(coin.weight_of(&"heads"), BigRational::new(1.into(), 2.into()));
/// assert_eq!(coin.weight_of(&"edge"), BigRational::from_integer(0.into()));
/// # Ok::<(), omnidice::Error>(())
/// ```
#[derive(Clone)]
pub struct Drv<V, P = BigRational> {
	/// Outcomes and their weights, in order of first insertion
	entries: Vec<(V, P)>,

	/// Position of each outcome within `entries`
	index: HashMap<V, usize>,

	/// Display-only description of how the distribution was built
	expr: Option<Arc<Expr>>,
}

impl<V: Value, P: Probability> Drv<V, P> {
	/// Creates a distribution from `(value, weight)` pairs.
	///
	/// Weights don't need to sum to one: they are normalized by dividing each by their total. Pairs with a zero weight
	/// are left out, and pairs that share a value have their weights summed.
	///
	/// # Errors
	/// If any weight is negative (or not finite), or the total weight is zero (including when there are no pairs at
	/// all) or too large to represent, [`Error::MalformedDistribution`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{BigRational, Drv};
	///
	/// let loaded = Drv::from_weights([(1, BigRational::from_integer(1.into())), (2, BigRational::from_integer(3.into()))])?;
	/// assert_eq!(loaded.weight_of(&2), BigRational::new(3.into(), 4.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn from_weights(pairs: impl IntoIterator<Item = (V, P)>) -> Result<Self, Error> {
		let mut acc = Accumulator::new();
		let mut total = P::zero();

		for (value, weight) in pairs {
			if !weight.is_valid() {
				return Err(Error::MalformedDistribution("weights must be finite and non-negative"));
			}
			if weight.is_zero() {
				continue;
			}
			total += weight.clone();
			acc.add(value, weight);
		}

		if total.is_zero() {
			return Err(Error::MalformedDistribution("total weight must be positive"));
		}
		if !total.is_valid() {
			return Err(Error::MalformedDistribution("total weight must be finite"));
		}
		Ok(acc.finish_scaled(&total))
	}

	/// Creates a distribution where every given value is equally likely (repeated values accumulate weight).
	///
	/// # Errors
	/// If no values are given, [`Error::MalformedDistribution`] is returned.
	pub fn uniform(values: impl IntoIterator<Item = V>) -> Result<Self, Error> {
		Self::from_weights(values.into_iter().map(|value| (value, P::one())))
	}

	/// Creates a distribution that always has the given value.
	#[must_use]
	pub fn point(value: V) -> Self {
		let mut index = HashMap::with_capacity(1);
		index.insert(value.clone(), 0);
		Self {
			entries: alloc::vec![(value, P::one())],
			index,
			expr: None,
		}
	}

	/// Creates a distribution that always has the given value, named after the value itself when displayed.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, Drv};
	///
	/// let bonus = &d(6)? + &Drv::constant(2);
	/// assert_eq!(bonus.to_string(), "(d6 + 2)");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn constant(value: V) -> Self
	where
		V: fmt::Display,
	{
		let name = value.to_string();
		Self::point(value).named(name)
	}

	/// Gets the weight of a value, which is zero if the value isn't a possible outcome.
	#[must_use]
	pub fn weight_of(&self, value: &V) -> P {
		self.index
			.get(value)
			.and_then(|&slot| self.entries.get(slot))
			.map_or_else(P::zero, |(_, weight)| weight.clone())
	}

	/// Iterates over every possible value and its weight. The order is fixed for a given distribution (the order in
	/// which outcomes were first produced), and the iterator can be cloned to restart it.
	pub fn support(&self) -> impl Iterator<Item = (&V, &P)> + Clone + '_ {
		self.entries.iter().map(|(value, weight)| (value, weight))
	}

	/// Iterates over every possible value, in the same order as [`Self::support()`].
	pub fn values(&self) -> impl Iterator<Item = &V> + Clone + '_ {
		self.entries.iter().map(|(value, _)| value)
	}

	/// Gets the number of possible values.
	#[must_use]
	#[inline]
	pub fn support_size(&self) -> usize {
		self.entries.len()
	}

	/// Lists every possible value and its weight, sorted by value.
	#[must_use]
	pub fn sorted_support(&self) -> Vec<(&V, &P)>
	where
		V: Ord,
	{
		let mut sorted = self.support().collect::<Vec<_>>();
		sorted.sort_by(|a, b| a.0.cmp(b.0));
		sorted
	}

	/// Checks whether the weights sum to one (exactly for [`BigRational`] weights, within [`prob::TOLERANCE`] for
	/// [`f64`] weights). This always holds for distributions built by this crate.
	#[must_use]
	pub fn is_normalized(&self) -> bool {
		self.entries
			.iter()
			.fold(P::zero(), |total, (_, weight)| total + weight.clone())
			.is_unit()
	}

	/// Copies the distribution into a map of values to weights.
	#[must_use]
	pub fn to_map(&self) -> HashMap<V, P> {
		self.entries.iter().cloned().collect()
	}

	/// Checks whether both distributions have exactly the same values with exactly the same weights, regardless of how
	/// either was built.
	#[must_use]
	pub fn is_same(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len()
			&& self
				.entries
				.iter()
				.all(|(value, weight)| other.index.contains_key(value) && other.weight_of(value) == *weight)
	}

	/// Checks whether both distributions have the same values with approximately the same weights, using a relative
	/// tolerance of `1e-9`. The weights may use different representations.
	///
	/// # Examples
	/// ```
	/// use omnidice::d;
	///
	/// let two_d6 = d(6)?.repeat_sum(2);
	/// assert!(two_d6.to_approximate().is_close(&two_d6));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn is_close<Q: Probability>(&self, other: &Drv<V, Q>) -> bool {
		self.is_close_within(other, 1e-9, 0.0)
	}

	/// Checks whether both distributions have the same values with weights that differ by no more than the larger of
	/// `rel_tol` (relative to the larger weight) and `abs_tol`.
	#[must_use]
	pub fn is_close_within<Q: Probability>(&self, other: &Drv<V, Q>, rel_tol: f64, abs_tol: f64) -> bool {
		self.entries.len() == other.entries.len()
			&& self.entries.iter().all(|(value, weight)| {
				other.index.contains_key(value)
					&& prob::is_close(weight.to_f64(), other.weight_of(value).to_f64(), rel_tol, abs_tol)
			})
	}

	/// Creates a new distribution with every weight converted to floating-point. This distribution is left untouched.
	#[must_use]
	pub fn to_approximate(&self) -> Drv<V, f64> {
		let mut acc = Accumulator::with_capacity(self.entries.len());
		for (value, weight) in &self.entries {
			acc.add(value.clone(), weight.to_f64());
		}
		acc.finish()
			.with_expr(Expr::postfix(self.expr.as_ref(), ".to_approximate()"))
	}

	/// Builds a table of values and their weights (one per line, tab-separated, sorted by value, with a header line).
	/// This is intended for eyeballing small distributions.
	///
	/// # Examples
	/// ```
	/// use omnidice::d;
	///
	/// assert_eq!(
	/// 	d(4)?.to_table(false),
	/// 	"value\tprobability\n1\t1/4\n2\t1/4\n3\t1/4\n4\t1/4"
	/// );
	/// assert_eq!(d(2)?.to_table(true), "value\tprobability\n1\t0.5\n2\t0.5");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn to_table(&self, as_float: bool) -> String
	where
		V: Ord + fmt::Display,
	{
		let rows = self.sorted_support().into_iter().map(|(value, weight)| {
			if as_float {
				format!("{value}\t{}", weight.to_f64())
			} else {
				format!("{value}\t{weight}")
			}
		});
		iter::once(String::from("value\tprobability"))
			.chain(rows)
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Gets the expression describing how the distribution was built, if it is known.
	#[must_use]
	#[inline]
	pub fn expr(&self) -> Option<&Expr> {
		self.expr.as_deref()
	}

	/// Names the distribution, replacing any expression it had. The name is only used for display.
	#[must_use]
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.expr = Some(Arc::new(Expr::Atom(name.into())));
		self
	}

	/// Removes the distribution's expression, so that it displays as its raw weights.
	#[must_use]
	pub fn unnamed(mut self) -> Self {
		self.expr = None;
		self
	}

	/// Replaces the distribution's expression.
	#[must_use]
	pub(crate) fn with_expr(mut self, expr: Option<Expr>) -> Self {
		self.expr = expr.map(Arc::new);
		self
	}
}

impl<V: Value> Drv<V, f64> {
	/// Creates a new distribution with every weight converted to the exact rational value of its floating-point
	/// representation, renormalized so that the weights sum to exactly one.
	///
	/// # Errors
	/// This only fails if a weight can't be represented exactly, which never happens for a well-formed distribution.
	pub fn to_exact(&self) -> Result<Drv<V, BigRational>, Error> {
		let pairs = self
			.entries
			.iter()
			.map(|(value, weight)| {
				BigRational::from_float(*weight)
					.map(|weight| (value.clone(), weight))
					.ok_or(Error::MalformedDistribution("weights must be finite"))
			})
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Drv::from_weights(pairs)?.with_expr(Expr::postfix(self.expr.as_ref(), ".to_exact()")))
	}
}

impl<P: Probability> Drv<bool, P> {
	/// Gets the probability of the outcome being `true`.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, BigRational};
	///
	/// let d6 = d(6)?;
	/// assert_eq!(d6.greater(&d6).p(), BigRational::new(15.into(), 36.into()));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	#[inline]
	pub fn p(&self) -> P {
		self.weight_of(&true)
	}
}

impl<V: Value, P: Probability> TryFrom<&Drv<V, P>> for bool {
	type Error = Error;

	/// Always fails: a distribution has no single truth value. Use [`Drv::p()`] to get the probability of `true`.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, Error};
	///
	/// let d6 = d(6)?;
	/// assert!(matches!(bool::try_from(&d6.equal(&d6)), Err(Error::AmbiguousTruthValue)));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	fn try_from(_drv: &Drv<V, P>) -> Result<Self, Self::Error> {
		Err(Error::AmbiguousTruthValue)
	}
}

impl<V: fmt::Debug, P: fmt::Debug> fmt::Debug for Drv<V, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Drv")
			.field("entries", &self.entries)
			.field("expr", &self.expr)
			.finish()
	}
}

impl<V: fmt::Debug, P: fmt::Display> fmt::Display for Drv<V, P> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// If the expression the distribution was built from is known, it is displayed (in parentheses when it is made up
	/// of operations). Otherwise, the values and weights are listed.
	///
	/// # Examples
	/// ```
	/// use omnidice::d;
	///
	/// let d6 = d(6)?;
	/// assert_eq!((&d6 + &d6).to_string(), "(d6 + d6)");
	/// assert_eq!(d(2)?.map(|x| x + 1).to_string(), "Drv({2: 1/2, 3: 1/2})");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(expr) = &self.expr {
			return write!(f, "{}", expr.bracketed());
		}

		write!(
			f,
			"Drv({{{}}})",
			self.entries
				.iter()
				.map(|(value, weight)| format!("{value:?}: {weight}"))
				.collect::<Vec<_>>()
				.join(", ")
		)
	}
}

/// Collects weighted outcomes into a new [`Drv`], summing the weights of outcomes with equal values as they arrive.
#[derive(Debug)]
pub(crate) struct Accumulator<V, P> {
	/// Outcomes and their weights, in order of first insertion
	entries: Vec<(V, P)>,

	/// Position of each outcome within `entries`
	index: HashMap<V, usize>,
}

impl<V: Value, P: Probability> Accumulator<V, P> {
	/// Creates an empty accumulator.
	#[must_use]
	pub(crate) fn new() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Creates an empty accumulator with room for a number of distinct outcomes.
	#[must_use]
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: Vec::with_capacity(capacity),
			index: HashMap::with_capacity(capacity),
		}
	}

	/// Adds weight to an outcome.
	pub(crate) fn add(&mut self, value: V, weight: P) {
		if let Some(&slot) = self.index.get(&value) {
			if let Some((_, existing)) = self.entries.get_mut(slot) {
				*existing += weight;
			}
		} else {
			self.index.insert(value.clone(), self.entries.len());
			self.entries.push((value, weight));
		}
	}

	/// Finishes the distribution as-is. Outcomes whose weight ended up as zero (from floating-point underflow) are
	/// left out.
	#[must_use]
	pub(crate) fn finish(self) -> Drv<V, P> {
		if self.entries.iter().all(|(_, weight)| !weight.is_zero()) {
			return Drv {
				entries: self.entries,
				index: self.index,
				expr: None,
			};
		}

		let entries = self
			.entries
			.into_iter()
			.filter(|(_, weight)| !weight.is_zero())
			.collect::<Vec<_>>();
		let index = entries
			.iter()
			.enumerate()
			.map(|(slot, (value, _))| (value.clone(), slot))
			.collect();
		Drv {
			entries,
			index,
			expr: None,
		}
	}

	/// Finishes the distribution after dividing every weight by `total`.
	#[must_use]
	pub(crate) fn finish_scaled(mut self, total: &P) -> Drv<V, P> {
		if !total.is_one() {
			for (_, weight) in &mut self.entries {
				*weight = weight.clone() / total.clone();
			}
		}
		self.finish()
	}
}

/// An error resulting from a distribution operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The weights given for a distribution (or a mixture of distributions) can't form one.
	///
	/// # Examples
	/// ```
	/// use omnidice::{Drv, Error};
	///
	/// let result = Drv::from_weights([(1, -0.5), (2, 1.5)]);
	/// assert!(matches!(result, Err(Error::MalformedDistribution(..))));
	/// ```
	#[error("malformed distribution: {0}")]
	MalformedDistribution(&'static str),

	/// The operator used to combine distributions failed for one pair of outcomes.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, Drv, Error};
	///
	/// let result = d(6)?.checked_div(&Drv::uniform([0, 1])?);
	/// assert!(matches!(result, Err(Error::OperatorDomain { .. })));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[error("operator failed for ({left}, {right}): {reason}")]
	OperatorDomain {
		/// Left-hand outcome the operator failed on
		left: String,

		/// Right-hand outcome the operator failed on
		right: String,

		/// Description of the failure
		reason: String,
	},

	/// Conditioning on a predicate that no outcome satisfies.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, Error};
	///
	/// let result = d(6)?.given(|&x| x > 6);
	/// assert!(matches!(result, Err(Error::ZeroProbabilityCondition)));
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[error("condition has zero probability")]
	ZeroProbabilityCondition,

	/// A distribution was used where a single truth value is needed.
	#[error("the truth value of a random variable is ambiguous")]
	AmbiguousTruthValue,
}
