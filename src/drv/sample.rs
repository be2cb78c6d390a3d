//! Drawing concrete outcomes from distributions, and the sources of randomness used to do so.

use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Drv, Probability, Value};

/// Largest [`f64`] below one
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

impl<V: Value, P: Probability> Drv<V, P> {
	/// Draws one outcome, using `random` to produce a single fraction in the range `[0, 1)`.
	///
	/// Outcomes are walked in [`Self::support()`] order while accumulating their weights, and the first outcome whose
	/// cumulative weight is strictly greater than the fraction is the one drawn. If rounding keeps the cumulative weight
	/// from ever exceeding the fraction, the last outcome is drawn.
	///
	/// # Examples
	/// ```
	/// use omnidice::d;
	///
	/// let d6 = d(6)?;
	/// assert_eq!(d6.roll(|| 0.0), 1);
	/// assert_eq!(d6.roll(|| 0.5), 4);
	/// assert_eq!(d6.roll(|| 0.999), 6);
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	#[expect(clippy::expect_used, reason = "Distributions always have at least one outcome")]
	pub fn roll(&self, mut random: impl FnMut() -> f64) -> V {
		let draw = random();
		let ((last, _), rest) = self.entries.split_last().expect("distribution has no outcomes");

		let mut cumulative = P::zero();
		for (value, weight) in rest {
			cumulative += weight.clone();
			if cumulative.exceeds(draw) {
				return value.clone();
			}
		}

		last.clone()
	}

	/// Draws one outcome using a [`Source`] of randomness. See [`Self::roll()`] for how the outcome is selected.
	///
	/// # Examples
	/// ```
	/// use omnidice::{d, drv::sample::Val};
	///
	/// let d20 = d(20)?;
	/// assert_eq!(d20.sample(&mut Val(0.5)), 11);
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn sample(&self, source: &mut impl Source) -> V {
		self.roll(|| source.unit())
	}
}

/// Produces random fractions for drawing outcomes from distributions.
pub trait Source {
	/// Produces a fraction in the range `[0, 1)`.
	#[must_use]
	fn unit(&mut self) -> f64;
}

/// Generates fractions with [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand source
/// ```
/// use omnidice::{d, drv::sample::FastRand};
///
/// let mut source = FastRand::default();
///
/// let d6 = d(6)?;
/// let _ = d6.sample(&mut source);
/// let _ = d6.sample(&mut source);
/// # Ok::<(), omnidice::Error>(())
/// ```
///
/// ## Custom fastrand source
/// ```
/// use omnidice::{d, drv::sample::FastRand};
/// use fastrand::Rng;
///
/// let rng = Rng::with_seed(0x750c38d574400);
/// let mut source = FastRand::new(rng);
///
/// let d6 = d(6)?;
/// let _ = d6.sample(&mut source);
/// # Ok::<(), omnidice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand source that uses the given RNG instance.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand source that uses a pre-seeded RNG instance.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Source for FastRand {
	#[inline]
	fn unit(&mut self) -> f64 {
		self.0.f64()
	}
}

/// Generates the same fraction every time, clamped into `[0, 1)`.
///
/// # Examples
/// ```
/// use omnidice::{d, drv::sample::Val};
///
/// let d6 = d(6)?;
/// assert_eq!(d6.sample(&mut Val(0.0)), 1);
/// assert_eq!(d6.sample(&mut Val(1.0)), 6);
/// # Ok::<(), omnidice::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub f64);

impl Source for Val {
	#[inline]
	fn unit(&mut self) -> f64 {
		self.0.clamp(0.0, ONE_BELOW)
	}
}

/// Generates fractions from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use omnidice::{d, drv::sample::Iter};
///
/// let d4 = d(4)?;
/// let mut source = Iter::new([0.1, 0.3, 0.6, 0.9]);
/// let rolls = (0..4).map(|_| d4.sample(&mut source)).collect::<Vec<_>>();
/// assert_eq!(rolls, vec![1, 2, 3, 4]);
/// assert!(!source.can_draw());
/// # Ok::<(), omnidice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = f64>>(Peekable<I>);

impl<I: Iterator<Item = f64>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_draw(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new source that uses the given iterator to provide fractions.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = f64>> Source for Iter<I> {
	/// Produces the next fraction from the iterator.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_draw() is expected"
	)]
	fn unit(&mut self) -> f64 {
		self.0.next().expect("iterator is finished")
	}
}
