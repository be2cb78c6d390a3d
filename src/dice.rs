//! Constructors for the distributions of ordinary dice.
//!
//! These are the usual starting points for building more complex distributions. For the operations that can be
//! performed on them, see [`Drv`].

use alloc::format;
use core::fmt;

use crate::drv::{Drv, Error};

/// Creates the distribution of a single fair die with the given number of sides, numbered from 1. The distribution is
/// named `d{sides}` when displayed.
///
/// # Errors
/// If `sides` is zero, [`Error::MalformedDistribution`] is returned.
///
/// # Examples
/// ```
/// use omnidice::{d, BigRational};
///
/// let d6 = d(6)?;
/// assert_eq!(d6.weight_of(&3), BigRational::new(1.into(), 6.into()));
/// assert_eq!(d6.to_string(), "d6");
/// # Ok::<(), omnidice::Error>(())
/// ```
pub fn d(sides: u16) -> Result<Drv<i64>, Error> {
	if sides == 0 {
		return Err(Error::MalformedDistribution("dice must have at least one side"));
	}
	Ok(Drv::uniform(1..=i64::from(sides))?.named(format!("d{sides}")))
}

/// A set of identical fair dice whose values are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Dice {
	/// Number of dice to roll
	pub count: u16,

	/// Number of sides for each die
	pub sides: u16,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u16, sides: u16) -> Self {
		Self { count, sides }
	}

	/// Creates the distribution of the total of the dice.
	///
	/// # Errors
	/// If the dice have zero sides, [`Error::MalformedDistribution`] is returned.
	///
	/// # Examples
	/// ```
	/// use omnidice::{BigRational, Dice};
	///
	/// let totals = Dice::new(3, 6).distribution()?;
	/// assert_eq!(totals.weight_of(&18), BigRational::new(1.into(), 216.into()));
	/// assert_eq!(totals.to_string(), "(3 @ d6)");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	pub fn distribution(&self) -> Result<Drv<i64>, Error> {
		Ok(d(self.sides)?.repeat_sum(usize::from(self.count)))
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}
