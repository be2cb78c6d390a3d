#[cfg(feature = "fastrand")]
use crate::{drv::sample::FastRand, Source};
use crate::{
	d,
	drv::{
		sample::{Iter, Val},
		Accumulator,
	},
	Drv,
};

#[test]
fn fractions_select_outcomes() {
	let d6 = d(6).unwrap();
	for side in 1..=6_i32 {
		let fraction = (f64::from(side) - 0.5) / 6.0;
		assert_eq!(d6.roll(|| fraction), i64::from(side));
		assert_eq!(d6.to_approximate().roll(|| fraction), i64::from(side));
	}
}

#[test]
fn fixed_sources() {
	let d4 = d(4).unwrap();
	assert_eq!(d4.sample(&mut Val(0.0)), 1);
	assert_eq!(d4.sample(&mut Val(0.3)), 2);
	assert_eq!(d4.sample(&mut Val(1.0)), 4);
	assert_eq!(d4.sample(&mut Val(-1.0)), 1);
	assert_eq!(d4.sample(&mut Val(7.5)), 4);
}

#[test]
fn iterator_sources() {
	let coin: Drv<&str> = Drv::uniform(["heads", "tails"]).unwrap();
	let mut source = Iter::new([0.9, 0.1, 0.75]);
	assert!(source.can_draw());
	assert_eq!(coin.sample(&mut source), "tails");
	assert_eq!(coin.sample(&mut source), "heads");
	assert_eq!(coin.sample(&mut source), "tails");
	assert!(!source.can_draw());
}

#[test]
fn last_outcome_absorbs_shortfall() {
	let mut acc = Accumulator::new();
	acc.add(1, 0.25);
	acc.add(2, 0.25);
	let short = acc.finish();
	assert_eq!(short.roll(|| 0.2), 1);
	assert_eq!(short.roll(|| 0.4), 2);
	assert_eq!(short.roll(|| 0.9), 2);
}

#[test]
#[cfg(feature = "fastrand")]
fn point_always_rolls_its_value() {
	let point: Drv<i64> = Drv::point(42);
	let mut source = FastRand::with_seed(0x750c_38d5_7440);
	for _ in 0..100 {
		assert_eq!(point.sample(&mut source), 42);
	}
}

#[test]
#[cfg(feature = "fastrand")]
fn seeded_sources_repeat() {
	let d20 = d(20).unwrap();
	let mut first = FastRand::with_seed(7);
	let mut second = FastRand::with_seed(7);
	for _ in 0..100 {
		assert_eq!(d20.sample(&mut first), d20.sample(&mut second));
	}
}

#[test]
#[cfg(feature = "fastrand")]
fn all_sides_occur() {
	let d6 = d(6).unwrap();
	let mut source = FastRand::with_seed(0x1234_5678);
	let mut counts = [0_u32; 6];

	for _ in 0..6000 {
		let rolled = d6.sample(&mut source);
		assert!((1..=6).contains(&rolled));
		let slot = usize::try_from(rolled - 1).unwrap();
		counts[slot] += 1;
	}

	for count in counts {
		assert!(count > 800, "{counts:?}");
	}
}

#[test]
#[cfg(feature = "fastrand")]
fn fastrand_fractions_in_range() {
	let mut source = FastRand::default();
	for _ in 0..1000 {
		let fraction = source.unit();
		assert!((0.0..1.0).contains(&fraction));
	}
}

#[test]
fn sampling_comparisons() {
	let d6 = d(6).unwrap();
	let beats = d6.greater(&Drv::constant(3));
	assert!(beats.sample(&mut Val(0.9)));
	assert!(!beats.sample(&mut Val(0.1)));
}
