use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::ratio;
use crate::{d, Drv, Error};

#[test]
fn matches_naive_sums() {
	let d6 = d(6).unwrap();
	for count in 0..=6 {
		let mut naive: Drv<i64> = Drv::point(0);
		for _ in 0..count {
			naive = &naive + &d6;
		}
		assert!(d6.repeat_sum(count).is_same(&naive), "{count} @ d6");
	}
}

#[test]
fn zero_draws() {
	let d6 = d(6).unwrap();
	let none = d6.repeat_sum(0);
	assert!(none.is_same(&Drv::point(0)));
	assert_eq!(none.to_string(), "(0 @ d6)");

	let best = d6.repeat(0, i64::MIN, |&a, &b| a.max(b));
	assert!(best.is_same(&Drv::point(i64::MIN)));
}

#[test]
fn single_draw() {
	let d6 = d(6).unwrap();
	let one = d6.repeat_sum(1);
	assert!(one.is_same(&d6));
	assert_eq!(one.to_string(), "(1 @ d6)");
	assert!(d6.repeat(1, 0, |&a, &b| a.max(b)).is_same(&d6));
}

#[test]
fn other_operators() {
	let d6 = d(6).unwrap();
	let best_of_two = d6.repeat(2, 0, |&a, &b| a.max(b));
	assert!(best_of_two.is_same(&d6.combine(&d6, |&a, &b| a.max(b))));

	let worst_of_five = d6.repeat(5, i64::MAX, |&a, &b| a.min(b));
	assert_eq!(worst_of_five.weight_of(&6), ratio(1, 7776));
	assert!(worst_of_five.repeat(3, i64::MAX, |&a, &b| a.min(b)).is_same(&d6.repeat(15, i64::MAX, |&a, &b| a.min(b))));
}

#[test]
fn hundred_d6() {
	let sum = d(6).unwrap().repeat_sum(100);
	assert_eq!(sum.support_size(), 501);
	assert!(sum.is_normalized());

	let lowest = BigRational::new(BigInt::from(1), BigInt::from(6).pow(100));
	assert_eq!(sum.weight_of(&100), lowest);
	assert_eq!(sum.weight_of(&600), lowest);

	let mean = sum
		.support()
		.fold(BigRational::zero(), |mean, (&value, weight)| {
			mean + BigRational::from_integer(BigInt::from(value)) * weight
		});
	assert_eq!(mean, ratio(350, 1));
}

#[test]
fn random_draw_count() {
	let d2 = d(2).unwrap();
	let total = d2.repeat_sum_by(&d2).unwrap();
	assert_eq!(total.weight_of(&1), ratio(1, 4));
	assert_eq!(total.weight_of(&2), ratio(3, 8));
	assert_eq!(total.weight_of(&3), ratio(1, 4));
	assert_eq!(total.weight_of(&4), ratio(1, 8));
	assert_eq!(total.to_string(), "(d2 @ d2)");
}

#[test]
fn random_draw_count_matches_mixture() {
	let d6 = d(6).unwrap();
	let count: Drv<i64> = Drv::from_weights([(3, ratio(1, 1)), (0, ratio(1, 1)), (1, ratio(2, 1))]).unwrap();
	let total = d6.repeat_sum_by(&count).unwrap();

	let expected = Drv::weighted_average([
		(ratio(1, 4), d6.repeat_sum(3)),
		(ratio(1, 4), Drv::point(0)),
		(ratio(1, 2), d6.clone()),
	])
	.unwrap();
	assert!(total.is_same(&expected));
	assert!(total.is_normalized());
}

#[test]
fn constant_draw_count() {
	let d4 = d(4).unwrap();
	let total = d4.repeat_sum_by(&Drv::constant(3)).unwrap();
	assert!(total.is_same(&d4.repeat_sum(3)));
	assert_eq!(total.to_string(), "(3 @ d4)");
}

#[test]
fn negative_draw_count() {
	let d6 = d(6).unwrap();
	let count: Drv<i64> = Drv::uniform([-1, 1]).unwrap();
	assert_eq!(
		d6.repeat_sum_by(&count).unwrap_err(),
		Error::OperatorDomain {
			left: "-1".to_owned(),
			right: "d6".to_owned(),
			reason: "number of draws must be a non-negative integer".to_owned(),
		}
	);
}

#[test]
fn approximate_repeat() {
	let d6 = d(6).unwrap();
	let exact = d6.repeat_sum(10);
	let approximate = d6.to_approximate().repeat_sum(10);
	assert!(approximate.is_close(&exact));
	assert!(approximate.is_normalized());
	assert_eq!(approximate.to_string(), "(10 @ d6.to_approximate())");
}
