#![feature(test)]

extern crate test;

use test::Bencher;

use omnidice::{d, drv::sample::FastRand, Dice, Drv};

#[bench]
fn sum_2d6(b: &mut Bencher) {
	let d6 = d(6).unwrap();
	b.iter(|| &d6 + &d6);
}

#[bench]
fn sum_100d6(b: &mut Bencher) {
	let d6 = d(6).unwrap();
	b.iter(|| d6.repeat_sum(100));
}

#[bench]
fn sum_100d6_approximate(b: &mut Bencher) {
	let d6 = d(6).unwrap().to_approximate();
	b.iter(|| d6.repeat_sum(100));
}

#[bench]
fn sum_d10_at_d6(b: &mut Bencher) {
	let d6 = d(6).unwrap();
	let d10 = d(10).unwrap();
	b.iter(|| d6.repeat_sum_by(&d10).unwrap());
}

#[bench]
fn compare_4d6_vs_3d8(b: &mut Bencher) {
	let four_d6 = Dice::new(4, 6).distribution().unwrap();
	let three_d8 = Dice::new(3, 8).distribution().unwrap();
	b.iter(|| four_d6.greater(&three_d8).p());
}

#[bench]
fn explode_d6(b: &mut Bencher) {
	let d6 = d(6).unwrap();
	b.iter(|| d6.explode());
}

#[bench]
fn condition_3d6(b: &mut Bencher) {
	let three_d6 = d(6).unwrap().repeat_sum(3);
	b.iter(|| three_d6.given(|&x| x >= 12).unwrap());
}

#[bench]
fn sample_3d6(b: &mut Bencher) {
	let three_d6 = d(6).unwrap().repeat_sum(3);
	let mut source = FastRand::default();
	b.iter(|| three_d6.sample(&mut source));
}

#[bench]
fn display_expression(b: &mut Bencher) {
	let d6 = d(6).unwrap();
	let expr = &(&d6.repeat_sum(2) * &(&d6 + &d6)) - &(&d6 - &Drv::constant(5));
	b.iter(|| expr.to_string());
}
