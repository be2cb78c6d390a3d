use std::sync::Arc;

use crate::{
	d,
	expr::{BinOp, Expr, OpType},
	Drv,
};

#[test]
fn named_dice() {
	let d6 = d(6).unwrap();
	assert_eq!(d6.to_string(), "d6");
	assert_eq!(d(783).unwrap().to_string(), "d783");
	assert_eq!((&d6 + &Drv::constant(1)).to_string(), "(d6 + 1)");
	assert_eq!((&d6 + &d6).to_string(), "(d6 + d6)");
	assert_eq!(d6.repeat_sum(2).to_string(), "(2 @ d6)");
	assert_eq!(d(2).unwrap().repeat_sum_by(&d(2).unwrap()).unwrap().to_string(), "(d2 @ d2)");
}

#[test]
fn negation() {
	let d4 = d(4).unwrap();
	let d6 = d(6).unwrap();
	assert_eq!((-&d6).to_string(), "(-d6)");
	assert_eq!((-&(&d6 + &d4)).to_string(), "(-(d6 + d4))");
}

#[test]
fn comparisons_with_constants() {
	let d6 = d(6).unwrap();
	let one = Drv::constant(1);
	assert_eq!(d6.less(&one).to_string(), "(d6 < 1)");
	assert_eq!(d6.less_eq(&one).to_string(), "(d6 <= 1)");
	assert_eq!(d6.greater(&one).to_string(), "(d6 > 1)");
	assert_eq!(d6.greater_eq(&one).to_string(), "(d6 >= 1)");
	assert_eq!(d6.equal(&one).to_string(), "(d6 == 1)");
	assert_eq!(d6.not_equal(&one).to_string(), "(d6 != 1)");
}

#[test]
fn mixed_precedence() {
	let d4 = d(4).unwrap();
	let d6 = d(6).unwrap();
	let d10 = d(10).unwrap();
	let expr = &(&d4.repeat_sum(2) * &(&d6 + &d10)) - &(&d4.repeat_sum(8) - &Drv::constant(5));
	assert_eq!(expr.to_string(), "((2 @ d4) * (d6 + d10) - (8 @ d4 - 5))");
}

#[test]
fn left_to_right_chains() {
	let d6 = d(6).unwrap();
	assert_eq!((&(&d6 + &d6) + &d6).to_string(), "(d6 + d6 + d6)");
	assert_eq!((&(&d6 - &d6) - &d6).to_string(), "(d6 - d6 - d6)");
	assert_eq!((&d6 - &(&d6 - &d6)).to_string(), "(d6 - (d6 - d6))");
	assert_eq!((&(&d6 + &d6) - &d6).to_string(), "(d6 + d6 - d6)");
	assert_eq!((&(&d6 * &d6) * &d6).to_string(), "(d6 * d6 * d6)");
	assert_eq!((&(&d6 + &d6) * &d6).to_string(), "((d6 + d6) * d6)");
}

#[test]
fn comparisons_of_sums() {
	let d6 = d(6).unwrap();
	let sum = &d6 + &d6;
	assert_eq!(sum.less(&d6).to_string(), "(d6 + d6 < d6)");
	assert_eq!(sum.equal(&d6).to_string(), "(d6 + d6 == d6)");
	assert_eq!(sum.not_equal(&d6).to_string(), "(d6 + d6 != d6)");

	let nested = d6.less_eq(&d6).less_eq(&d6.less_eq(&d6));
	assert_eq!(nested.to_string(), "((d6 <= d6) <= (d6 <= d6))");
}

#[test]
fn postfix_operations() {
	let d6 = d(6).unwrap();
	assert_eq!(d6.explode().to_string(), "d6.explode()");
	assert_eq!(d6.explode_limited(2).to_string(), "d6.explode(2)");
	assert_eq!((-&d6.explode()).to_string(), "(-d6.explode())");
	assert_eq!((-&d6).explode().to_string(), "(-d6).explode()");
	assert_eq!((-&d6.to_approximate()).to_string(), "(-d6.to_approximate())");
	assert_eq!((-&d6).to_approximate().to_string(), "(-d6).to_approximate()");
	assert_eq!(
		d6.to_approximate().to_exact().unwrap().to_string(),
		"d6.to_approximate().to_exact()"
	);
}

#[test]
fn untracked_operations_drop_the_expression() {
	let d6 = d(6).unwrap();
	let unknown = d6.map(|&x| x);
	assert_eq!(unknown.to_string(), "Drv({1: 1/6, 2: 1/6, 3: 1/6, 4: 1/6, 5: 1/6, 6: 1/6})");
	assert!((&unknown + &d6).expr().is_none());
	assert!((&d6 + &unknown).expr().is_none());
	assert!(unknown.repeat_sum(2).expr().is_none());
	assert!((-&unknown).expr().is_none());

	let renamed = unknown.named("copy");
	assert_eq!((&renamed + &d6).to_string(), "(copy + d6)");
}

#[test]
fn expression_trees() {
	let d6 = d(6).unwrap();
	let sum = &d6 + &Drv::constant(2);
	let atom = |text: &str| Arc::new(Expr::Atom(text.to_owned()));
	assert_eq!(sum.expr(), Some(&Expr::Binary(BinOp::Add, atom("d6"), atom("2"))));
	assert_eq!(sum.expr().unwrap().source(), "d6 + 2");
	assert_eq!(sum.expr().unwrap().bracketed(), "(d6 + 2)");
	assert_eq!(d6.expr().unwrap().bracketed(), "d6");
}

#[test]
fn operator_types() {
	assert_eq!(BinOp::Repeat.op_type(), OpType::Multiplicative);
	assert_eq!(BinOp::FloorDiv.op_type(), OpType::Multiplicative);
	assert_eq!(BinOp::Sub.op_type(), OpType::Additive);
	assert_eq!(BinOp::Ge.op_type(), OpType::Comparison);
	assert!(OpType::Comparison < OpType::Additive);
	assert!(OpType::Multiplicative < OpType::Unary);
	assert_eq!(BinOp::FloorDiv.to_string(), "//");
	assert_eq!(BinOp::Repeat.to_string(), "@");

	let d6 = d(6).unwrap();
	assert_eq!((-&d6).expr().unwrap().op_type(), OpType::Unary);
	assert_eq!(d6.explode().expr().unwrap().op_type(), OpType::Value);
}
