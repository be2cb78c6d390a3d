//! Expression trees describing how a distribution was built.
//!
//! Expressions are purely decorative: they are carried alongside a [`Drv`](crate::Drv) so that it can be displayed as
//! the expression that produced it (`(d6 + d6)`) rather than a list of weights, and never affect any probabilities.

use alloc::{
	format,
	string::{String, ToString},
	sync::Arc,
};
use core::fmt;

/// Individual elements of an expression that produced a distribution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Expr {
	/// Named distribution or literal value (e.g. `d6` or `2`)
	Atom(String),

	/// Negation of an expression
	Neg(Arc<Self>),

	/// Binary operation between two expressions
	Binary(BinOp, Arc<Self>, Arc<Self>),

	/// Expression followed by a method-like suffix (e.g. `.explode()`)
	Postfix(Arc<Self>, String),
}

impl Expr {
	/// Builds the expression text. Operations are grouped with parentheses whenever the order of operations could be
	/// considered ambiguous, such as when mixing addition and multiplication together, and left-to-right chains of
	/// the same kind of arithmetic are left ungrouped.
	///
	/// # Examples
	/// ```
	/// use omnidice::d;
	///
	/// let d6 = d(6)?;
	/// let expr = &(&d6 + &d6) - &d6;
	/// assert_eq!(expr.expr().unwrap().source(), "d6 + d6 - d6");
	///
	/// let expr = &d6 - &(&d6 - &d6);
	/// assert_eq!(expr.expr().unwrap().source(), "d6 - (d6 - d6)");
	/// # Ok::<(), omnidice::Error>(())
	/// ```
	#[must_use]
	pub fn source(&self) -> String {
		match self {
			Self::Atom(text) => text.clone(),
			Self::Neg(x) => format!("-{}", x.bracketed()),
			Self::Binary(op, a, b) => describe_binary_expr(*op, a, b),
			Self::Postfix(x, postfix) => format!("{}{postfix}", x.bracketed()),
		}
	}

	/// Builds the expression text, wrapped in parentheses unless it is an atom or a postfix expression (which can't be
	/// split apart by a neighbouring operator).
	#[must_use]
	pub fn bracketed(&self) -> String {
		match self {
			Self::Atom(..) | Self::Postfix(..) => self.source(),
			Self::Neg(..) | Self::Binary(..) => paren_wrap(self.source()),
		}
	}

	/// Gets the type of operation at the root of this expression.
	#[must_use]
	pub const fn op_type(&self) -> OpType {
		match self {
			Self::Atom(..) | Self::Postfix(..) => OpType::Value,
			Self::Neg(..) => OpType::Unary,
			Self::Binary(op, ..) => op.op_type(),
		}
	}

	/// Combines two expressions with a binary operator, if both are known.
	#[must_use]
	pub(crate) fn binary(op: BinOp, a: Option<&Arc<Self>>, b: Option<&Arc<Self>>) -> Option<Self> {
		Some(Self::Binary(op, Arc::clone(a?), Arc::clone(b?)))
	}

	/// Combines a literal value and an expression with a binary operator, if the expression is known.
	#[must_use]
	pub(crate) fn binary_with_atom(op: BinOp, atom: impl ToString, b: Option<&Arc<Self>>) -> Option<Self> {
		Some(Self::Binary(
			op,
			Arc::new(Self::Atom(atom.to_string())),
			Arc::clone(b?),
		))
	}

	/// Negates an expression, if it is known.
	#[must_use]
	pub(crate) fn neg(x: Option<&Arc<Self>>) -> Option<Self> {
		Some(Self::Neg(Arc::clone(x?)))
	}

	/// Appends a suffix to an expression, if it is known.
	#[must_use]
	pub(crate) fn postfix(x: Option<&Arc<Self>>, postfix: impl Into<String>) -> Option<Self> {
		Some(Self::Postfix(Arc::clone(x?), postfix.into()))
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::source()`].
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.source())
	}
}

/// Binary operators that can combine distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BinOp {
	/// Sum (`+`)
	Add,

	/// Difference (`-`)
	Sub,

	/// Product (`*`)
	Mul,

	/// Quotient (`/`)
	Div,

	/// Quotient rounded towards negative infinity (`//`)
	FloorDiv,

	/// Sum of repeated independent draws (`@`)
	Repeat,

	/// Equality (`==`)
	Eq,

	/// Inequality (`!=`)
	Ne,

	/// Less than (`<`)
	Lt,

	/// Less than or equal to (`<=`)
	Le,

	/// Greater than (`>`)
	Gt,

	/// Greater than or equal to (`>=`)
	Ge,
}

impl BinOp {
	/// Gets the symbol used for the operator in expression text.
	#[must_use]
	pub const fn symbol(self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
			Self::FloorDiv => "//",
			Self::Repeat => "@",
			Self::Eq => "==",
			Self::Ne => "!=",
			Self::Lt => "<",
			Self::Le => "<=",
			Self::Gt => ">",
			Self::Ge => ">=",
		}
	}

	/// Gets the type of the operator, which determines its precedence.
	#[must_use]
	pub const fn op_type(self) -> OpType {
		match self {
			Self::Add | Self::Sub => OpType::Additive,
			Self::Mul | Self::Div | Self::FloorDiv | Self::Repeat => OpType::Multiplicative,
			Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => OpType::Comparison,
		}
	}
}

impl fmt::Display for BinOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

/// Operation type for an individual expression, ordered from the loosest-binding binary operations to the
/// tightest-binding values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Precedence levels are fixed by the operator set")]
pub enum OpType {
	/// Comparison operation
	Comparison,

	/// Additive operation (sum or difference)
	Additive,

	/// Multiplicative operation (product, quotient, or repeated sum)
	Multiplicative,

	/// Unary operation
	Unary,

	/// Single value, no operation
	Value,
}

/// Builds the text for a binary expression with parentheses added where the grouping would otherwise be unclear.
///
/// Everything associates to the left, so the right operand keeps its parentheses unless it binds more tightly. The
/// left operand drops them when it binds more tightly, when it repeats the same non-comparison operator, or when both
/// are additive.
fn describe_binary_expr(op: BinOp, a: &Expr, b: &Expr) -> String {
	let left = match a {
		Expr::Binary(a_op, ..)
			if a_op.op_type() > op.op_type()
				|| (*a_op == op && op.op_type() > OpType::Comparison)
				|| (a_op.op_type() == OpType::Additive && op.op_type() == OpType::Additive) =>
		{
			a.source()
		}
		_ => a.bracketed(),
	};
	let right = match b {
		Expr::Binary(b_op, ..) if b_op.op_type() > op.op_type() => b.source(),
		_ => b.bracketed(),
	};
	format!("{left} {op} {right}")
}

/// Wraps a string in parentheses.
#[must_use]
fn paren_wrap(mut text: String) -> String {
	text.insert(0, '(');
	text.push(')');
	text
}
