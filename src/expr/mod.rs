//! The expression graph.
//!
//! An [`Expr`] is a cheap, clonable handle to an immutable node. Nodes
//! are built bottom-up and never mutated, so the operand relation is
//! acyclic. Cloning a handle and using it under two parents shares the
//! node: the result is a DAG rather than a tree, and every traversal in
//! [`walker`] visits the shared node once.
//!
//! Node identity is reference identity. Two structurally identical
//! subexpressions built separately are different nodes (compare them
//! with [`Expr::structurally_eq`]), while `==` on `Expr` asks whether
//! two handles point at the same node.

pub mod calculus;
pub mod display;
pub mod literal;
pub mod number;
pub mod numeric;
mod ops;
pub mod precedence;
pub mod substitute;
pub mod symbol;
pub mod walker;

use number::Number;
use symbol::Symbol;
use precedence::Precedence;
use crate::util::stricteq::StrictEq;

use num::{Zero, One};
use serde::{Serialize, Deserialize};

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identifier of a node. Handles to the same node share
/// an id; separately constructed nodes never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone)]
pub struct Expr(Arc<Node>);

struct Node {
  id: NodeId,
  kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
  Number(Number),
  Symbol(Symbol),
  /// `operands[0]` is the left operand (or base), `operands[1]` the
  /// right operand (or exponent).
  Operator(Operator, [Expr; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
}

impl Operator {
  pub const ALL: [Operator; 5] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div, Operator::Pow];

  pub fn name(self) -> &'static str {
    match self {
      Operator::Add => "Add",
      Operator::Sub => "Sub",
      Operator::Mul => "Mul",
      Operator::Div => "Div",
      Operator::Pow => "Pow",
    }
  }

  /// The infix token used when rendering. `Pow` renders as `^` here;
  /// see [`Renderer`](display::Renderer) for alternatives.
  pub fn token(self) -> &'static str {
    match self {
      Operator::Add => "+",
      Operator::Sub => "-",
      Operator::Mul => "*",
      Operator::Div => "/",
      Operator::Pow => "^",
    }
  }

  pub fn precedence(self) -> Precedence {
    match self {
      Operator::Add | Operator::Sub => Precedence::SUM,
      Operator::Mul | Operator::Div => Precedence::PRODUCT,
      Operator::Pow => Precedence::POWER,
    }
  }
}

impl Display for Operator {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Expr {
  pub fn new(kind: ExprKind) -> Expr {
    let id = NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed));
    Expr(Arc::new(Node { id, kind }))
  }

  pub fn number(n: impl Into<Number>) -> Expr {
    Expr::new(ExprKind::Number(n.into()))
  }

  pub fn symbol(s: Symbol) -> Expr {
    Expr::new(ExprKind::Symbol(s))
  }

  /// Convenience constructor for a `Symbol` terminal. Returns `None` if
  /// `name` is not a valid symbol name.
  pub fn var(name: &str) -> Option<Expr> {
    Symbol::new(name).map(Expr::symbol)
  }

  pub fn zero() -> Expr {
    Expr::number(Number::zero())
  }

  pub fn one() -> Expr {
    Expr::number(Number::one())
  }

  /// Builds a binary operator node. Numeric operands are coerced into
  /// `Number` terminals; `Expr` operands are shared, not copied.
  pub fn operator(op: Operator, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::new(ExprKind::Operator(op, [left.into(), right.into()]))
  }

  pub fn sum(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::operator(Operator::Add, left, right)
  }

  pub fn difference(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::operator(Operator::Sub, left, right)
  }

  pub fn product(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::operator(Operator::Mul, left, right)
  }

  pub fn quotient(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::operator(Operator::Div, left, right)
  }

  pub fn power(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Expr {
    Expr::operator(Operator::Pow, base, exponent)
  }

  pub fn id(&self) -> NodeId {
    self.0.id
  }

  pub fn kind(&self) -> &ExprKind {
    &self.0.kind
  }

  /// The node's operands in order: empty for terminals, exactly two
  /// for operators.
  pub fn operands(&self) -> &[Expr] {
    match &self.0.kind {
      ExprKind::Number(_) | ExprKind::Symbol(_) => &[],
      ExprKind::Operator(_, operands) => operands,
    }
  }

  pub fn precedence(&self) -> Precedence {
    match &self.0.kind {
      ExprKind::Number(_) | ExprKind::Symbol(_) => Precedence::MAX,
      ExprKind::Operator(op, _) => op.precedence(),
    }
  }

  /// Name of the node's kind: `"Number"`, `"Symbol"`, or the operator
  /// name.
  pub fn kind_name(&self) -> &'static str {
    match &self.0.kind {
      ExprKind::Number(_) => "Number",
      ExprKind::Symbol(_) => "Symbol",
      ExprKind::Operator(op, _) => op.name(),
    }
  }

  pub fn is_terminal(&self) -> bool {
    self.operands().is_empty()
  }

  pub fn as_number(&self) -> Option<&Number> {
    match &self.0.kind {
      ExprKind::Number(n) => Some(n),
      _ => None,
    }
  }

  pub fn as_symbol(&self) -> Option<&Symbol> {
    match &self.0.kind {
      ExprKind::Symbol(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_operator(&self) -> Option<Operator> {
    match &self.0.kind {
      ExprKind::Operator(op, _) => Some(*op),
      _ => None,
    }
  }

  /// True iff both handles refer to the same node.
  pub fn ptr_eq(&self, other: &Expr) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// Compares two graphs by shape and terminal values, ignoring node
  /// identity. Numbers must agree in representation as well as value
  /// (see [`StrictEq`]). Shared nodes are compared once.
  pub fn structurally_eq(&self, other: &Expr) -> bool {
    let mut compared = HashSet::new();
    let mut pending = vec![(self, other)];
    while let Some((a, b)) = pending.pop() {
      if a.ptr_eq(b) || !compared.insert((a.id(), b.id())) {
        continue;
      }
      match (a.kind(), b.kind()) {
        (ExprKind::Number(x), ExprKind::Number(y)) => {
          if !x.strict_eq(y) {
            return false;
          }
        }
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => {
          if x != y {
            return false;
          }
        }
        (ExprKind::Operator(op_a, [la, ra]), ExprKind::Operator(op_b, [lb, rb])) => {
          if op_a != op_b {
            return false;
          }
          pending.push((la, lb));
          pending.push((ra, rb));
        }
        _ => return false,
      }
    }
    true
  }
}

/// Identity comparison. See [`Expr::structurally_eq`] for comparison
/// by shape.
impl PartialEq for Expr {
  fn eq(&self, other: &Expr) -> bool {
    self.ptr_eq(other)
  }
}

impl Eq for Expr {}

impl Hash for Expr {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id().hash(state);
  }
}

/// Tears the graph down iteratively. Uniquely owned operands are
/// detached before their parent is freed, so dropping an arbitrarily
/// deep chain never recurses.
impl Drop for Node {
  fn drop(&mut self) {
    fn detach_operands(kind: &mut ExprKind, out: &mut Vec<Expr>) {
      if matches!(kind, ExprKind::Operator(..)) {
        if let ExprKind::Operator(_, operands) = std::mem::replace(kind, ExprKind::Number(Number::zero())) {
          out.extend(operands);
        }
      }
    }

    let mut orphans = Vec::new();
    detach_operands(&mut self.kind, &mut orphans);
    while let Some(Expr(node)) = orphans.pop() {
      if let Ok(mut node) = Arc::try_unwrap(node) {
        detach_operands(&mut node.kind, &mut orphans);
      }
    }
  }
}

impl From<Number> for Expr {
  fn from(n: Number) -> Expr {
    Expr::number(n)
  }
}

impl From<Symbol> for Expr {
  fn from(s: Symbol) -> Expr {
    Expr::symbol(s)
  }
}

impl From<i32> for Expr {
  fn from(n: i32) -> Expr {
    Expr::number(n)
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::number(n)
  }
}

impl From<f64> for Expr {
  fn from(n: f64) -> Expr {
    Expr::number(n)
  }
}

impl From<&Expr> for Expr {
  fn from(e: &Expr) -> Expr {
    e.clone()
  }
}
