//! Single-pass, bottom-up evaluation over an expression graph.
//!
//! [`evaluate`] computes a caller-supplied rule at every distinct node
//! reachable from a root, feeding each invocation the results already
//! computed for the node's operands. Results are memoized by node
//! identity, so a subexpression shared by several parents is computed
//! once. The traversal uses an explicit work list instead of the call
//! stack, so graph depth is bounded by memory, not stack size.

use super::{Expr, NodeId};
use crate::util::unwrap_infallible;

use log::{debug, trace};

use std::collections::HashMap;
use std::convert::Infallible;

/// Evaluates `rule` at every node reachable from `root`, operands
/// before parents, and returns the result computed for `root`.
///
/// `rule` receives the node, references to its operands' results (in
/// operand order, empty for terminals), and `context`. It is invoked
/// exactly once per distinct node. The first error returned by `rule`
/// aborts the traversal and is returned unchanged.
pub fn evaluate<R, C, E, F>(root: &Expr, context: &C, mut rule: F) -> Result<R, E>
where C: ?Sized,
      F: FnMut(&Expr, &[&R], &C) -> Result<R, E> {
  let mut memo: HashMap<NodeId, R> = HashMap::new();
  let mut pending: Vec<Expr> = vec![root.clone()];
  while let Some(node) = pending.pop() {
    if memo.contains_key(&node.id()) {
      // Pushed more than once before its first evaluation.
      continue;
    }
    let missing: Vec<Expr> = node.operands().iter()
      .filter(|operand| !memo.contains_key(&operand.id()))
      .cloned()
      .collect();
    if !missing.is_empty() {
      pending.push(node);
      // Reversed so that the left operand is popped first.
      pending.extend(missing.into_iter().rev());
      continue;
    }
    let result = {
      let operand_results: Vec<&R> = node.operands().iter()
        .map(|operand| &memo[&operand.id()])
        .collect();
      rule(&node, &operand_results, context)?
    };
    trace!("evaluated {} node {:?}", node.kind_name(), node.id());
    memo.insert(node.id(), result);
  }
  debug!("postorder evaluation visited {} distinct nodes", memo.len());
  Ok(memo.remove(&root.id()).expect("root is evaluated before the work list empties"))
}

/// [`evaluate`] for rules that cannot fail.
pub fn evaluate_ok<R, C, F>(root: &Expr, context: &C, mut rule: F) -> R
where C: ?Sized,
      F: FnMut(&Expr, &[&R], &C) -> R {
  let result: Result<R, Infallible> = evaluate(root, context, |node, operands, context| {
    Ok(rule(node, operands, context))
  });
  unwrap_infallible(result)
}

/// Every distinct node reachable from `root`, each listed after all of
/// its operands. The root comes last.
pub fn postorder(root: &Expr) -> Vec<Expr> {
  let mut order = Vec::new();
  evaluate_ok(root, &(), |node, _, _| order.push(node.clone()));
  order
}

/// Number of distinct nodes reachable from `root`, counting shared
/// subexpressions once.
pub fn node_count(root: &Expr) -> usize {
  postorder(root).len()
}
