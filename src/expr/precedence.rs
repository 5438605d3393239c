/// Binding strength of a node, used only when rendering.
///
/// Higher binds tighter. Terminals sit at [`Precedence::MAX`], strictly
/// above every operator, so they are never parenthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(u8);

impl Precedence {
  pub const MIN: Precedence = Precedence(0);
  pub const MAX: Precedence = Precedence(u8::MAX);

  pub const SUM: Precedence = Precedence(1);
  pub const PRODUCT: Precedence = Precedence(2);
  pub const POWER: Precedence = Precedence(3);

  /// An operand is wrapped in parentheses iff its parent binds
  /// strictly tighter than it does.
  pub fn needs_parens_under(self, parent: Precedence) -> bool {
    parent > self
  }
}
