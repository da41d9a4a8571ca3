use crate::algebra::{eval_f64, simplify};
use crate::syntax::{expr_to_string, substitute_variable, Expr};

/// Comparison kinds a domain restriction can impose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
  NotEqual,
  Greater,
  GreaterEq,
  Less,
  LessEq,
}

impl Relation {
  pub fn symbol(&self) -> &'static str {
    match self {
      Relation::NotEqual => "≠",
      Relation::Greater => ">",
      Relation::GreaterEq => "≥",
      Relation::Less => "<",
      Relation::LessEq => "≤",
    }
  }

  fn holds(&self, lhs: f64, rhs: f64) -> bool {
    match self {
      Relation::NotEqual => (lhs - rhs).abs() > 1e-9,
      Relation::Greater => lhs > rhs,
      Relation::GreaterEq => lhs >= rhs,
      Relation::Less => lhs < rhs,
      Relation::LessEq => lhs <= rhs,
    }
  }
}

/// Result of checking one restriction at a candidate point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionCheck {
  Holds,
  Violated(String),
}

/// A relational constraint a domain-admissible point must satisfy,
/// derived from a structural feature of the expression (a denominator, a
/// logarithm argument, an even-index radical base). The full restriction
/// list defines the domain: a point is admissible iff every restriction
/// holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
  pub subject: Expr,
  pub relation: Relation,
  pub bound: Expr,
}

impl Restriction {
  pub fn new(subject: Expr, relation: Relation, bound: Expr) -> Restriction {
    Restriction {
      subject,
      relation,
      bound,
    }
  }

  pub fn describe(&self) -> String {
    format!(
      "{} {} {}",
      expr_to_string(&self.subject),
      self.relation.symbol(),
      expr_to_string(&self.bound)
    )
  }

  /// Substitute the candidate into the subject and evaluate the
  /// comparison numerically. Operands that fail to evaluate to a real
  /// number count as a violation with a "complex or undefined" detail.
  pub fn admits(&self, var: &str, candidate: &Expr) -> RestrictionCheck {
    let substituted =
      simplify(substitute_variable(&self.subject, var, candidate));
    let lhs = eval_f64(&substituted);
    let rhs = eval_f64(&self.bound);
    match (lhs, rhs) {
      (Ok(lhs), Ok(rhs)) => {
        if self.relation.holds(lhs, rhs) {
          RestrictionCheck::Holds
        } else {
          RestrictionCheck::Violated(format!(
            "{} fails at {} = {}",
            self.describe(),
            var,
            expr_to_string(candidate)
          ))
        }
      }
      _ => RestrictionCheck::Violated(format!(
        "{} is complex or undefined at {} = {}",
        self.describe(),
        var,
        expr_to_string(candidate)
      )),
    }
  }
}

impl std::fmt::Display for Restriction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} {} {}",
      expr_to_string(&self.subject),
      self.relation.symbol(),
      expr_to_string(&self.bound)
    )
  }
}
