use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Signed, Zero};

use crate::syntax::{BinaryOperator, Expr, UnaryOperator};

/// Numeric view of a literal leaf, used for constant folding.
#[derive(Debug, Clone, Copy)]
enum Num {
  Int(i64),
  Rat(Rational64),
  Float(f64),
}

fn as_num(expr: &Expr) -> Option<Num> {
  match expr {
    Expr::Integer(n) => Some(Num::Int(*n)),
    Expr::Rational(r) => Some(Num::Rat(*r)),
    Expr::Real(f) => Some(Num::Float(*f)),
    _ => None,
  }
}

fn num_to_expr(num: Num) -> Expr {
  match num {
    Num::Int(n) => Expr::Integer(n),
    Num::Rat(r) => {
      if r.denom() == &1 {
        Expr::Integer(*r.numer())
      } else {
        Expr::Rational(r)
      }
    }
    Num::Float(f) => Expr::Real(f),
  }
}

fn to_float(num: Num) -> f64 {
  match num {
    Num::Int(n) => n as f64,
    Num::Rat(r) => *r.numer() as f64 / *r.denom() as f64,
    Num::Float(f) => f,
  }
}

fn to_rational(num: Num) -> Option<Rational64> {
  match num {
    Num::Int(n) => Some(Rational64::from_integer(n)),
    Num::Rat(r) => Some(r),
    Num::Float(_) => None,
  }
}

/// Fold a binary operation on two numeric literals. Returns `None` when
/// the fold would be unsound (division by zero, overflow), leaving the
/// expression untouched for the numeric evaluator to report on.
fn fold_binary(op: BinaryOperator, left: Num, right: Num) -> Option<Num> {
  if matches!(left, Num::Float(_)) || matches!(right, Num::Float(_)) {
    let a = to_float(left);
    let b = to_float(right);
    let value = match op {
      BinaryOperator::Plus => a + b,
      BinaryOperator::Minus => a - b,
      BinaryOperator::Times => a * b,
      BinaryOperator::Divide => {
        if b == 0.0 {
          return None;
        }
        a / b
      }
      BinaryOperator::Power => {
        if a < 0.0 && b.fract() != 0.0 {
          return None;
        }
        a.powf(b)
      }
    };
    return value.is_finite().then_some(Num::Float(value));
  }

  let a = to_rational(left)?;
  let b = to_rational(right)?;
  match op {
    BinaryOperator::Plus => checked_rat(a, b, Rational64::checked_add),
    BinaryOperator::Minus => checked_rat(a, b, Rational64::checked_sub),
    BinaryOperator::Times => checked_rat(a, b, Rational64::checked_mul),
    BinaryOperator::Divide => {
      if b.is_zero() {
        None
      } else {
        a.checked_div(&b).map(Num::Rat)
      }
    }
    BinaryOperator::Power => {
      let exponent = match right {
        Num::Int(n) => n,
        Num::Rat(r) if r.denom() == &1 => *r.numer(),
        _ => return None,
      };
      if exponent.unsigned_abs() > 32 {
        return None;
      }
      if exponent >= 0 {
        checked_pow_rat(a, exponent as u32).map(Num::Rat)
      } else if a.is_zero() {
        None
      } else {
        let positive = checked_pow_rat(a, exponent.unsigned_abs() as u32)?;
        if positive.is_zero() {
          return None;
        }
        Some(Num::Rat(positive.recip()))
      }
    }
  }
}

fn checked_rat(
  a: Rational64,
  b: Rational64,
  op: fn(&Rational64, &Rational64) -> Option<Rational64>,
) -> Option<Num> {
  op(&a, &b).map(Num::Rat)
}

fn checked_pow_rat(base: Rational64, exponent: u32) -> Option<Rational64> {
  let mut result = Rational64::from_integer(1);
  for _ in 0..exponent {
    result = result.checked_mul(&base)?;
  }
  Some(result)
}

/// Structural simplification: constant folding plus the usual identity
/// rewrites (0 + x, 1 * x, x^1, x^0, double negation). The result is a new
/// tree; unsupported shapes pass through unchanged.
pub fn simplify(expr: Expr) -> Expr {
  match expr {
    Expr::BinaryOp { op, left, right } => {
      let left = simplify(*left);
      let right = simplify(*right);

      if let (Some(a), Some(b)) = (as_num(&left), as_num(&right)) {
        if let Some(folded) = fold_binary(op, a, b) {
          return num_to_expr(folded);
        }
      }

      use BinaryOperator::*;
      match (&op, &left, &right) {
        // 0 + x = x
        (Plus, l, _) if l.is_zero() => return right,
        // x + 0 = x
        (Plus, _, r) if r.is_zero() => return left,
        // 0 * x = 0, x * 0 = 0
        (Times, l, _) if l.is_zero() => return Expr::Integer(0),
        (Times, _, r) if r.is_zero() => return Expr::Integer(0),
        // 1 * x = x
        (Times, l, _) if l.is_one() => return right,
        // x * 1 = x
        (Times, _, r) if r.is_one() => return left,
        // x - 0 = x
        (Minus, _, r) if r.is_zero() => return left,
        // 0 - x = -x
        (Minus, l, _) if l.is_zero() => {
          return simplify(Expr::neg(right));
        }
        // x / 1 = x
        (Divide, _, r) if r.is_one() => return left,
        // x / -1 = -x
        (Divide, _, Expr::Integer(-1)) => {
          return simplify(Expr::neg(left));
        }
        // x^0 = 1
        (Power, _, r) if r.is_zero() => return Expr::Integer(1),
        // x^1 = x
        (Power, _, r) if r.is_one() => return left,
        // 1^x = 1
        (Power, l, _) if l.is_one() => return Expr::Integer(1),
        _ => {}
      }

      // x + (-y) = x - y, x - (-y) = x + y
      if let Expr::UnaryOp {
        op: UnaryOperator::Minus,
        operand,
      } = &right
      {
        match op {
          Plus => {
            return simplify(Expr::binary(
              Minus,
              left,
              operand.as_ref().clone(),
            ));
          }
          Minus => {
            return simplify(Expr::binary(
              Plus,
              left,
              operand.as_ref().clone(),
            ));
          }
          _ => {}
        }
      }

      Expr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
      }
    }
    Expr::UnaryOp { op, operand } => {
      let operand = simplify(*operand);
      match op {
        UnaryOperator::Minus => match operand {
          Expr::Integer(n) => Expr::Integer(-n),
          Expr::Rational(r) => num_to_expr(Num::Rat(-r)),
          Expr::Real(f) => Expr::Real(-f),
          // -(-x) = x
          Expr::UnaryOp {
            op: UnaryOperator::Minus,
            operand: inner,
          } => *inner,
          // -(a - b) = b - a
          Expr::BinaryOp {
            op: BinaryOperator::Minus,
            left,
            right,
          } => simplify(Expr::BinaryOp {
            op: BinaryOperator::Minus,
            left: right,
            right: left,
          }),
          other => Expr::neg(other),
        },
      }
    }
    Expr::FunctionCall { name, args } => {
      let args: Vec<Expr> = args.into_iter().map(simplify).collect();
      // sqrt of a perfect square collapses to the exact root
      if name == "sqrt" && args.len() == 1 {
        if let Some(root) = exact_sqrt(&args[0]) {
          return root;
        }
      }
      Expr::FunctionCall { name, args }
    }
    other => other,
  }
}

fn exact_sqrt(expr: &Expr) -> Option<Expr> {
  let value = match expr {
    Expr::Integer(n) if *n >= 0 => Rational64::from_integer(*n),
    Expr::Rational(r) if !r.is_negative() => *r,
    _ => return None,
  };
  let numer = integer_sqrt(*value.numer())?;
  let denom = integer_sqrt(*value.denom())?;
  Some(num_to_expr(Num::Rat(Rational64::new(numer, denom))))
}

fn integer_sqrt(n: i64) -> Option<i64> {
  if n < 0 {
    return None;
  }
  let root = (n as f64).sqrt().round() as i64;
  (root.checked_mul(root) == Some(n)).then_some(root)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn x() -> Expr {
    Expr::Identifier("x".to_string())
  }

  #[test]
  fn folds_integer_arithmetic() {
    let expr = Expr::binary(
      BinaryOperator::Plus,
      Expr::Integer(2),
      Expr::Integer(3),
    );
    assert_eq!(simplify(expr), Expr::Integer(5));
  }

  #[test]
  fn integer_division_becomes_exact_rational() {
    let expr = Expr::binary(
      BinaryOperator::Divide,
      Expr::Integer(1),
      Expr::Integer(-2),
    );
    assert_eq!(simplify(expr), Expr::Rational(Rational64::new(-1, 2)));
  }

  #[test]
  fn division_by_zero_is_left_unfolded() {
    let expr = Expr::binary(
      BinaryOperator::Divide,
      Expr::Integer(1),
      Expr::Integer(0),
    );
    let simplified = simplify(expr.clone());
    assert_eq!(simplified, expr);
  }

  #[test]
  fn applies_identity_rewrites() {
    let expr = Expr::binary(
      BinaryOperator::Plus,
      Expr::Integer(0),
      Expr::binary(BinaryOperator::Times, Expr::Integer(1), x()),
    );
    assert_eq!(simplify(expr), x());
  }

  #[test]
  fn power_identities() {
    let squared = Expr::binary(BinaryOperator::Power, x(), Expr::Integer(1));
    assert_eq!(simplify(squared), x());
    let unit = Expr::binary(BinaryOperator::Power, x(), Expr::Integer(0));
    assert_eq!(simplify(unit), Expr::Integer(1));
  }

  #[test]
  fn double_negation_cancels() {
    let expr = Expr::neg(Expr::neg(x()));
    assert_eq!(simplify(expr), x());
  }

  #[test]
  fn sqrt_of_perfect_square_collapses() {
    let expr = Expr::call("sqrt", vec![Expr::Integer(16)]);
    assert_eq!(simplify(expr), Expr::Integer(4));
    let irrational = Expr::call("sqrt", vec![Expr::Integer(8)]);
    assert_eq!(
      simplify(irrational),
      Expr::call("sqrt", vec![Expr::Integer(8)])
    );
  }

  #[test]
  fn log_of_constant_stays_exact() {
    let expr = Expr::call("log", vec![Expr::Integer(2)]);
    assert_eq!(simplify(expr.clone()), expr);
  }
}
